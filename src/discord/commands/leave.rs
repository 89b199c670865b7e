use anyhow::Result;
use poise::command;

use crate::{
    action::{Action, Memory},
    actions::LeaveVoice,
    discord::{common::platform, Context},
    state::{OriginMessage, State},
};

/// Leave the voice chat
#[command(slash_command, prefix_command, guild_only)]
pub async fn leave(ctx: Context<'_>) -> Result<()> {
    let platform = platform(ctx.serenity_context()).await?;
    let origin = OriginMessage::new(ctx.guild_id(), ctx.channel_id());
    let state = State::new(&platform, origin);

    // Asked for by name, so the keyword check is skipped.
    LeaveVoice.handle(&Memory::default(), &state).await?;
    ctx.say("Bye!").await?;
    Ok(())
}
