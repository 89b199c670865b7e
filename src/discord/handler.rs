use anyhow::{Error, Result};
use poise::FrameworkContext;
use serenity::{all::FullEvent, client::Context as SerenityContext, model::channel::Message};

use crate::{
    action::{Action, Applicability, Memory},
    discord::{common::platform, Data},
    error::ActionError,
    state::{OriginMessage, State},
    voice::VoicePlatform,
};

pub async fn event_handler(
    ctx: &SerenityContext,
    event: &FullEvent,
    _framework: FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<()> {
    match event {
        FullEvent::Ready { data_about_bot } => {
            log::info!("{} is connected!", data_about_bot.user.name);
        }
        FullEvent::Message { new_message } => {
            let platform = platform(ctx).await?;
            dispatch_message(&data.actions, new_message, &platform).await?;
        }
        _ => {}
    }
    Ok(())
}

/// Run every applicable action for a chat message. Messages from bots are ignored.
///
/// Returns how many action handlers ran.
pub async fn dispatch_message<P: VoicePlatform>(
    actions: &[Box<dyn Action<P>>],
    msg: &Message,
    platform: &P,
) -> Result<usize, ActionError> {
    if msg.author.bot {
        return Ok(0);
    }

    let memory = Memory::new(msg.content.clone());
    let state = State::new(platform, OriginMessage::from(msg));
    dispatch(actions, &memory, &state).await
}

/// Validate each action against `memory` and handle the applicable ones, in order.
pub async fn dispatch<P: VoicePlatform>(
    actions: &[Box<dyn Action<P>>],
    memory: &Memory,
    state: &State<'_, P>,
) -> Result<usize, ActionError> {
    let mut ran = 0;
    for action in actions {
        match action.validate(memory, Some(state))? {
            Applicability::Applicable => {
                log::info!("Running {}", action.name());
                let done = action.handle(memory, state).await?;
                log::debug!("{} finished: {done}", action.name());
                ran += 1;
            }
            Applicability::NotApplicable => {}
            Applicability::Indeterminate => log::debug!("Skipped {}", action.name()),
        }
    }
    Ok(ran)
}
