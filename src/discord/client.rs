use crate::{
    actions,
    discord::{commands, handler::event_handler, Data},
};
use anyhow::{anyhow, bail, Error, Result};
use poise::{samples::create_application_commands, Framework, PrefixFrameworkOptions};
use serenity::{
    all::{GuildId, Ready, UserId},
    builder::CreateCommand,
    client::Client as DiscordClient,
    prelude::{Context, GatewayIntents},
};
use songbird::SerenityInit;

use std::sync::{Arc, OnceLock};

/// Records why setup failed, so the caller can tell a shutdown from a crash.
#[derive(Clone, Default)]
pub struct StartupStatus(Arc<OnceLock<String>>);

impl StartupStatus {
    /// Only the first failure is kept.
    pub fn fail(&self, error: &Error) {
        self.0.set(format!("{error:#}")).ok();
    }

    pub fn check(&self) -> Result<()> {
        match self.0.get() {
            Some(error) => bail!("Startup failed: {error}"),
            None => Ok(()),
        }
    }
}

pub struct Bot {
    client: DiscordClient,
    startup: StartupStatus,
}

impl Bot {
    /// Runs until the shards shut down. Errors if setup failed.
    pub async fn start(&mut self) -> Result<()> {
        self.client.start().await?;
        self.startup.check()
    }
}

pub fn invite_link(bot_id: UserId) -> String {
    let permissions = "3148800";
    let scope = "bot%20applications.commands";
    format!(
        "https://discord.com/oauth2/authorize?client_id={}&permissions={}&scope={}",
        bot_id, permissions, scope
    )
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    let context = error.ctx();
    let message = match error {
        poise::FrameworkError::Setup { error, framework, .. } => {
            // Events wait on user data forever after a failed setup.
            log::error!("Setup failed, shutting down: {error:#}");
            framework.shard_manager().shutdown_all().await;
            return;
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            format!(
                "Error while running `{}`: **{:?}**",
                ctx.command().name,
                error
            )
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            format!(
                "Error on event `{:?}`: **{:?}**",
                event.snake_case_name(),
                error
            )
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                format!("Error: **{}**", e)
            } else {
                return;
            }
        }
    };
    log::error!("{message}");
    if let Some(ctx) = context {
        ctx.say(message).await.ok();
    }
}

async fn on_startup(
    guild: Option<GuildId>,
    data: Data,
    create_commands: Vec<CreateCommand>,
    ctx: &Context,
    ready: &Ready,
) -> Result<Data> {
    let Some(guild) = guild else {
        serenity::all::Command::set_global_commands(&ctx.http, create_commands).await?;
        log::info!("Registered commands globally");
        return Ok(data);
    };

    let is_on_guild = ready.guilds.iter().any(|x| x.id == guild);
    if !is_on_guild {
        log::error!("The bot is not on your guild.");
        log::error!("Invite it with:\n {}", invite_link(ready.user.id));
        return Err(anyhow!("Bot is not a member of guild {guild}"));
    }

    guild.set_commands(&ctx.http, create_commands).await?;
    log::info!("Registered commands in guild {guild}");
    Ok(data)
}

pub async fn create_client(
    token: &str,
    guild_id: Option<u64>,
    prefix: &str,
) -> Result<Bot> {
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
    let commands = commands::commands();
    let data = Data {
        actions: actions::actions(),
    };
    let guild = guild_id.map(GuildId::new);

    let create_commands = create_application_commands(&commands);
    let options = poise::FrameworkOptions {
        commands,
        prefix_options: PrefixFrameworkOptions {
            prefix: Some(prefix.to_owned()),
            ..Default::default()
        },
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        on_error: |e| Box::pin(on_error(e)),
        ..Default::default()
    };
    let startup = StartupStatus::default();
    let recorder = startup.clone();
    let framework = Framework::new(options, move |ctx, ready, _framework| {
        Box::pin(async move {
            let result = on_startup(guild, data, create_commands, ctx, ready).await;
            if let Err(error) = &result {
                recorder.fail(error);
            }
            result
        })
    });

    let client = DiscordClient::builder(token, intents)
        .framework(framework)
        .register_songbird()
        .await?;
    Ok(Bot { client, startup })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_status_reports_first_failure() {
        let status = StartupStatus::default();
        assert!(status.check().is_ok());

        let recorder = status.clone();
        recorder.fail(&anyhow!("Bot is not a member of guild 42"));
        recorder.fail(&anyhow!("second"));

        let err = status.check().unwrap_err().to_string();
        assert_eq!(err, "Startup failed: Bot is not a member of guild 42");
    }

    #[test]
    fn invite_link_names_the_bot() {
        let link = invite_link(UserId::new(1234));
        assert!(link.starts_with("https://discord.com/oauth2/authorize?client_id=1234&"));
        assert!(link.ends_with("scope=bot%20applications.commands"));
    }
}
