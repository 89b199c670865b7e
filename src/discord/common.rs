use anyhow::{anyhow, Result};
use serenity::{
    all::{ChannelId, GuildId},
    async_trait,
    cache::Cache,
    client::Context as SerenityContext,
};
use songbird::{Call, Songbird};
use tokio::sync::Mutex;

use std::sync::Arc;

use crate::{
    action::Action,
    voice::{
        ChannelSummary, ServerChannelLister, VoiceAdapterCounter, VoiceConnection,
        VoiceConnectionRegistry,
    },
};

pub struct Data {
    pub actions: Vec<Box<dyn Action<SongbirdPlatform>>>,
}
pub type Context<'a> = poise::Context<'a, Data, anyhow::Error>;

/// Voice capabilities backed by the songbird manager and the serenity cache.
#[derive(Clone)]
pub struct SongbirdPlatform {
    manager: Arc<Songbird>,
    cache: Arc<Cache>,
}

impl SongbirdPlatform {
    pub fn new(manager: Arc<Songbird>, cache: Arc<Cache>) -> Self {
        Self { manager, cache }
    }
}

impl VoiceAdapterCounter for SongbirdPlatform {
    fn active_adapters(&self) -> usize {
        self.manager.iter().count()
    }
}

impl VoiceConnectionRegistry for SongbirdPlatform {
    type Connection = SongbirdConnection;

    fn connection(&self, guild: GuildId) -> Option<SongbirdConnection> {
        let call = self.manager.get(guild)?;
        Some(SongbirdConnection {
            manager: self.manager.clone(),
            guild,
            call,
        })
    }
}

impl ServerChannelLister for SongbirdPlatform {
    fn channels(&self, guild: GuildId) -> Vec<ChannelSummary> {
        let Some(cached) = self.cache.guild(guild) else {
            log::debug!("Guild {guild} is not cached");
            return Vec::new();
        };
        cached
            .channels
            .values()
            .map(|channel| ChannelSummary {
                id: channel.id,
                name: channel.name.clone(),
                kind: channel.kind,
            })
            .collect()
    }
}

pub struct SongbirdConnection {
    manager: Arc<Songbird>,
    guild: GuildId,
    call: Arc<Mutex<Call>>,
}

#[async_trait]
impl VoiceConnection for SongbirdConnection {
    async fn channel(&self) -> Option<ChannelId> {
        let call = self.call.lock().await;
        call.current_channel().map(|channel| ChannelId::new(channel.0.get()))
    }

    async fn destroy(&self) -> Result<()> {
        // Leaves the channel and drops the call from the manager.
        self.manager.remove(self.guild).await?;
        log::info!("Left voice in guild {}", self.guild);
        Ok(())
    }
}

pub async fn get_manager(ctx: &SerenityContext) -> Result<Arc<Songbird>> {
    let manager = songbird::get(ctx)
        .await
        .ok_or_else(|| anyhow!("Couldn't start manager"))?;
    Ok(manager)
}

pub async fn platform(ctx: &SerenityContext) -> Result<SongbirdPlatform> {
    let manager = get_manager(ctx).await?;
    Ok(SongbirdPlatform::new(manager, ctx.cache.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::UserId;

    fn manager() -> Arc<Songbird> {
        let manager = Songbird::serenity();
        manager.initialise_client_data(1, UserId::new(1));
        manager
    }

    #[tokio::test]
    async fn counts_calls_in_uncached_guilds() {
        let manager = manager();
        let platform = SongbirdPlatform::new(manager.clone(), Arc::new(Cache::new()));
        assert_eq!(platform.active_adapters(), 0);
        assert!(platform.connection(GuildId::new(5)).is_none());

        manager.get_or_insert(GuildId::new(5));
        manager.get_or_insert(GuildId::new(6));
        assert_eq!(platform.active_adapters(), 2);
        assert!(platform.connection(GuildId::new(5)).is_some());
        assert!(platform.channels(GuildId::new(5)).is_empty());
    }

    #[tokio::test]
    async fn destroy_drops_the_call() {
        let manager = manager();
        let platform = SongbirdPlatform::new(manager.clone(), Arc::new(Cache::new()));
        manager.get_or_insert(GuildId::new(5));

        let connection = platform.connection(GuildId::new(5)).unwrap();
        assert_eq!(connection.channel().await, None);
        connection.destroy().await.unwrap();
        assert_eq!(platform.active_adapters(), 0);
    }
}
