//! Narrow views of the voice SDK that actions depend on.
//!
//! The Discord-backed implementation lives in [`crate::discord::common`];
//! tests use the fakes in this module.

use serenity::{
    all::{ChannelId, ChannelType, GuildId},
    async_trait,
};

/// A channel as listed by the platform cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelType,
}

pub trait VoiceAdapterCounter {
    /// Number of voice connections the client currently holds, across all guilds.
    fn active_adapters(&self) -> usize;
}

#[async_trait]
pub trait VoiceConnection: Send + Sync {
    /// Voice channel the connection is joined to, if known.
    async fn channel(&self) -> Option<ChannelId>;

    /// Gracefully tear down the voice session.
    async fn destroy(&self) -> anyhow::Result<()>;
}

pub trait VoiceConnectionRegistry {
    type Connection: VoiceConnection;

    fn connection(&self, guild: GuildId) -> Option<Self::Connection>;
}

pub trait ServerChannelLister {
    fn channels(&self, guild: GuildId) -> Vec<ChannelSummary>;

    fn voice_channels(&self, guild: GuildId) -> Vec<ChannelSummary> {
        self.channels(guild)
            .into_iter()
            .filter(|channel| channel.kind == ChannelType::Voice)
            .collect()
    }
}

/// Everything an action needs from the voice platform.
pub trait VoicePlatform:
    VoiceAdapterCounter + VoiceConnectionRegistry + ServerChannelLister + Send + Sync
{
}

impl<T> VoicePlatform for T where
    T: VoiceAdapterCounter + VoiceConnectionRegistry + ServerChannelLister + Send + Sync
{
}


#[cfg(test)]
mod tests {
    use super::{fake::FakePlatform, *};

    #[test]
    fn voice_channels_filters_by_kind() {
        let guild = GuildId::new(1);
        let platform = FakePlatform::new()
            .with_channel(guild, ChannelId::new(10), "general", ChannelType::Text)
            .with_channel(guild, ChannelId::new(11), "Lounge", ChannelType::Voice)
            .with_channel(guild, ChannelId::new(12), "Stage", ChannelType::Stage);

        let voice = platform.voice_channels(guild);
        assert_eq!(voice.len(), 1);
        assert_eq!(voice[0].name, "Lounge");
        assert!(platform.voice_channels(GuildId::new(2)).is_empty());
    }
}
