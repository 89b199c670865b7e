use serenity::all::{ChannelId, GuildId, Message};

/// The text message that caused an action to be considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginMessage {
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
}

impl OriginMessage {
    pub fn new(guild_id: Option<GuildId>, channel_id: ChannelId) -> Self {
        Self {
            guild_id,
            channel_id,
        }
    }
}

impl From<&Message> for OriginMessage {
    fn from(msg: &Message) -> Self {
        Self::new(msg.guild_id, msg.channel_id)
    }
}

/// Per-call context for an action.
///
/// The client is borrowed from whoever owns the connection to the platform;
/// actions never keep it past the call.
pub struct State<'a, P> {
    pub client: Option<&'a P>,
    pub message: Option<OriginMessage>,
}

impl<'a, P> State<'a, P> {
    pub fn new(client: &'a P, message: OriginMessage) -> Self {
        Self {
            client: Some(client),
            message: Some(message),
        }
    }

    /// State for contexts without a text message, such as voice-only turns.
    pub fn without_message(client: &'a P) -> Self {
        Self {
            client: Some(client),
            message: None,
        }
    }
}

impl<P> Default for State<'_, P> {
    fn default() -> Self {
        Self {
            client: None,
            message: None,
        }
    }
}
