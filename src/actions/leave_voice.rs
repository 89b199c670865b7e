//! `LEAVE_VOICE`: leave the voice channel when someone says so.
//!
//! Intent is a plain keyword match; the action only applies while the client
//! actually holds a voice connection.

use serenity::async_trait;

use crate::{
    action::{Action, ActionExample, Applicability, Content, Memory},
    error::ActionError,
    state::State,
    voice::{VoiceConnection, VoicePlatform},
};

pub const NAME: &str = "LEAVE_VOICE";

/// Lowercase substrings that signal someone wants the agent out of voice.
pub const KEYWORDS: &[&str] = &[
    "leave",
    "exit",
    "stop",
    "quit",
    "get off",
    "get out",
    "bye",
    "cya",
    "see you",
    "hop off",
    "voice",
    "vc",
    "chat",
    "call",
    "meeting",
    "discussion",
];

/// Whether `text` contains any of [`KEYWORDS`], ignoring case.
pub fn mentions_leave_intent(text: &str) -> bool {
    let text = text.to_lowercase();
    KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

pub struct LeaveVoice;

#[async_trait]
impl<P: VoicePlatform> Action<P> for LeaveVoice {
    fn name(&self) -> &'static str {
        NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["LEAVE_CALL", "DISCONNECT_VOICE", "EXIT_VOICE"]
    }

    fn description(&self) -> &'static str {
        "Leave the current voice channel."
    }

    fn condition(&self) -> &'static str {
        "The agent wants to or has been asked to leave the current voice channel."
    }

    fn examples(&self) -> Vec<Vec<ActionExample>> {
        examples()
    }

    fn validate(
        &self,
        memory: &Memory,
        state: Option<&State<'_, P>>,
    ) -> Result<Applicability, ActionError> {
        let state = state.ok_or(ActionError::MissingState)?;

        // Voice-only turns carry no text message to judge.
        if state.message.is_none() {
            return Ok(Applicability::Indeterminate);
        }

        let client = state.client.ok_or(ActionError::MissingClient)?;

        if !mentions_leave_intent(memory.text()) {
            return Ok(Applicability::NotApplicable);
        }

        Ok((client.active_adapters() > 0).into())
    }

    async fn handle(&self, _memory: &Memory, state: &State<'_, P>) -> Result<bool, ActionError> {
        let client = state.client.ok_or(ActionError::MissingClient)?;
        let message = state.message.ok_or(ActionError::MissingMessage)?;

        let Some(guild) = message.guild_id else {
            log::debug!("No guild for message in {}, nothing to leave", message.channel_id);
            return Ok(true);
        };

        let Some(connection) = client.connection(guild) else {
            log::debug!("No voice connection in guild {guild}");
            return Ok(true);
        };

        let channel = connection.channel().await;
        let name = channel.and_then(|id| {
            client
                .voice_channels(guild)
                .into_iter()
                .find(|summary| summary.id == id)
                .map(|summary| summary.name)
        });
        log::info!(
            "Leaving voice channel {} in guild {guild}",
            name.as_deref().unwrap_or("<unknown>")
        );

        connection.destroy().await.map_err(ActionError::Teardown)?;
        Ok(true)
    }
}

/// Exemplar dialogues where the second speaker leaves voice.
pub fn examples() -> Vec<Vec<ActionExample>> {
    let dialogue = |prompt: &str, reply: &str, prompt_action: bool| {
        let mut first = Content::text(prompt);
        if prompt_action {
            first = first.with_action(NAME);
        }
        vec![
            ActionExample::new("{{user1}}", first),
            ActionExample::new("{{user2}}", Content::text(reply).with_action(NAME)),
        ]
    };

    vec![
        dialogue("Hey {{user2}} please leave the voice channel", "Sure", false),
        dialogue(
            "I have to go now but thanks for the chat",
            "You too, talk to you later",
            false,
        ),
        dialogue(
            "Great call everyone, hopping off now",
            "Agreed, I'll hop off too",
            true,
        ),
        dialogue(
            "Hey {{user2}} I need you to step away from the voice chat for a bit",
            "No worries, I'll leave the voice channel",
            false,
        ),
        dialogue(
            "{{user2}}, I think we covered everything, you can leave the voice chat now",
            "Sounds good, see you both later",
            false,
        ),
        dialogue("leave voice {{user2}}", "ok leaving", false),
        dialogue("plz leave the voice chat {{user2}}", "aight im out", false),
        dialogue("yo {{user2}} gtfo the vc", "sorry, talk to you later", false),
    ]
}
