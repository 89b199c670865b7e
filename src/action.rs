use serenity::async_trait;

use crate::{error::ActionError, state::State};

/// Message content as seen by the agent runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Content {
    pub text: String,
    /// Action the speaker triggered with this message, if any.
    pub action: Option<String>,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// An incoming message handed to actions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Memory {
    pub content: Content,
}

impl Memory {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: Content::text(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.content.text
    }
}

/// One turn of an exemplar dialogue.
///
/// `user` is a template placeholder such as `{{user1}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionExample {
    pub user: String,
    pub content: Content,
}

impl ActionExample {
    pub fn new(user: impl Into<String>, content: Content) -> Self {
        Self {
            user: user.into(),
            content,
        }
    }
}

/// Outcome of validating an action against a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Applicable,
    NotApplicable,
    /// The action cannot judge this context, e.g. there is no text message.
    Indeterminate,
}

impl Applicability {
    pub fn is_applicable(self) -> bool {
        matches!(self, Applicability::Applicable)
    }
}

impl From<bool> for Applicability {
    fn from(value: bool) -> Self {
        if value {
            Applicability::Applicable
        } else {
            Applicability::NotApplicable
        }
    }
}

/// A conversational action the agent can take.
///
/// `validate` is a pure predicate; `handle` performs the side effect and is
/// only called after validation returned [`Applicability::Applicable`], or
/// when a user invokes the action explicitly.
#[async_trait]
pub trait Action<P: Send + Sync>: Send + Sync {
    fn name(&self) -> &'static str;

    fn similes(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    /// When the agent should pick this action, in plain words.
    fn condition(&self) -> &'static str;

    /// Exemplar dialogues, for documentation and offline evaluation.
    fn examples(&self) -> Vec<Vec<ActionExample>>;

    fn validate(
        &self,
        memory: &Memory,
        state: Option<&State<'_, P>>,
    ) -> Result<Applicability, ActionError>;

    async fn handle(&self, memory: &Memory, state: &State<'_, P>) -> Result<bool, ActionError>;
}
