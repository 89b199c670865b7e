pub mod action;
pub mod actions;
pub mod config;
pub mod discord;
pub mod error;
pub mod state;
pub mod voice;

pub use action::{Action, ActionExample, Applicability, Content, Memory};
pub use config::Config;
pub use error::ActionError;
pub use state::{OriginMessage, State};
