pub mod leave_voice;

pub use leave_voice::LeaveVoice;

use crate::{action::Action, voice::VoicePlatform};

/// Actions the agent considers for every incoming message.
pub fn actions<P: VoicePlatform + 'static>() -> Vec<Box<dyn Action<P>>> {
    vec![Box::new(LeaveVoice)]
}
