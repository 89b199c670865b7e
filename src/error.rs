use thiserror::Error;

/// Failures an action surfaces to whatever invoked it.
///
/// Nothing here is retried. "Nothing to do" outcomes are not errors and are
/// reported through [`crate::Applicability`] or a successful handler result.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("State is not available.")]
    MissingState,
    #[error("Discord client is not available in the state.")]
    MissingClient,
    #[error("Discord message is not available in the state.")]
    MissingMessage,
    #[error("Could not tear down voice connection: {0:#}")]
    Teardown(anyhow::Error),
}
