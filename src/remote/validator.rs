use async_trait::async_trait;

use crate::cancel::CancelToken;

/// Why a remote validation call did not produce text.
#[derive(Debug, thiserror::Error)]
pub enum RemoteFailure {
    /// The service looked at the input and explicitly refused it.
    #[error("{message}")]
    Rejected { message: String },

    /// The service could not be reached.
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    /// The caller cancelled the call before it resolved.
    #[error("remote call cancelled")]
    Cancelled,

    /// Anything the validator could not classify itself.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A backend that validates text asynchronously.
///
/// Implementations must honor `cancel`: once it fires, the call returns
/// `RemoteFailure::Cancelled` without doing further observable work.
#[async_trait]
pub trait RemoteValidator: Send + Sync {
    /// Validate `text`, returning it unchanged when accepted.
    async fn validate(&self, text: &str, cancel: &CancelToken) -> Result<String, RemoteFailure>;
}
