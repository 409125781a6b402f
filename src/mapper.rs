//! Normalizes remote failures into the canonical error taxonomy.
//!
//! Classification, in priority order:
//! 1. Explicit rejection → `ServerError` carrying the rejection message
//! 2. Transport failure (any `io::Error` in the cause chain) → `NetworkError`
//! 3. Cancellation → not mapped, returned as [`Cancelled`]
//! 4. Anything else → `Unknown` with the full cause chain as detail

use crate::domain::ValidationError;
use crate::remote::RemoteFailure;

/// A validation attempt was superseded or abandoned. Not an error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("validation attempt was cancelled")]
pub struct Cancelled;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultMapper;

impl ResultMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, failure: RemoteFailure) -> Result<ValidationError, Cancelled> {
        map_failure(failure)
    }
}

pub fn map_failure(failure: RemoteFailure) -> Result<ValidationError, Cancelled> {
    match failure {
        RemoteFailure::Rejected { message } => Ok(ValidationError::ServerError { message }),
        RemoteFailure::Transport(_) => Ok(ValidationError::NetworkError),
        RemoteFailure::Cancelled => Err(Cancelled),
        RemoteFailure::Other(err) => {
            if err.chain().any(|cause| cause.is::<Cancelled>()) {
                return Err(Cancelled);
            }
            if err.chain().any(|cause| cause.is::<std::io::Error>()) {
                return Ok(ValidationError::NetworkError);
            }
            Ok(ValidationError::Unknown {
                detail: format!("{:#}", err),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io;

    #[test]
    fn test_rejection_becomes_server_error() {
        let mapped = map_failure(RemoteFailure::Rejected {
            message: "Invalid input detected".to_string(),
        });
        assert_eq!(
            mapped,
            Ok(ValidationError::ServerError {
                message: "Invalid input detected".to_string()
            })
        );
    }

    #[test]
    fn test_transport_becomes_network_error() {
        let failure = RemoteFailure::Transport(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert_eq!(map_failure(failure), Ok(ValidationError::NetworkError));
    }

    #[test]
    fn test_cancellation_is_not_mapped() {
        assert_eq!(map_failure(RemoteFailure::Cancelled), Err(Cancelled));
    }

    #[test]
    fn test_wrapped_cancellation_is_not_mapped() {
        let err = anyhow::Error::new(Cancelled).context("while validating");
        assert_eq!(map_failure(RemoteFailure::Other(err)), Err(Cancelled));
    }

    #[test]
    fn test_io_error_in_chain_is_network_error() {
        let err: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        let err = err.context("sending request").unwrap_err();
        assert_eq!(
            map_failure(RemoteFailure::Other(err)),
            Ok(ValidationError::NetworkError)
        );
    }

    #[test]
    fn test_unknown_keeps_full_detail() {
        let err = anyhow::anyhow!("bad payload").context("decoding reply");
        let mapped = map_failure(RemoteFailure::Other(err)).unwrap();
        match mapped {
            ValidationError::Unknown { detail } => {
                assert!(detail.contains("decoding reply"));
                assert!(detail.contains("bad payload"));
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn test_mapper_struct_delegates() {
        let mapper = ResultMapper::new();
        assert_eq!(mapper.map(RemoteFailure::Cancelled), Err(Cancelled));
    }
}
