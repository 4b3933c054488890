//! Error types for kubeseed

use std::io;
use thiserror::Error;

/// Main error type for kubeseed
#[derive(Error, Debug)]
pub enum SeedError {
    // Control-plane errors
    #[error("endpoints query failed: {0}")]
    Transport(String),

    #[error("endpoints query rejected: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed endpoints response: {0}")]
    MalformedResponse(String),

    // Credential errors
    #[error("in-cluster credentials unavailable: {0}")]
    Credentials(String),

    // Fallback errors
    #[error("cannot resolve configured seed {host:?}: {source}")]
    UnresolvableSeed { host: String, source: io::Error },
}

impl SeedError {
    /// Errors that must stop the embedding process instead of degrading
    /// the seed list
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnresolvableSeed { .. })
    }

    /// Errors the resolver recovers from by switching to the fallback list
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}

/// Result type alias for kubeseed
pub type Result<T> = std::result::Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_fallback_resolution_is_fatal() {
        let fatal = SeedError::UnresolvableSeed {
            host: "not-a-real-host".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such host"),
        };
        assert!(fatal.is_fatal());

        for recoverable in [
            SeedError::Transport("connection refused".to_string()),
            SeedError::Api {
                status: 404,
                message: "endpoints \"cassandra\" not found".to_string(),
            },
            SeedError::MalformedResponse("endpoints response has no subsets".to_string()),
            SeedError::Credentials("token not mounted".to_string()),
        ] {
            assert!(recoverable.is_recoverable(), "{}", recoverable);
        }
    }
}
