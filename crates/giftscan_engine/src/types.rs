use std::fmt;

use thiserror::Error;

/// Why an id produced no record. All kinds look the same to the caller of a
/// query; they are kept apart for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    PrivacyMarker,
    OwnerUnresolved,
    Cancelled,
}

impl FailureKind {
    /// Failures of the request itself, as opposed to the page content.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidUrl
                | FailureKind::Network
                | FailureKind::Timeout
                | FailureKind::TooLarge { .. }
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::PrivacyMarker => write!(f, "owner hidden or channel private"),
            FailureKind::OwnerUnresolved => write!(f, "owner unresolved"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
