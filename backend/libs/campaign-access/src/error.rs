//! Error types for campaign access

use std::time::Duration;
use thiserror::Error;
use tonic::{Code, Status};

/// Classification of a remote collaborator failure.
///
/// Transport status codes are mapped here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    NotFound,
    PermissionDenied,
    Unauthenticated,
    InvalidArgument,
    Unavailable,
    Internal,
}

impl RemoteErrorKind {
    pub fn from_status(status: &Status) -> Self {
        match status.code() {
            Code::NotFound => RemoteErrorKind::NotFound,
            Code::PermissionDenied => RemoteErrorKind::PermissionDenied,
            Code::Unauthenticated => RemoteErrorKind::Unauthenticated,
            Code::InvalidArgument
            | Code::FailedPrecondition
            | Code::OutOfRange
            | Code::AlreadyExists => RemoteErrorKind::InvalidArgument,
            Code::Unavailable
            | Code::DeadlineExceeded
            | Code::ResourceExhausted
            | Code::Aborted
            | Code::Cancelled => RemoteErrorKind::Unavailable,
            _ => RemoteErrorKind::Internal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteErrorKind::NotFound => "not_found",
            RemoteErrorKind::PermissionDenied => "permission_denied",
            RemoteErrorKind::Unauthenticated => "unauthenticated",
            RemoteErrorKind::InvalidArgument => "invalid_argument",
            RemoteErrorKind::Unavailable => "unavailable",
            RemoteErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AccessError {
    /// The remote returned a page token it had already handed out
    #[error("{operation}: repeated page token {token:?}")]
    RepeatedPageToken { operation: String, token: String },

    #[error("{operation} failed ({kind}): {}", .source.message())]
    Remote {
        operation: String,
        kind: RemoteErrorKind,
        #[source]
        source: Status,
    },

    #[error("identity resolution failed ({kind}): {}", .source.message())]
    Identity {
        kind: RemoteErrorKind,
        #[source]
        source: Status,
    },

    #[error("identity resolution timed out after {0:?}")]
    IdentityTimeout(Duration),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl AccessError {
    pub fn remote(operation: impl Into<String>, status: Status) -> Self {
        AccessError::Remote {
            operation: operation.into(),
            kind: RemoteErrorKind::from_status(&status),
            source: status,
        }
    }

    pub fn identity(status: Status) -> Self {
        AccessError::Identity {
            kind: RemoteErrorKind::from_status(&status),
            source: status,
        }
    }

    /// Classified kind for remote failures
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            AccessError::Remote { kind, .. } | AccessError::Identity { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True when the failure says nothing about whether access should be
    /// granted. Callers answer "unavailable" for these rather than
    /// "forbidden".
    pub fn is_undecidable(&self) -> bool {
        match self {
            AccessError::RepeatedPageToken { .. } | AccessError::IdentityTimeout(_) => true,
            AccessError::Remote { kind, .. } | AccessError::Identity { kind, .. } => {
                matches!(kind, RemoteErrorKind::Unavailable | RemoteErrorKind::Internal)
            }
            AccessError::InvalidArgument(_) => false,
        }
    }
}

pub type AccessResult<T> = Result<T, AccessError>;
