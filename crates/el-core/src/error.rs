use std::fmt::{Display, Formatter};
use std::result;

use thiserror::Error;

/// Error raised by a member while it executes.
pub type Thrown = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What kind of member a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
}

impl Display for MemberKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKind::Field => write!(f, "field"),
            MemberKind::Method => write!(f, "method"),
            MemberKind::Constructor => write!(f, "constructor"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ElError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{message}")]
    MemberNotFound {
        kind: MemberKind,
        type_name: String,
        member: String,
        message: String,
    },
    #[error("{message}")]
    NotWritable {
        type_name: String,
        member: String,
        message: String,
    },
    #[error("{message}")]
    InvocationFailure {
        type_name: String,
        member: String,
        message: String,
        #[source]
        cause: Thrown,
    },
    #[error("Generic error: {0}")]
    Generic(String),
}

impl ElError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ElError::InvalidArgument(message.into())
    }

    /// Name of the type the failing access targeted, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ElError::MemberNotFound { type_name, .. }
            | ElError::NotWritable { type_name, .. }
            | ElError::InvocationFailure { type_name, .. } => Some(type_name),
            ElError::InvalidArgument(_) | ElError::Generic(_) => None,
        }
    }

    /// Name of the field, method or constructor the failing access targeted.
    pub fn member(&self) -> Option<&str> {
        match self {
            ElError::MemberNotFound { member, .. }
            | ElError::NotWritable { member, .. }
            | ElError::InvocationFailure { member, .. } => Some(member),
            ElError::InvalidArgument(_) | ElError::Generic(_) => None,
        }
    }

    /// The error thrown by an invoked member.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            ElError::InvocationFailure { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }

    pub fn is_member_not_found(&self) -> bool {
        matches!(self, ElError::MemberNotFound { .. })
    }
}

pub type Result<T> = result::Result<T, ElError>;

impl From<serde_json::Error> for ElError {
    fn from(e: serde_json::Error) -> Self {
        ElError::Generic(e.to_string())
    }
}
