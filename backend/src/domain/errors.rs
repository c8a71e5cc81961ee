//! Error taxonomy shared by every domain operation.

use std::fmt;
use thiserror::Error;

/// Kind of record an operation failed to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    User,
    Category,
    PaymentMethod,
    Expense,
    Budget,
    SavingsGoal,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::User => "User",
            RecordKind::Category => "Category",
            RecordKind::PaymentMethod => "Payment method",
            RecordKind::Expense => "Expense",
            RecordKind::Budget => "Budget",
            RecordKind::SavingsGoal => "Savings goal",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not authenticated")]
    Unauthenticated,
    /// Missing and foreign-owned records are reported identically
    #[error("{0} not found")]
    NotFound(RecordKind),
    #[error("{0}")]
    Conflict(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    /// Short machine-readable label for the error class
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Unauthenticated => "unauthenticated",
            DomainError::NotFound(_) => "not_found",
            DomainError::Conflict(_) => "conflict",
            DomainError::Validation(_) => "validation",
            DomainError::Storage(_) => "storage",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
