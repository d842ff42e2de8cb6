//! The module contains the errors the engine can throw.
//!
//! A rejected record is **not** an error: see [`Rejection`]. The errors below
//! end the current interaction and leave the ledger as it was.
//!
//! - [`InvalidAmount`] thrown when a money string cannot be parsed.
//! - [`SchemaMismatch`] thrown when the ledger file has a foreign header.
//! - [`LedgerBusy`] thrown when another writer holds the ledger lock.
//!
//!  [`Rejection`]: crate::Rejection
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`SchemaMismatch`]: EngineError::SchemaMismatch
//!  [`LedgerBusy`]: EngineError::LedgerBusy
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid approval: {0}")]
    InvalidApproval(String),
    #[error("Ledger schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Ledger busy: {0}")]
    LedgerBusy(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidApproval(a), Self::InvalidApproval(b)) => a == b,
            (Self::SchemaMismatch(a), Self::SchemaMismatch(b)) => a == b,
            (Self::LedgerBusy(a), Self::LedgerBusy(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
