//! Checks a record before it reaches the ledger.
use core::fmt;

use crate::Record;

/// Why a record was refused. Recoverable: the caller keeps the form open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NameRequired,
    NegativeAmount,
}

impl Rejection {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Rejection::NameRequired => "Name is required.",
            Rejection::NegativeAmount => "Negative values are not allowed.",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validate `record`; the first failing rule wins.
///
/// Only the name and the signs of bill amount, advance and travel allowance
/// are checked. Date, lab, bill number and approval are accepted as-is.
pub fn validate(record: &Record) -> Result<(), Rejection> {
    if record.name.is_empty() {
        return Err(Rejection::NameRequired);
    }
    if record.bill_amount.is_negative()
        || record.advance_given.is_negative()
        || record.travel_allowance.is_negative()
    {
        return Err(Rejection::NegativeAmount);
    }
    Ok(())
}
