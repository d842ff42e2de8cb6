//! The module contains the `Record` type, one row of the imprest ledger, and
//! `EntryInput`, the raw values collected by the entry form.
use core::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, Totals};

/// Column headers of the ledger file, in storage order.
///
/// Must stay in sync with the field order of [`Record`].
pub const COLUMNS: [&str; 16] = [
    "Date",
    "Name",
    "Lab",
    "Initial Cash in Hand",
    "Approval",
    "Advance Given",
    "Bill Number",
    "Bill Amount",
    "Travel Allowance",
    "Total Cash",
    "Bill/Balance/Pending Payment",
    "Final Settlement",
    "Payment Return From Person",
    "Payment Return To Person",
    "Cash in Hand",
    "Remarks",
];

/// Approval state of a disbursement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Approval {
    #[default]
    Approved,
    Pending,
    #[serde(rename = "Not Required")]
    NotRequired,
}

impl Approval {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Approval::Approved => "Approved",
            Approval::Pending => "Pending",
            Approval::NotRequired => "Not Required",
        }
    }
}

impl fmt::Display for Approval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Approval {
    type Err = EngineError;

    /// Case-insensitive; `-` and `_` are accepted in place of the space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "approved" => Ok(Approval::Approved),
            "pending" => Ok(Approval::Pending),
            "not required" => Ok(Approval::NotRequired),
            _ => Err(EngineError::InvalidApproval(s.trim().to_string())),
        }
    }
}

/// Raw values of the entry form, before any derived field is computed.
///
/// Numeric fields default to zero, like the form widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryInput {
    pub date: NaiveDate,
    pub name: String,
    pub lab: Option<String>,
    pub initial_cash: Money,
    pub approval: Approval,
    pub advance_given: Money,
    pub bill_number: String,
    pub bill_amount: Money,
    pub travel_allowance: Money,
    pub payment_return_from: Money,
    pub payment_return_to: Money,
    pub remarks: Option<String>,
}

impl EntryInput {
    /// Empty form dated `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            name: String::new(),
            lab: None,
            initial_cash: Money::ZERO,
            approval: Approval::default(),
            advance_given: Money::ZERO,
            bill_number: String::new(),
            bill_amount: Money::ZERO,
            travel_allowance: Money::ZERO,
            payment_return_from: Money::ZERO,
            payment_return_to: Money::ZERO,
            remarks: None,
        }
    }

    /// Full totals for the current values.
    pub fn totals(&self) -> ResultEngine<Totals> {
        Totals::calculate(
            self.bill_amount,
            self.advance_given,
            self.travel_allowance,
            self.initial_cash,
        )
    }
}

/// One disbursement entry as stored in the ledger.
///
/// Derived fields are only ever set by [`Record::from_input`] (or read back
/// from the ledger file).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Lab")]
    pub lab: Option<String>,
    #[serde(rename = "Initial Cash in Hand")]
    pub initial_cash: Money,
    #[serde(rename = "Approval")]
    pub approval: Approval,
    #[serde(rename = "Advance Given")]
    pub advance_given: Money,
    #[serde(rename = "Bill Number")]
    pub bill_number: String,
    #[serde(rename = "Bill Amount")]
    pub bill_amount: Money,
    #[serde(rename = "Travel Allowance")]
    pub travel_allowance: Money,
    #[serde(rename = "Total Cash")]
    pub total_cash: Money,
    #[serde(rename = "Bill/Balance/Pending Payment")]
    pub pending: Money,
    #[serde(rename = "Final Settlement")]
    pub settlement: Money,
    #[serde(rename = "Payment Return From Person")]
    pub payment_return_from: Money,
    #[serde(rename = "Payment Return To Person")]
    pub payment_return_to: Money,
    #[serde(rename = "Cash in Hand")]
    pub cash_in_hand: Money,
    #[serde(rename = "Remarks")]
    pub remarks: Option<String>,
}

impl Record {
    /// Builds the record for `input`, attaching the fully computed totals.
    ///
    /// Blank optional text is stored as absent.
    pub fn from_input(input: EntryInput) -> ResultEngine<Self> {
        let totals = input.totals()?;
        Ok(Self {
            date: input.date,
            name: input.name,
            lab: non_blank(input.lab),
            initial_cash: input.initial_cash,
            approval: input.approval,
            advance_given: input.advance_given,
            bill_number: input.bill_number,
            bill_amount: input.bill_amount,
            travel_allowance: input.travel_allowance,
            total_cash: totals.total_cash,
            pending: totals.pending,
            settlement: totals.settlement,
            payment_return_from: input.payment_return_from,
            payment_return_to: input.payment_return_to,
            cash_in_hand: totals.cash_in_hand,
            remarks: non_blank(input.remarks),
        })
    }

    /// Cell texts in [`COLUMNS`] order, as shown in the history table.
    pub fn cells(&self) -> [String; 16] {
        [
            self.date.to_string(),
            self.name.clone(),
            self.lab.clone().unwrap_or_default(),
            self.initial_cash.to_string(),
            self.approval.to_string(),
            self.advance_given.to_string(),
            self.bill_number.clone(),
            self.bill_amount.to_string(),
            self.travel_allowance.to_string(),
            self.total_cash.to_string(),
            self.pending.to_string(),
            self.settlement.to_string(),
            self.payment_return_from.to_string(),
            self.payment_return_to.to_string(),
            self.cash_in_hand.to_string(),
            self.remarks.clone().unwrap_or_default(),
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} bill {} ({}) cash in hand {}",
            self.date, self.name, self.bill_number, self.bill_amount, self.cash_in_hand
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EntryInput {
        let mut input = EntryInput::new(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        input.name = "Asha".to_string();
        input.lab = Some("  ".to_string());
        input.bill_number = "B-17".to_string();
        input.bill_amount = Money::from_major(500);
        input.advance_given = Money::from_major(1000);
        input.initial_cash = Money::from_major(2000);
        input
    }

    #[test]
    fn from_input_attaches_totals() {
        let record = Record::from_input(input()).unwrap();
        assert_eq!(record.total_cash, Money::from_major(500));
        assert_eq!(record.pending, Money::from_major(500));
        assert_eq!(record.settlement, Money::from_major(-500));
        assert_eq!(record.cash_in_hand, Money::from_major(1500));
        assert_eq!(record.lab, None);
    }

    #[test]
    fn approval_parses_loosely() {
        assert_eq!("approved".parse::<Approval>().unwrap(), Approval::Approved);
        assert_eq!(" Pending ".parse::<Approval>().unwrap(), Approval::Pending);
        assert_eq!("not-required".parse::<Approval>().unwrap(), Approval::NotRequired);
        assert_eq!("Not Required".parse::<Approval>().unwrap(), Approval::NotRequired);
        assert_eq!(
            "maybe".parse::<Approval>(),
            Err(EngineError::InvalidApproval("maybe".to_string()))
        );
    }

    #[test]
    fn cells_follow_column_order() {
        let cells = Record::from_input(input()).unwrap().cells();
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "2024-07-01");
        assert_eq!(cells[4], "Approved");
        assert_eq!(cells[10], "500.00");
        assert_eq!(cells[15], "");
    }
}
