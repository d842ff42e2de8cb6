//! Derived fields of a disbursement.
//!
//! [`Totals::calculate`] is the only formula used for stored records.
//! [`Preview`] is what the form shows while the user is still typing: until
//! both the bill amount and the advance are entered it stays at zero and
//! cash in hand mirrors the initial cash.
use core::fmt;

use crate::{EngineError, EntryInput, Money, ResultEngine};

/// The four computed fields of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    /// Bill amount plus travel allowance.
    pub total_cash: Money,
    /// Advance given minus total cash. Negative means over-disbursed.
    pub pending: Money,
    /// Bill amount minus advance given plus travel allowance.
    pub settlement: Money,
    /// Initial cash in hand minus total cash.
    pub cash_in_hand: Money,
}

impl Totals {
    /// Fails with [`EngineError::InvalidAmount`] if any field leaves the `i64` range.
    pub fn calculate(
        bill_amount: Money,
        advance_given: Money,
        travel_allowance: Money,
        initial_cash: Money,
    ) -> ResultEngine<Self> {
        let too_large = || EngineError::InvalidAmount("amount too large".to_string());

        let total_cash = bill_amount
            .checked_add(travel_allowance)
            .ok_or_else(too_large)?;
        Ok(Self {
            total_cash,
            pending: advance_given.checked_sub(total_cash).ok_or_else(too_large)?,
            settlement: bill_amount
                .checked_sub(advance_given)
                .and_then(|v| v.checked_add(travel_allowance))
                .ok_or_else(too_large)?,
            cash_in_hand: initial_cash.checked_sub(total_cash).ok_or_else(too_large)?,
        })
    }
}

/// Live preview of the derived fields for a form being filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preview {
    pub totals: Totals,
    /// `false` while bill amount or advance given is still zero.
    pub complete: bool,
}

impl Preview {
    pub fn of(input: &EntryInput) -> ResultEngine<Self> {
        if input.bill_amount.is_zero() || input.advance_given.is_zero() {
            return Ok(Self {
                totals: Totals {
                    cash_in_hand: input.initial_cash,
                    ..Totals::default()
                },
                complete: false,
            });
        }

        Ok(Self {
            totals: input.totals()?,
            complete: true,
        })
    }

    /// Labelled lines in the order the form displays them.
    pub fn lines(&self) -> [(&'static str, Money); 4] {
        [
            ("Bill/Balance/Pending Payment", self.totals.pending),
            ("Final Settlement", self.totals.settlement),
            (
                "Total Cash (Bill Amount + Travel Allowance)",
                self.totals.total_cash,
            ),
            (
                "Cash in Hand (Initial Cash in Hand - Total Cash)",
                self.totals.cash_in_hand,
            ),
        ]
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, amount) in self.lines() {
            writeln!(f, "{label}: {amount}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn m(major: i64) -> Money {
        Money::from_major(major)
    }

    fn input(bill: i64, advance: i64, travel: i64, initial: i64) -> EntryInput {
        let mut input = EntryInput::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        input.bill_amount = m(bill);
        input.advance_given = m(advance);
        input.travel_allowance = m(travel);
        input.initial_cash = m(initial);
        input
    }

    #[test]
    fn calculate_without_travel_allowance() {
        let totals = Totals::calculate(m(500), m(1000), m(0), m(2000)).unwrap();
        assert_eq!(
            totals,
            Totals {
                total_cash: m(500),
                pending: m(500),
                settlement: m(-500),
                cash_in_hand: m(1500),
            }
        );
    }

    #[test]
    fn calculate_with_travel_allowance() {
        let totals = Totals::calculate(m(500), m(300), m(120), m(1000)).unwrap();
        assert_eq!(totals.total_cash, m(620));
        assert_eq!(totals.pending, m(-320));
        assert_eq!(totals.settlement, m(320));
        assert_eq!(totals.cash_in_hand, m(380));
    }

    #[test]
    fn calculate_holds_across_a_grid() {
        for b in [0, 1, 250, 999] {
            for a in [0, 7, 1000] {
                for t in [0, 3, 80] {
                    for i in [0, 5000] {
                        let totals = Totals::calculate(m(b), m(a), m(t), m(i)).unwrap();
                        assert_eq!(totals.total_cash, m(b + t));
                        assert_eq!(totals.pending, m(a - (b + t)));
                        assert_eq!(totals.settlement, m(b - a + t));
                        assert_eq!(totals.cash_in_hand, m(i - (b + t)));
                    }
                }
            }
        }
    }

    #[test]
    fn calculate_is_exact_for_fractions() {
        let totals = Totals::calculate(
            "0.10".parse().unwrap(),
            "0.30".parse().unwrap(),
            "0.20".parse().unwrap(),
            "1.00".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(totals.total_cash, "0.30".parse::<Money>().unwrap());
        assert_eq!(totals.pending, Money::ZERO);
        assert_eq!(totals.cash_in_hand, "0.70".parse::<Money>().unwrap());
    }

    #[test]
    fn calculate_reports_overflow_instead_of_wrapping() {
        let huge: Money = "90000000000000000".parse().unwrap();
        assert_eq!(
            Totals::calculate(huge, Money::ZERO, huge, Money::ZERO),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );

        let near_max = Money::new(i64::MAX - 100);
        let totals =
            Totals::calculate(near_max, Money::ZERO, Money::new(100), Money::ZERO).unwrap();
        assert_eq!(totals.total_cash, Money::new(i64::MAX));
        assert_eq!(totals.cash_in_hand, Money::new(-i64::MAX));

        let pending_underflow =
            Totals::calculate(Money::ZERO, Money::new(i64::MIN), Money::new(1), Money::ZERO);
        assert!(pending_underflow.is_err());
    }

    #[test]
    fn preview_is_zero_until_bill_and_advance_are_entered() {
        let preview = Preview::of(&input(0, 1000, 50, 2000)).unwrap();
        assert!(!preview.complete);
        assert_eq!(preview.totals.total_cash, Money::ZERO);
        assert_eq!(preview.totals.pending, Money::ZERO);
        assert_eq!(preview.totals.settlement, Money::ZERO);
        assert_eq!(preview.totals.cash_in_hand, m(2000));

        let preview = Preview::of(&input(500, 0, 0, 300)).unwrap();
        assert!(!preview.complete);
        assert_eq!(preview.totals.cash_in_hand, m(300));
    }

    #[test]
    fn preview_matches_calculate_when_complete() {
        let input = input(500, 1000, 0, 2000);
        let preview = Preview::of(&input).unwrap();
        assert!(preview.complete);
        assert_eq!(preview.totals, input.totals().unwrap());
    }

    #[test]
    fn preview_renders_form_lines() {
        let text = Preview::of(&input(500, 1000, 0, 2000))
            .unwrap()
            .to_string();
        assert_eq!(
            text,
            "Bill/Balance/Pending Payment: 500.00\n\
             Final Settlement: -500.00\n\
             Total Cash (Bill Amount + Travel Allowance): 500.00\n\
             Cash in Hand (Initial Cash in Hand - Total Cash): 1500.00\n"
        );
    }
}
