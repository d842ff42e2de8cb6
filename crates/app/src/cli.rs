use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Approval, EntryInput, Money};

#[derive(Parser, Debug)]
#[command(name = "imprest")]
#[command(about = "Imprest account: bill & advance entry with a CSV ledger")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the ledger file path.
    #[arg(long, global = true)]
    pub ledger: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the live values of the derived fields.
    Preview(AmountArgs),
    /// Validate and append a bill & advance entry, then show the ledger.
    Save(SaveArgs),
    /// Show the saved ledger.
    List,
    /// Delete the saved ledger.
    Reset,
}

#[derive(Args, Debug, Clone)]
pub struct AmountArgs {
    #[arg(long, default_value = "0")]
    pub initial_cash: Money,
    #[arg(long, default_value = "0")]
    pub advance_given: Money,
    #[arg(long, default_value = "0")]
    pub bill_amount: Money,
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub travel_allowance: Money,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Entry date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long)]
    pub lab: Option<String>,
    /// Approved, Pending or "Not Required".
    #[arg(long, default_value = "Approved")]
    pub approval: Approval,
    #[arg(long, default_value = "")]
    pub bill_number: String,
    #[command(flatten)]
    pub amounts: AmountArgs,
    #[arg(long, default_value = "0")]
    pub payment_return_from: Money,
    #[arg(long, default_value = "0")]
    pub payment_return_to: Money,
    /// Supplier name & items.
    #[arg(long)]
    pub remarks: Option<String>,
}

impl AmountArgs {
    pub fn into_input(self, date: NaiveDate) -> EntryInput {
        let mut input = EntryInput::new(date);
        input.initial_cash = self.initial_cash;
        input.advance_given = self.advance_given;
        input.bill_amount = self.bill_amount;
        input.travel_allowance = self.travel_allowance;
        input
    }
}

impl SaveArgs {
    pub fn into_input(self, today: NaiveDate) -> EntryInput {
        let mut input = self.amounts.into_input(self.date.unwrap_or(today));
        input.name = self.name;
        input.lab = self.lab;
        input.approval = self.approval;
        input.bill_number = self.bill_number;
        input.payment_return_from = self.payment_return_from;
        input.payment_return_to = self.payment_return_to;
        input.remarks = self.remarks;
        input
    }
}
