use std::path::{Path, PathBuf};

pub use error::EngineError;
pub use ledger::{LedgerStore, ResetOutcome};
pub use money::Money;
pub use record::{Approval, COLUMNS, EntryInput, Record};
pub use totals::{Preview, Totals};
pub use validation::{Rejection, validate};

mod error;
mod ledger;
mod money;
mod record;
mod totals;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;

/// Default ledger location, relative to the working directory.
pub const DEFAULT_LEDGER_PATH: &str = "data.csv";

/// How a [`Notice`] should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// User-facing result of a form action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The record was appended; `rows` is the ledger size afterwards.
    Saved { record: Record, rows: usize },
    Rejected(Rejection),
    Reset,
    NothingToReset,
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::Saved { .. } | Notice::Reset => Severity::Success,
            Notice::Rejected(_) => Severity::Error,
            Notice::NothingToReset => Severity::Warning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Saved { .. } => "Data saved successfully!",
            Notice::Rejected(reason) => reason.message(),
            Notice::Reset => "Saved data has been reset!",
            Notice::NothingToReset => "No data to reset.",
        }
    }
}

/// Current content of the ledger, as shown below the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum History {
    Empty,
    Records(Vec<Record>),
}

impl History {
    pub const EMPTY_MESSAGE: &'static str = "No data saved yet.";
    pub const EMPTY_SEVERITY: Severity = Severity::Info;

    pub fn records(&self) -> &[Record] {
        match self {
            History::Empty => &[],
            History::Records(records) => records,
        }
    }
}

/// The entry form's back end: derive, validate, persist, display.
#[derive(Debug)]
pub struct Engine {
    ledger: LedgerStore,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Live values for the four derived fields of a form being filled in.
    pub fn preview(&self, input: &EntryInput) -> ResultEngine<Preview> {
        Preview::of(input)
    }

    /// Derive the totals, validate and append the record.
    ///
    /// A rejected record is reported through [`Notice::Rejected`] and never
    /// touches the ledger. Storage failures and amounts whose totals do not
    /// fit are returned as errors.
    pub fn save(&self, input: EntryInput) -> ResultEngine<Notice> {
        let record = Record::from_input(input)?;

        if let Err(reason) = validate(&record) {
            tracing::warn!("record for '{}' rejected: {reason}", record.name);
            return Ok(Notice::Rejected(reason));
        }

        let rows = self.ledger.append(&record)?;
        Ok(Notice::Saved { record, rows })
    }

    pub fn history(&self) -> ResultEngine<History> {
        if !self.ledger.exists() {
            return Ok(History::Empty);
        }
        let records = self.ledger.load_all()?;
        if records.is_empty() {
            return Ok(History::Empty);
        }
        Ok(History::Records(records))
    }

    pub fn reset(&self) -> ResultEngine<Notice> {
        Ok(match self.ledger.reset()? {
            ResetOutcome::Cleared => Notice::Reset,
            ResetOutcome::NothingToReset => Notice::NothingToReset,
        })
    }
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    ledger_path: Option<PathBuf>,
}

impl EngineBuilder {
    /// Ledger file to use; defaults to [`DEFAULT_LEDGER_PATH`].
    pub fn ledger_path(mut self, path: impl AsRef<Path>) -> EngineBuilder {
        self.ledger_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the engine. Fails if the ledger path names a directory.
    pub fn build(self) -> ResultEngine<Engine> {
        let path = self
            .ledger_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH));
        if path.is_dir() {
            return Err(EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("ledger path {} is a directory", path.display()),
            )));
        }
        tracing::debug!("using ledger {}", path.display());
        Ok(Engine {
            ledger: LedgerStore::new(path),
        })
    }
}
