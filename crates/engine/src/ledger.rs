//! Append-only CSV ledger.
//!
//! The ledger is either **absent** (no file) or **present** (header row plus
//! one row per record, in append order). Appends rewrite the whole file
//! through a sibling temp file and an atomic rename, while holding an
//! exclusive lock file, so concurrent savers cannot drop each other's rows.
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use crate::{EngineError, Record, ResultEngine, record::COLUMNS};

/// Outcome of [`LedgerStore::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    Cleared,
    NothingToReset,
}

/// Handle on one ledger file.
#[derive(Clone, Debug)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Return every stored record in append order; empty if the ledger is absent.
    pub fn load_all(&self) -> ResultEngine<Vec<Record>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("ledger {} absent", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        check_header(reader.headers()?, &self.path)?;

        let records = reader
            .deserialize()
            .collect::<Result<Vec<Record>, csv::Error>>()?;
        tracing::debug!(
            "loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Append `record` and return the new row count.
    pub fn append(&self, record: &Record) -> ResultEngine<usize> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let _lock = LockGuard::acquire(&self.path)?;

        let mut records = self.load_all()?;
        records.push(record.clone());
        self.replace(&records)?;

        tracing::info!(
            "appended record for {} to {} ({} rows)",
            record.name,
            self.path.display(),
            records.len()
        );
        Ok(records.len())
    }

    /// Delete the ledger file if present. An absent ledger is left untouched.
    pub fn reset(&self) -> ResultEngine<ResetOutcome> {
        if !self.exists() {
            return Ok(ResetOutcome::NothingToReset);
        }
        let _lock = LockGuard::acquire(&self.path)?;

        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("ledger {} reset", self.path.display());
                Ok(ResetOutcome::Cleared)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Ok(ResetOutcome::NothingToReset)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write header + `records` to the temp file, then rename it over the ledger.
    fn replace(&self, records: &[Record]) -> ResultEngine<()> {
        let temp_path = sibling(&self.path, "tmp");
        let written = write_records(&temp_path, records);
        if let Err(err) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

fn write_records(path: &Path, records: &[Record]) -> ResultEngine<()> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    let file = writer
        .into_inner()
        .map_err(|err| EngineError::Io(err.into_error()))?;
    file.sync_all()?;
    Ok(())
}

fn check_header(header: &csv::StringRecord, path: &Path) -> ResultEngine<()> {
    if header.iter().eq(COLUMNS.iter().copied()) {
        return Ok(());
    }
    tracing::warn!("ledger {} has an unexpected header", path.display());
    Err(EngineError::SchemaMismatch(format!(
        "{}: expected columns [{}], found [{}]",
        path.display(),
        COLUMNS.join(", "),
        header.iter().collect::<Vec<_>>().join(", ")
    )))
}

/// `data.csv` -> `data.csv.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Exclusive `<ledger>.lock` file, removed on drop.
struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    fn acquire(ledger: &Path) -> ResultEngine<Self> {
        let path = sibling(ledger, "lock");
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                tracing::warn!("ledger lock {} is held", path.display());
                Err(EngineError::LedgerBusy(format!(
                    "{} is held by another writer",
                    path.display()
                )))
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
