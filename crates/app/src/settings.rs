//! Settings for the imprest tool.
//!
//! Sources, later ones win: built-in defaults, the optional TOML file
//! (`config/imprest.toml` unless `--config` is given), `IMPREST_*`
//! environment variables, command-line flags.
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/imprest.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ledger_path: String,
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_path: engine::DEFAULT_LEDGER_PATH.to_string(),
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<&str>, ledger_override: Option<&str>) -> Result<Self> {
        let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("IMPREST"))
            .build()?
            .try_deserialize()?;

        if let Some(path) = ledger_override {
            settings.ledger_path = path.to_string();
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load(Some("config/does_not_exist_imprest"), None).unwrap();
        assert_eq!(settings.level, "info");
    }

    #[test]
    fn file_values_are_read_and_flag_wins() {
        let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_settings");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("imprest_settings_test.toml");
        std::fs::write(&path, "ledger_path = \"ledgers/med.csv\"\nlevel = \"debug\"\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let settings = Settings::load(Some(&path), None).unwrap();
        assert_eq!(settings.ledger_path, "ledgers/med.csv");
        assert_eq!(settings.level, "debug");

        let settings = Settings::load(Some(&path), Some("other.csv")).unwrap();
        assert_eq!(settings.ledger_path, "other.csv");
    }
}
