//! Runtime configuration loaded from the environment (and `.env`).

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::defaults::DEFAULT_SETTINGS;
use super::validation::validate_setting;

/// Where issued numbers are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LedgerBackend {
    /// Single JSON document, rewritten on every issuance.
    Json,
    /// SQLite database with transactional inserts.
    Sqlite,
}

impl LedgerBackend {
    fn parse(value: &str) -> Self {
        match value {
            "sqlite" => Self::Sqlite,
            _ => Self::Json,
        }
    }

    /// Ledger location used when none is configured.
    pub fn default_path(self) -> &'static Path {
        match self {
            Self::Json => Path::new(issuance_ledger::DEFAULT_LEDGER_PATH),
            Self::Sqlite => Path::new("data_store.db"),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ledger_path: Option<PathBuf>,
    pub ledger_backend: LedgerBackend,
    pub output_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    pub default_label: String,
    pub scale: u32,
    pub border: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ledger_path: None,
            ledger_backend: LedgerBackend::Json,
            output_dir: PathBuf::from("outputs"),
            font_path: None,
            default_label: "Demo".into(),
            scale: 2,
            border: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset or empty keys. Every value is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> Result<String, anyhow::Error> {
            let def = DEFAULT_SETTINGS
                .get(key)
                .ok_or_else(|| anyhow::anyhow!("unknown setting key: {key}"))?;
            let value = lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| def.default.to_string());
            validate_setting(key, &value)
                .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
            Ok(value)
        };

        let non_empty_path = |value: String| (!value.is_empty()).then(|| PathBuf::from(value));

        Ok(Self {
            ledger_path: non_empty_path(g("BARCODE_LEDGER_PATH")?),
            ledger_backend: LedgerBackend::parse(&g("BARCODE_LEDGER_BACKEND")?),
            output_dir: PathBuf::from(g("BARCODE_OUTPUT_DIR")?),
            font_path: non_empty_path(g("BARCODE_FONT_PATH")?),
            default_label: g("BARCODE_DEFAULT_LABEL")?,
            scale: parse_u32(&g("BARCODE_SCALE")?, 2),
            border: parse_u32(&g("BARCODE_BORDER")?, 10),
        })
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        ledger_path: Option<PathBuf>,
        backend: Option<LedgerBackend>,
    ) -> Self {
        if let Some(path) = ledger_path {
            self.ledger_path = Some(path);
        }
        if let Some(backend) = backend {
            self.ledger_backend = backend;
        }
        self
    }

    /// Effective ledger location for the selected backend.
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger_path
            .clone()
            .unwrap_or_else(|| self.ledger_backend.default_path().to_path_buf())
    }
}

fn parse_u32(s: &str, default: u32) -> u32 {
    s.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, anyhow::Error> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.ledger_backend, LedgerBackend::Json);
        assert_eq!(config.ledger_path(), PathBuf::from("data_store.json"));
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert_eq!(config.default_label, "Demo");
        assert!(config.font_path.is_none());
        assert_eq!(config.scale, 2);
        assert_eq!(config.border, 10);
    }

    #[test]
    fn environment_values_are_used() {
        let config = load(&[
            ("BARCODE_LEDGER_BACKEND", "sqlite"),
            ("BARCODE_OUTPUT_DIR", "/tmp/sheets"),
            ("BARCODE_DEFAULT_LABEL", "Shelf"),
            ("BARCODE_SCALE", "3"),
        ])
        .unwrap();
        assert_eq!(config.ledger_backend, LedgerBackend::Sqlite);
        assert_eq!(config.ledger_path(), PathBuf::from("data_store.db"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/sheets"));
        assert_eq!(config.default_label, "Shelf");
        assert_eq!(config.scale, 3);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = load(&[("BARCODE_LEDGER_BACKEND", "csv")]).unwrap_err();
        assert!(err.to_string().contains("BARCODE_LEDGER_BACKEND"));
        assert!(load(&[("BARCODE_SCALE", "0")]).is_err());
    }

    #[test]
    fn overrides_win() {
        let config = load(&[("BARCODE_LEDGER_PATH", "a.json")])
            .unwrap()
            .with_overrides(Some(PathBuf::from("b.db")), Some(LedgerBackend::Sqlite));
        assert_eq!(config.ledger_path(), PathBuf::from("b.db"));
        assert_eq!(config.ledger_backend, LedgerBackend::Sqlite);
    }
}
