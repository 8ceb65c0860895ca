use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use storage::models::ClaimClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sheets,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sheets" => Ok(Self::Sheets),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown STORE_BACKEND '{}', expected 'sheets' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub backend: StoreBackend,
    pub spreadsheet_id: String,
    pub credentials_path: PathBuf,
    pub sheets_api_base: String,
    pub sheets_timeout: Duration,
    pub memory_seed_file: Option<PathBuf>,
    pub claim_utc_offset: Option<FixedOffset>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let backend = match var("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::Sheets,
        };

        let spreadsheet_id = var("SPREADSHEET_ID").unwrap_or_default();
        if backend == StoreBackend::Sheets && spreadsheet_id.is_empty() {
            bail!("Cannot load SPREADSHEET_ID env variable");
        }

        let claim_utc_offset = var("CLAIM_UTC_OFFSET")
            .map(|value| ClaimClock::parse_offset(&value).map_err(anyhow::Error::msg))
            .transpose()
            .context("CLAIM_UTC_OFFSET must look like +05:30")?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("PORT must be a number")?,
            backend,
            spreadsheet_id,
            credentials_path: var("GOOGLE_APPLICATION_CREDENTIALS")
                .unwrap_or_else(|| "credentials.json".to_string())
                .into(),
            sheets_api_base: var("SHEETS_API_BASE")
                .unwrap_or_else(|| "https://sheets.googleapis.com".to_string()),
            sheets_timeout: Duration::from_secs(
                var("SHEETS_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("SHEETS_TIMEOUT_SECS must be a number of seconds")?,
            ),
            memory_seed_file: var("MEMORY_SEED_FILE").map(PathBuf::from),
            claim_utc_offset,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn claim_clock(&self) -> ClaimClock {
        match self.claim_utc_offset {
            Some(offset) => ClaimClock::with_offset(offset),
            None => ClaimClock::local(),
        }
    }
}
