use std::sync::Arc;

use anyhow::{Context, Result};
use storage::{
    MemorySeed, MemoryTables, SheetsClient, SheetsConfig, Spreadsheet, models::ClaimClock,
    repository::reference::ReferenceRepository,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::config::{Config, StoreBackend};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sheet: Spreadsheet,
    pub clock: ClaimClock,
    claim_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(sheet: Spreadsheet, clock: ClaimClock) -> Self {
        Self {
            sheet,
            clock,
            claim_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        let sheet = match config.backend {
            StoreBackend::Sheets => {
                let client = SheetsClient::connect(SheetsConfig {
                    base_url: config.sheets_api_base.clone(),
                    spreadsheet_id: config.spreadsheet_id.clone(),
                    credentials_path: config.credentials_path.clone(),
                    timeout: config.sheets_timeout,
                })
                .await
                .context("Failed to set up the Google Sheets client")?;
                Spreadsheet::new(client)
            }
            StoreBackend::Memory => {
                let seed = match &config.memory_seed_file {
                    Some(path) => MemorySeed::from_file(path)
                        .await
                        .context("Failed to load the memory seed file")?,
                    None => MemorySeed::default(),
                };
                tracing::warn!(
                    enrollments = seed.enrollments.len(),
                    codes = seed.codes.len(),
                    "Using in-memory spreadsheet, claims are lost on restart"
                );
                Spreadsheet::new(MemoryTables::from_seed(seed))
            }
        };

        log_reference_summary(&sheet).await;

        Ok(Self::new(sheet, config.claim_clock()))
    }

    /// Serializes claim submissions so the claimed check and the appends
    /// cannot interleave between requests.
    pub async fn lock_claims(&self) -> MutexGuard<'_, ()> {
        self.claim_lock.lock().await
    }
}

/// Reads the reference sheets once so a broken spreadsheet shows up in the
/// startup logs rather than on the first submission.
async fn log_reference_summary(sheet: &Spreadsheet) {
    let repo = ReferenceRepository::new(sheet.tables());

    let summary = async {
        let enrollments = repo.valid_enrollments().await?.len();
        let codes = repo.valid_codes().await?.len();
        let multipliers = repo.multipliers().await?.len();
        Ok::<_, storage::StorageError>((enrollments, codes, multipliers))
    };

    match summary.await {
        Ok((enrollments, codes, multipliers)) => {
            if enrollments == 0 || codes == 0 {
                tracing::warn!(enrollments, codes, "Reference sheets are empty, every claim will be rejected");
            } else {
                tracing::info!(enrollments, codes, multipliers, "Reference data loaded");
            }
        }
        Err(e) => tracing::warn!("Could not read reference sheets at startup: {}", e),
    }
}
