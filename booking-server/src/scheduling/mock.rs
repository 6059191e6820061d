//! Mock scheduling client for development and testing.
//!
//! Loads slot inventories from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{CalendarDate, CentreId, REFERENCE_ZONE, TestType};

use super::error::SchedulingError;
use super::types::{SlotsResponse, SlotsResult, convert_response};

/// Mock scheduling client that serves data from JSON files.
///
/// Expects files named `{CENTRE}.json` (e.g., `leeds-1.json`), each
/// containing a [`SlotsResponse`]. Useful without real provider
/// credentials.
#[derive(Clone)]
pub struct MockSchedulingClient {
    /// Pre-loaded responses, keyed by centre.
    inventories: Arc<RwLock<HashMap<CentreId, SlotsResponse>>>,
}

impl MockSchedulingClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SchedulingError> {
        let data_dir = data_dir.as_ref();
        let mut inventories = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| SchedulingError::ApiError {
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| SchedulingError::ApiError {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Extract the centre id from the filename
            let centre_str =
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| SchedulingError::ApiError {
                        status: 0,
                        message: format!("Invalid filename: {:?}", path),
                    })?;

            let centre = CentreId::parse(centre_str).map_err(|_| SchedulingError::ApiError {
                status: 0,
                message: format!("Invalid centre id in filename: {}", centre_str),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| SchedulingError::ApiError {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            let response: SlotsResponse =
                serde_json::from_str(&json).map_err(|e| SchedulingError::ApiError {
                    status: 0,
                    message: format!("Failed to parse {:?}: {}", path, e),
                })?;

            inventories.insert(centre, response);
        }

        if inventories.is_empty() {
            return Err(SchedulingError::ApiError {
                status: 0,
                message: format!("No mock inventory files found in {:?}", data_dir),
            });
        }

        Ok(Self {
            inventories: Arc::new(RwLock::new(inventories)),
        })
    }

    /// Fetch slots for a centre over a date range.
    ///
    /// Mimics `SchedulingClient::get_slots`: slots are filtered to the
    /// test type and the local-date range, and `kpiIdentifiers` are
    /// returned only when the preferred-date signal is present, matching
    /// the provider's first-fetch behaviour.
    pub async fn get_slots(
        &self,
        centre: &CentreId,
        test_type: TestType,
        date_from: CalendarDate,
        date_to: CalendarDate,
        preferred_date: Option<CalendarDate>,
    ) -> Result<SlotsResult, SchedulingError> {
        let inventories = self.inventories.read().await;

        let inventory = inventories
            .get(centre)
            .ok_or(SchedulingError::CentreNotFound)?;

        let filtered = SlotsResponse {
            slots: inventory
                .slots
                .iter()
                .filter(|slot| {
                    let local: CalendarDate =
                        slot.start_date_time.with_timezone(&REFERENCE_ZONE).date_naive().into();
                    slot.test_type == test_type.as_str() && local >= date_from && local <= date_to
                })
                .cloned()
                .collect(),
            kpi_identifiers: if preferred_date.is_some() {
                inventory.kpi_identifiers.clone()
            } else {
                None
            },
        };

        convert_response(filtered, REFERENCE_ZONE).map_err(|e| SchedulingError::ApiError {
            status: 500,
            message: format!("Failed to convert mock inventory: {}", e),
        })
    }

    /// List centres present in the mock data.
    pub async fn available_centres(&self) -> Vec<CentreId> {
        let inventories = self.inventories.read().await;
        inventories.keys().cloned().collect()
    }

    /// Reload mock data from disk (useful for development).
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), SchedulingError> {
        let new_client = Self::new(data_dir)?;
        let mut inventories = self.inventories.write().await;
        let new_inventories = new_client.inventories.read().await;
        *inventories = new_inventories.clone();
        Ok(())
    }
}
