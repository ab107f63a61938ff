//! Catalog loader
//!
//! Reads the catalog JSON file into typed records. The loader performs no
//! normalization; key normalization is the index builder's job. Both failure
//! modes are fatal at startup: the process must never serve queries from a
//! partial catalog.

use super::record::VehicleRecord;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Catalog load failures
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source file could not be read at all
    #[error("Catalog source unreadable: {0}")]
    Source(#[from] std::io::Error),

    /// The source was readable but is not a JSON array of flat records
    #[error("Catalog format invalid: {0}")]
    Format(#[from] serde_json::Error),
}

/// Load the vehicle catalog from a JSON file
pub fn load_catalog(path: &Path) -> Result<Vec<VehicleRecord>, CatalogError> {
    let data = fs::read_to_string(path)?;
    let records: Vec<VehicleRecord> = serde_json::from_str(&data)?;
    info!("Loaded {} vehicle records from {}", records.len(), path.display());
    Ok(records)
}
