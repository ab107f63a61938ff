//! Vehicle catalog: typed records, JSON loader and in-memory indexes

pub mod index;
pub mod loader;
pub mod record;

pub use index::CatalogIndex;
pub use loader::{load_catalog, CatalogError};
pub use record::VehicleRecord;
