pub mod cache;
pub mod config;
pub mod error;
pub mod records;
pub mod traits;
pub mod types;

pub use cache::DiskCache;
pub use config::{load_config, Config, QueryFilter};
pub use error::{ErfgoedError, Result};
pub use records::{DetailRecord, SummaryRecord};
pub use traits::{ConceptResolver, InventorySource};
pub use types::*;
