//! Course Advisor Store — dataset loading (JSON / LZMA) and the memoized
//! read-only section catalog.

pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::Catalog;
pub use loader::{extract_records, load_dataset};
pub use types::*;
