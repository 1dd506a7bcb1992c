//! Memoized, read-only section catalog.

use std::sync::Arc;

use courseadvisor_core::{Result, SectionsConfig};
use once_cell::sync::OnceCell;
use tracing::{debug, error};

use crate::loader;
use crate::types::{DatasetInfo, Section};

/// Lazily loads the dataset on first access and hands out the shared record
/// set for the rest of the process lifetime.
///
/// A failed load is not memoized: each access after a failure reports the
/// load error again.
pub struct Catalog {
    config: SectionsConfig,
    sections: OnceCell<Arc<Vec<Section>>>,
    info: OnceCell<DatasetInfo>,
}

impl Catalog {
    /// Catalog that loads from `config` on first access.
    pub fn new(config: SectionsConfig) -> Self {
        Self {
            config,
            sections: OnceCell::new(),
            info: OnceCell::new(),
        }
    }

    /// Catalog over an in-memory record set (tests, embedding callers).
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let catalog = Self::new(SectionsConfig::default());
        let _ = catalog.sections.set(Arc::new(sections));
        catalog
    }

    /// The full record set, loading it if this is the first access.
    pub fn sections(&self) -> Result<Arc<Vec<Section>>> {
        self.sections
            .get_or_try_init(|| {
                debug!("Loading sections dataset");
                let loaded = loader::load_dataset(&self.config).map_err(|e| {
                    error!("Failed to load sections dataset: {}", e);
                    e
                })?;
                let _ = self.info.set(loaded.info);
                Ok(Arc::new(loaded.sections))
            })
            .cloned()
    }

    /// Whether the dataset has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.sections.get().is_some()
    }

    /// Load diagnostics; `None` before the first load or for in-memory catalogs.
    pub fn info(&self) -> Option<&DatasetInfo> {
        self.info.get()
    }
}
