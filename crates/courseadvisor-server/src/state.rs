//! Shared application state.

use std::sync::Arc;

use courseadvisor_core::{AdvisorConfig, CapabilitySet};
use courseadvisor_runtime::Advisor;
use courseadvisor_store::Catalog;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: AdvisorConfig,
    pub catalog: Arc<Catalog>,
    pub advisor: Advisor,
}

impl AppState {
    /// State over the configured dataset, loaded on first use.
    pub fn new(config: AdvisorConfig, capabilities: CapabilitySet) -> Self {
        let catalog = Arc::new(Catalog::new(config.sections.clone()));
        let advisor = Advisor::new(catalog.clone(), &config).with_capabilities(capabilities);
        Self {
            config,
            catalog,
            advisor,
        }
    }

    /// State around an already-built advisor.
    pub fn with_advisor(config: AdvisorConfig, advisor: Advisor) -> Self {
        Self {
            catalog: advisor.catalog().clone(),
            config,
            advisor,
        }
    }
}
