//! Course Advisor Core — error taxonomy, configuration, capability catalogue.

pub mod capabilities;
pub mod config;
pub mod error;

pub use capabilities::{Capability, CapabilitySet};
pub use config::{AdvisorConfig, SectionsConfig};
pub use error::{Error, Result};
