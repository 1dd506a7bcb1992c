//! Resolvers — record normalization, time bucketing, and the query engine.
//!
//! Every capability is a pure read over the shared record set: iteration
//! follows dataset order and results come back in first-match order.

pub mod engine;
pub mod normalize;
pub mod time_bucket;
pub mod types;

pub use engine::QueryEngine;
pub use normalize::NormalizedSection;
pub use time_bucket::{ClockTime, TimeBucket};
pub use types::*;
