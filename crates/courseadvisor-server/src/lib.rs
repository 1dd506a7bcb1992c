//! Course Advisor server — HTTP API and interactive chat shell over the
//! section catalog.

pub mod repl;
pub mod routes;
pub mod state;

pub use state::AppState;
