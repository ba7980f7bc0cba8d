//! Observability for the routing core
//!
//! Structured logging via the tracing crate. Routing decisions log the
//! selected agent, its load, and the decision source so degraded routing
//! (expertise lookup down, stale roster) is visible in aggregation.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};
