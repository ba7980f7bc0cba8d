//! Testing utilities and mock implementations
//!
//! Mock collaborators (directory, assignment store, notifier, calendar)
//! so routing can be exercised without a document store, graph service,
//! or calendar backend.

pub mod mocks;

pub use mocks::*;
