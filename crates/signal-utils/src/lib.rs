//! Shared utilities for the signal analysis workspace
//!
//! Currently this is the tracing setup shared by every binary.

pub mod logging;

pub use logging::{DEFAULT_FILTER, init_tracing, init_tracing_with};
