//! Utility modules for imageguard

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
