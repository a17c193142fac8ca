//! Utility modules for explog

pub mod logging;

pub use logging::{init_logging, parse_level, try_parse_level, LoggingConfig};
