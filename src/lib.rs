//! explog - parameter extraction and merging for experiment logs
//!
//! Experiment runners commonly encode the parameters of a run in the name of its log
//! file: `run_PSI_1.5_NZERO_3_R_2.log` is repetition 2 of the run with `PSI=1.5` and
//! `NZERO=3`. This crate recovers those parameters and uses them to combine many such
//! logs into a single stream, one line per log line, prefixed with the run's values.
//!
//! # Project Structure
//!
//! - [`extraction`]: the `NAME_VALUE` grammar, [`ParameterExtractor`] and its results
//! - [`merge`]: file collection, ordering, merging and the repetition structure check
//! - [`fs`]: file system abstraction with a real and an in-memory implementation
//! - [`cli`]: command-line definitions, handlers and report formatting
//! - [`config`]: environment-driven configuration
//! - [`util`]: logging setup
//!
//! # Example
//!
//! ```
//! use explog::ParameterExtractor;
//!
//! let extractor = ParameterExtractor::new("run_PSI_1.5_NZERO_3_R_2.log");
//! let mapping = extractor.parameters("exp_PSI_1.0_NZERO_2_R_4.log", true).unwrap();
//!
//! assert_eq!(mapping.get("NZERO"), Some(2.0));
//! assert_eq!(mapping.repetition(), Some(4.0));
//! ```

pub mod cli;
pub mod config;
pub mod extraction;
pub mod fs;
pub mod merge;
pub mod util;

pub use config::{ConfigError, ExplogConfig};
pub use extraction::{
    ExtractionError, ParameterExtractor, ParameterMapping, ParameterTemplate, ParameterToken,
};
pub use merge::{LogCollector, LogMerger, MergeError, MergeOptions, RepetitionChecker};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_explog() {
        assert_eq!(NAME, "explog");
    }
}
