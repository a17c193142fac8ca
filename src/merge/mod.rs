//! Driver around the extractor: collect log files, order them by their parameters,
//! and merge their contents into one annotated stream.

pub mod check;
pub mod collector;
pub mod error;
pub mod merger;

pub use check::{CheckReport, GroupReport, RepetitionChecker};
pub use collector::{LogCollector, LogFile};
pub use error::MergeError;
pub use merger::{format_prefix, ExtractedLog, LogMerger, MergeOptions, MergeSummary, TemplateSource};
