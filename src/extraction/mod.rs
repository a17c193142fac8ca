//! Parameter extraction from experiment log filenames
//!
//! Filenames encode run parameters as `NAME_VALUE` tokens (`PSI_1.5`, `NZERO_3`) and
//! optionally a repetition index `R_<n>`. A [`ParameterExtractor`] derives the set of
//! expected names from one prototype filename and then turns any filename of the same
//! batch into a [`ParameterMapping`].
//!
//! ```
//! use explog::extraction::ParameterExtractor;
//!
//! let extractor = ParameterExtractor::new("run_PSI_1.5_NZERO_3_R_2.log");
//! let mapping = extractor.parameters("exp_PSI_1.0_NZERO_2_R_4.log", false).unwrap();
//!
//! assert_eq!(mapping.get("PSI"), Some(1.0));
//! assert_eq!(mapping.repetition(), None);
//! ```

pub mod error;
pub mod extractor;
pub mod grammar;
pub mod mapping;
pub mod template;

pub use error::ExtractionError;
pub use extractor::ParameterExtractor;
pub use grammar::{ParameterToken, TokenGrammar, REPETITION};
pub use mapping::ParameterMapping;
pub use template::ParameterTemplate;
