use thiserror::Error;

/// Errors raised while building a template or extracting parameters from a filename.
///
/// Every variant carries the string that was being scanned so the caller can report
/// which file is at fault without keeping extra context around.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("No parameter tokens found in prototype '{prototype}'")]
    EmptyTemplate { prototype: String },

    #[error("Malformed value '{raw}' for parameter {name} in '{filename}'")]
    MalformedValue {
        filename: String,
        name: String,
        raw: String,
    },

    #[error("Parameter {name} is missing from '{filename}'")]
    MissingParameter { filename: String, name: String },

    #[error("Parameter {name} appears more than once in '{filename}'")]
    DuplicateParameter { filename: String, name: String },

    #[error("Invalid parameter name '{name}': expected one or more uppercase ASCII letters")]
    InvalidName { name: String },
}

impl ExtractionError {
    /// Parameter name the error refers to, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ExtractionError::EmptyTemplate { .. } => None,
            ExtractionError::MalformedValue { name, .. }
            | ExtractionError::MissingParameter { name, .. }
            | ExtractionError::DuplicateParameter { name, .. }
            | ExtractionError::InvalidName { name } => Some(name),
        }
    }
}
