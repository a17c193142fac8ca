//! Token grammar for `NAME_VALUE` parameters embedded in filenames
//!
//! ```text
//! token := IDENT "_" FLOAT
//! IDENT := [A-Z]+        (maximal, preceded by start of string or a non-letter)
//! FLOAT := [0-9]+ ("." [0-9]+)?
//! ```
//!
//! The boundary rule only rejects letters, so a digit may directly precede an
//! identifier: `PSI_1NZERO_2` scans as `PSI=1` followed by `NZERO=2`.

use super::error::ExtractionError;
use regex::Regex;

/// Reserved identifier marking the repetition index of a run.
pub const REPETITION: &str = "R";

const TOKEN_PATTERN: &str = r"(?P<name>[A-Z]+)_(?P<value>[0-9]+(?:\.[0-9]+)?)";

/// A matched `NAME_VALUE` occurrence in a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterToken {
    pub name: String,
    pub raw_value: String,
    /// Byte offset of the identifier in the scanned string.
    pub offset: usize,
}

impl ParameterToken {
    pub fn is_repetition(&self) -> bool {
        self.name == REPETITION
    }

    /// Parses the raw value as a number, failing instead of defaulting.
    pub fn value(&self, filename: &str) -> Result<f64, ExtractionError> {
        let malformed = || ExtractionError::MalformedValue {
            filename: filename.to_string(),
            name: self.name.clone(),
            raw: self.raw_value.clone(),
        };

        if !is_float_literal(&self.raw_value) {
            return Err(malformed());
        }

        match self.raw_value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(malformed()),
        }
    }
}

/// Compiled scanner for the token grammar. Each extractor owns its own instance.
#[derive(Debug, Clone)]
pub struct TokenGrammar {
    pattern: Regex,
}

impl TokenGrammar {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TOKEN_PATTERN).expect("valid regex"),
        }
    }

    /// Scans `input` left to right and returns every non-overlapping token that
    /// satisfies the boundary rule, in order of appearance.
    pub fn scan(&self, input: &str) -> Vec<ParameterToken> {
        self.pattern
            .captures_iter(input)
            .filter_map(|cap| {
                let name = cap.name("name")?;
                let value = cap.name("value")?;

                let preceded_by_letter = input[..name.start()]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_ascii_alphabetic());
                if preceded_by_letter {
                    return None;
                }

                Some(ParameterToken {
                    name: name.as_str().to_string(),
                    raw_value: value.as_str().to_string(),
                    offset: name.start(),
                })
            })
            .collect()
    }
}

impl Default for TokenGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if `name` is a valid `IDENT`.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_float_literal(raw: &str) -> bool {
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}
