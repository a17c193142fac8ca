use super::grammar::{ParameterToken, REPETITION};
use serde::{Deserialize, Serialize};

/// The parameter names expected in every filename of one experiment batch.
///
/// Names keep the order of their first appearance in the prototype and never include
/// the repetition marker; `has_repetition` records whether the prototype carried one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterTemplate {
    names: Vec<String>,
    has_repetition: bool,
}

impl ParameterTemplate {
    pub(crate) fn from_tokens(tokens: &[ParameterToken]) -> Self {
        let mut template = Self::default();
        for token in tokens {
            template.add(&token.name);
        }
        template
    }

    pub(crate) fn add(&mut self, name: &str) {
        if name == REPETITION {
            self.has_repetition = true;
        } else if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn has_repetition(&self) -> bool {
        self.has_repetition
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
