use super::error::ExtractionError;
use super::grammar::{is_identifier, ParameterToken, TokenGrammar, REPETITION};
use super::mapping::ParameterMapping;
use super::template::ParameterTemplate;
use std::collections::HashSet;

/// Builds a [`ParameterTemplate`] once and applies it to any number of filenames.
///
/// The extractor holds no mutable state, so a single instance can be shared across
/// threads and queried in any order.
#[derive(Debug, Clone)]
pub struct ParameterExtractor {
    grammar: TokenGrammar,
    template: ParameterTemplate,
}

impl ParameterExtractor {
    /// Derives the template from a prototype filename. An empty template is valid.
    pub fn new(prototype: &str) -> Self {
        let grammar = TokenGrammar::new();
        let template = ParameterTemplate::from_tokens(&grammar.scan(prototype));
        Self { grammar, template }
    }

    /// Like [`ParameterExtractor::new`], but fails if the prototype has no parameters
    /// besides the repetition marker.
    pub fn with_required_parameters(prototype: &str) -> Result<Self, ExtractionError> {
        let extractor = Self::new(prototype);
        if extractor.template.is_empty() {
            return Err(ExtractionError::EmptyTemplate {
                prototype: prototype.to_string(),
            });
        }
        Ok(extractor)
    }

    /// Builds the template from an explicit list of names. Listing `R` marks the
    /// batch as carrying repetitions.
    pub fn from_names<I, S>(names: I) -> Result<Self, ExtractionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut template = ParameterTemplate::default();
        for name in names {
            let name = name.as_ref().trim();
            if !is_identifier(name) {
                return Err(ExtractionError::InvalidName {
                    name: name.to_string(),
                });
            }
            template.add(name);
        }

        Ok(Self {
            grammar: TokenGrammar::new(),
            template,
        })
    }

    pub fn template(&self) -> &ParameterTemplate {
        &self.template
    }

    /// Raw tokens found in `filename`, in order of appearance.
    pub fn tokens(&self, filename: &str) -> Vec<ParameterToken> {
        self.grammar.scan(filename)
    }

    /// Extracts the template's parameters from `filename`.
    ///
    /// `include_repetition` controls whether an `R` token lands in the mapping; when
    /// false it is dropped silently. Tokens whose name is not in the template are
    /// ignored. Every template name must occur exactly once, and so must `R`.
    pub fn parameters(
        &self,
        filename: &str,
        include_repetition: bool,
    ) -> Result<ParameterMapping, ExtractionError> {
        let mut found: Vec<Option<f64>> = vec![None; self.template.len()];
        let mut repetition: Option<f64> = None;
        let mut seen_repetition = false;

        for token in self.grammar.scan(filename) {
            if token.is_repetition() {
                if seen_repetition {
                    return Err(duplicate(filename, REPETITION));
                }
                seen_repetition = true;
                if include_repetition {
                    repetition = Some(token.value(filename)?);
                }
                continue;
            }

            let Some(index) = self.template.position(&token.name) else {
                continue;
            };
            if found[index].is_some() {
                return Err(duplicate(filename, &token.name));
            }
            found[index] = Some(token.value(filename)?);
        }

        let mut entries = Vec::with_capacity(self.template.len() + 1);
        for (name, value) in self.template.names().iter().zip(found) {
            let value = value.ok_or_else(|| ExtractionError::MissingParameter {
                filename: filename.to_string(),
                name: name.clone(),
            })?;
            entries.push((name.clone(), value));
        }
        if let Some(r) = repetition {
            entries.push((REPETITION.to_string(), r));
        }

        Ok(ParameterMapping::from_entries(entries))
    }

    /// Names of tokens in `filename` that the template does not know about.
    pub fn unknown_names(&self, filename: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.grammar
            .scan(filename)
            .into_iter()
            .filter(|t| !t.is_repetition() && !self.template.contains(&t.name))
            .filter(|t| seen.insert(t.name.clone()))
            .map(|t| t.name)
            .collect()
    }
}

fn duplicate(filename: &str, name: &str) -> ExtractionError {
    ExtractionError::DuplicateParameter {
        filename: filename.to_string(),
        name: name.to_string(),
    }
}
