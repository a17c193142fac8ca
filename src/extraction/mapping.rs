use super::grammar::REPETITION;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;

/// Parameter values extracted from one filename.
///
/// Entries follow the template order; the repetition value, when included, is last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMapping {
    entries: Vec<(String, f64)>,
}

impl ParameterMapping {
    pub(crate) fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn repetition(&self) -> Option<f64> {
        self.get(REPETITION)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Values of every entry except the repetition marker.
    pub fn without_repetition(&self) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|(n, _)| n != REPETITION)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Orders two mappings produced from the same template by their values, entry by entry.
    pub fn cmp_values(&self, other: &Self) -> Ordering {
        self.values()
            .zip(other.values())
            .map(|(a, b)| a.total_cmp(&b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| self.len().cmp(&other.len()))
    }
}

impl Serialize for ParameterMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
