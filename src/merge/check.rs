//! Structural check of a batch of repeated runs
//!
//! Every parameter combination is expected to have been run the same number of times,
//! with repetition indices `1..=n` and no gaps or duplicates.

use super::collector::LogFile;
use super::error::MergeError;
use crate::extraction::ParameterExtractor;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    /// `NAME=value` pairs of the combination, space separated.
    pub label: String,
    pub repetitions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckReport {
    pub files: usize,
    pub groups: Vec<GroupReport>,
    /// Repetition count shared by every group, when consistent.
    pub repetitions: Option<usize>,
    pub problems: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

struct Group {
    values: Vec<f64>,
    label: String,
    indices: Vec<f64>,
}

pub struct RepetitionChecker<'a> {
    extractor: &'a ParameterExtractor,
}

impl<'a> RepetitionChecker<'a> {
    /// Fails if the extractor's template has no repetition marker.
    pub fn new(extractor: &'a ParameterExtractor, prototype: &str) -> Result<Self, MergeError> {
        if !extractor.template().has_repetition() {
            return Err(MergeError::NoRepetitions {
                prototype: prototype.to_string(),
            });
        }
        Ok(Self { extractor })
    }

    pub fn check(&self, files: &[LogFile]) -> CheckReport {
        let mut report = CheckReport {
            files: files.len(),
            ..Default::default()
        };
        let mut groups: Vec<Group> = Vec::new();

        for file in files {
            let mapping = match self.extractor.parameters(&file.name, true) {
                Ok(m) => m,
                Err(e) => {
                    report.problems.push(e.to_string());
                    continue;
                }
            };
            let Some(repetition) = mapping.repetition() else {
                report
                    .problems
                    .push(format!("{} has no repetition index", file.name));
                continue;
            };

            let values = mapping.without_repetition();
            match groups.iter_mut().find(|g| g.values == values) {
                Some(group) => group.indices.push(repetition),
                None => groups.push(Group {
                    label: label(&mapping),
                    values,
                    indices: vec![repetition],
                }),
            }
        }

        groups.sort_by(|a, b| {
            a.values
                .iter()
                .zip(&b.values)
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let expected = groups.first().map(|g| g.indices.len());
        for group in &mut groups {
            check_group(group, expected, &mut report.problems);
            report.groups.push(GroupReport {
                label: group.label.clone(),
                repetitions: group.indices.len(),
            });
        }

        if report.is_ok() {
            report.repetitions = expected;
            info!(
                groups = report.groups.len(),
                repetitions = ?expected,
                "Structural check passed"
            );
        } else {
            debug!(problems = report.problems.len(), "Structural check failed");
        }
        report
    }
}

fn check_group(group: &mut Group, expected: Option<usize>, problems: &mut Vec<String>) {
    group.indices.sort_by(|a, b| a.total_cmp(b));

    for (i, index) in group.indices.iter().enumerate() {
        let wanted = (i + 1) as f64;
        if index.fract() != 0.0 {
            problems.push(format!("[{}] repetition {} is not an integer", group.label, index));
        } else if *index != wanted {
            problems.push(format!(
                "[{}] expected repetition {}, found {}",
                group.label, wanted, index
            ));
            return;
        }
    }

    if let Some(n) = expected {
        if group.indices.len() != n {
            problems.push(format!(
                "[{}] has {} repetitions, expected {}",
                group.label,
                group.indices.len(),
                n
            ));
        }
    }
}

fn label(mapping: &crate::extraction::ParameterMapping) -> String {
    mapping
        .iter()
        .filter(|(name, _)| *name != crate::extraction::REPETITION)
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}
