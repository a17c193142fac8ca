//! Output formatting for the `params` and `check` commands
//!
//! The merged log stream of `merge` is written directly by the merger; this module
//! renders the structured reports in JSON, YAML or human-readable text.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::extraction::{ParameterMapping, ParameterTemplate};
use crate::merge::CheckReport;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Extraction outcome for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileParameters {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParameterMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileParameters {
    pub fn extracted(file: String, parameters: ParameterMapping) -> Self {
        Self {
            file,
            parameters: Some(parameters),
            error: None,
        }
    }

    pub fn failed(file: String, error: String) -> Self {
        Self {
            file,
            parameters: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamsReport {
    pub template: ParameterTemplate,
    pub files: Vec<FileParameters>,
}

impl ParamsReport {
    pub fn failures(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_params(&self, report: &ParamsReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize parameters to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize parameters to YAML")
            }
            OutputFormat::Human => Ok(self.format_params_human(report)),
        }
    }

    pub fn format_check(&self, report: &CheckReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize check report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize check report to YAML")
            }
            OutputFormat::Human => Ok(self.format_check_human(report)),
        }
    }

    fn format_params_human(&self, report: &ParamsReport) -> String {
        let mut output = String::new();

        output.push_str("Parameter Template\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        if report.template.is_empty() {
            output.push_str("Parameters:  (none)\n");
        } else {
            output.push_str(&format!(
                "Parameters:  {}\n",
                report.template.names().join(", ")
            ));
        }
        output.push_str(&format!(
            "Repetition:  {}\n\n",
            if report.template.has_repetition() {
                "yes"
            } else {
                "no"
            }
        ));

        for entry in &report.files {
            match (&entry.parameters, &entry.error) {
                (Some(mapping), _) => {
                    let values: Vec<String> = mapping
                        .iter()
                        .map(|(name, value)| format!("{}={}", name, value))
                        .collect();
                    output.push_str(&format!("\u{2713} {}  {}\n", entry.file, values.join(" ")));
                }
                (None, Some(error)) => {
                    output.push_str(&format!("\u{2717} {}  {}\n", entry.file, error));
                }
                (None, None) => {
                    output.push_str(&format!("\u{2713} {}\n", entry.file));
                }
            }
        }

        output
    }

    fn format_check_human(&self, report: &CheckReport) -> String {
        let mut output = String::new();

        if report.is_ok() {
            output.push_str("\u{2713} Repetition Structure\n");
        } else {
            output.push_str("\u{26A0} Repetition Structure (Problems Found)\n");
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Files:        {}\n", report.files));
        output.push_str(&format!("Groups:       {}\n", report.groups.len()));
        match report.repetitions {
            Some(n) => output.push_str(&format!("Repetitions:  {}\n", n)),
            None => output.push_str("Repetitions:  (inconsistent)\n"),
        }

        if !report.groups.is_empty() {
            output.push('\n');
            for (i, group) in report.groups.iter().enumerate() {
                let connector = if i == report.groups.len() - 1 {
                    "\u{2514}"
                } else {
                    "\u{251C}"
                };
                output.push_str(&format!(
                    "{}\u{2500} {}  ({} runs)\n",
                    connector, group.label, group.repetitions
                ));
            }
        }

        if !report.problems.is_empty() {
            output.push_str("\n\u{26A0} Problems:\n");
            for problem in &report.problems {
                output.push_str(&format!("  - {}\n", problem));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ParameterExtractor;
    use crate::merge::GroupReport;

    fn create_params_report() -> ParamsReport {
        let extractor = ParameterExtractor::new("PSI_1_NZERO_2_R_1");
        let ok = extractor.parameters("PSI_0.5_NZERO_3_R_2.log", true).unwrap();
        let err = extractor.parameters("PSI_0.5.log", true).unwrap_err();

        ParamsReport {
            template: extractor.template().clone(),
            files: vec![
                FileParameters::extracted("PSI_0.5_NZERO_3_R_2.log".to_string(), ok),
                FileParameters::failed("PSI_0.5.log".to_string(), err.to_string()),
            ],
        }
    }

    #[test]
    fn test_params_json_format() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_params(&create_params_report()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["template"]["names"][1], "NZERO");
        assert_eq!(parsed["files"][0]["parameters"]["R"], 2.0);
        assert!(parsed["files"][0].get("error").is_none());
        assert!(parsed["files"][1]["error"]
            .as_str()
            .unwrap()
            .contains("NZERO"));
    }

    #[test]
    fn test_params_yaml_format() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format_params(&create_params_report()).unwrap();

        let parsed: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed["files"][0]["parameters"]["PSI"], serde_yaml::Value::from(0.5));
    }

    #[test]
    fn test_params_human_format() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let report = create_params_report();
        let output = formatter.format_params(&report).unwrap();

        assert!(output.contains("Parameters:  PSI, NZERO"));
        assert!(output.contains("Repetition:  yes"));
        assert!(output.contains("PSI_0.5_NZERO_3_R_2.log  PSI=0.5 NZERO=3 R=2"));
        assert!(output.contains("\u{2717} PSI_0.5.log"));
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_check_human_format() {
        let report = CheckReport {
            files: 3,
            groups: vec![
                GroupReport {
                    label: "PSI=1".to_string(),
                    repetitions: 2,
                },
                GroupReport {
                    label: "PSI=2".to_string(),
                    repetitions: 1,
                },
            ],
            repetitions: None,
            problems: vec!["[PSI=2] has 1 repetitions, expected 2".to_string()],
        };

        let output = OutputFormatter::new(OutputFormat::Human)
            .format_check(&report)
            .unwrap();

        assert!(output.contains("Problems Found"));
        assert!(output.contains("Repetitions:  (inconsistent)"));
        assert!(output.contains("PSI=2  (1 runs)"));
        assert!(output.contains("  - [PSI=2] has 1 repetitions"));
    }

    #[test]
    fn test_check_json_format() {
        let report = CheckReport {
            files: 2,
            groups: vec![GroupReport {
                label: "PSI=1".to_string(),
                repetitions: 2,
            }],
            repetitions: Some(2),
            problems: vec![],
        };

        let output = OutputFormatter::new(OutputFormat::Json)
            .format_check(&report)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["repetitions"], 2);
        assert_eq!(parsed["groups"][0]["label"], "PSI=1");
    }
}
