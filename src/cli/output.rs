//! Report formatting for JSON, YAML and human-readable output

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::compliance::ImageReference;
use crate::config::ImageGuardConfig;
use crate::detector::Analysis;
use crate::error::DetectorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Compliant,
    NonCompliant,
    Skipped,
    /// Inconclusive: the file could not be read or analysed
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unallowed: Vec<ImageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn from_analysis(path: &Path, analysis: Analysis) -> Self {
        let mut report = Self::new(path, FileStatus::Compliant);
        match analysis {
            Analysis::Skipped { reason } => {
                report.status = FileStatus::Skipped;
                report.skip_reason = Some(reason.to_string());
            }
            Analysis::Completed { unallowed } if !unallowed.is_empty() => {
                report.status = FileStatus::NonCompliant;
                report.unallowed = unallowed;
            }
            Analysis::Completed { .. } => {}
        }
        report
    }

    pub fn from_error(path: &Path, error: &DetectorError) -> Self {
        Self::failed(path, error.to_string())
    }

    pub fn failed(path: &Path, error: String) -> Self {
        let mut report = Self::new(path, FileStatus::Failed);
        report.error = Some(error);
        report
    }

    fn new(path: &Path, status: FileStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            status,
            unallowed: Vec::new(),
            skip_reason: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub files: Vec<FileReport>,
}

impl CheckReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        Self { files }
    }

    /// `2` if any file failed, `1` if any file has unallowed images, else `0`.
    pub fn exit_code(&self) -> i32 {
        if self.has_status(FileStatus::Failed) {
            2
        } else if self.has_status(FileStatus::NonCompliant) {
            1
        } else {
            0
        }
    }

    fn has_status(&self, status: FileStatus) -> bool {
        self.files.iter().any(|f| f.status == status)
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &CheckReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize check report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize check report to YAML")
            }
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    pub fn format_config(&self, config: &ImageGuardConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&config.to_display_map())
                .context("Failed to serialize config to YAML"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_report_human(&self, report: &CheckReport) -> String {
        let mut output = String::new();

        for file in &report.files {
            let path = file.path.display();
            match file.status {
                FileStatus::Compliant => {
                    output.push_str(&format!(
                        "\u{2713} {}: all images are from allowed registries\n",
                        path
                    ));
                }
                FileStatus::NonCompliant => {
                    output.push_str(&format!(
                        "\u{2717} {}: {} image(s) from unallowed registries\n",
                        path,
                        file.unallowed.len()
                    ));
                    for image in &file.unallowed {
                        output.push_str(&format!(
                            "    line {}: {}\n",
                            image.line, image.resolved_image
                        ));
                    }
                }
                FileStatus::Skipped => {
                    output.push_str(&format!(
                        "- {}: skipped ({})\n",
                        path,
                        file.skip_reason.as_deref().unwrap_or("no reason given")
                    ));
                }
                FileStatus::Failed => {
                    output.push_str(&format!(
                        "! {}: analysis failed: {}\n",
                        path,
                        file.error.as_deref().unwrap_or("unknown error")
                    ));
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::ReferenceOrigin;
    use crate::detector::SkipReason;

    fn unallowed(image: &str, line: usize) -> ImageReference {
        ImageReference {
            raw_image: image.to_string(),
            resolved_image: image.to_string(),
            line,
            origin: ReferenceOrigin::From,
            visible_stages: 0,
        }
    }

    fn sample_report() -> CheckReport {
        CheckReport::new(vec![
            FileReport::from_analysis(
                Path::new("a/Dockerfile"),
                Analysis::Completed {
                    unallowed: vec![unallowed("test.azurecr2.io/ubuntu", 2)],
                },
            ),
            FileReport::from_analysis(
                Path::new("b/Dockerfile"),
                Analysis::Skipped {
                    reason: SkipReason::Disabled("legacy".to_string()),
                },
            ),
        ])
    }

    #[test]
    fn test_statuses_from_analysis() {
        let report = sample_report();
        assert_eq!(report.files[0].status, FileStatus::NonCompliant);
        assert_eq!(report.files[1].status, FileStatus::Skipped);

        let clean = FileReport::from_analysis(
            Path::new("Dockerfile"),
            Analysis::Completed { unallowed: vec![] },
        );
        assert_eq!(clean.status, FileStatus::Compliant);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CheckReport::default().exit_code(), 0);
        let mut report = sample_report();
        assert_eq!(report.exit_code(), 1);

        report.files.push(FileReport::from_error(
            Path::new("c/Dockerfile"),
            &DetectorError::UnresolvedPlaceholder {
                name: "IMAGE".to_string(),
            },
        ));
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_json_output() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let json = formatter.format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value["files"][0];
        assert_eq!(first["status"], "non_compliant");
        assert_eq!(first["unallowed"][0]["resolved_image"], "test.azurecr2.io/ubuntu");
        assert_eq!(first["unallowed"][0]["line"], 2);
        assert!(first.get("error").is_none());
        assert_eq!(value["files"][1]["status"], "skipped");
    }

    #[test]
    fn test_yaml_output() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let yaml = formatter.format_report(&sample_report()).unwrap();
        assert!(yaml.contains("status: non_compliant"));
        assert!(yaml.contains("resolved_image: test.azurecr2.io/ubuntu"));
    }

    #[test]
    fn test_human_output() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let text = formatter.format_report(&sample_report()).unwrap();
        assert!(text.contains("a/Dockerfile: 1 image(s) from unallowed registries"));
        assert!(text.contains("line 2: test.azurecr2.io/ubuntu"));
        assert!(text.contains(
            "b/Dockerfile: skipped (disabled by DisableDockerDetector directive: legacy)"
        ));
    }
}
