//! Analysis entry point
//!
//! Runs the full chain for one Dockerfile: `--build-arg` parsing, the global
//! argument table, reference extraction and registry classification. Every call
//! is independent; the detector only holds the allow-list.

use crate::build_args::{build_table, parse_cli_args};
use crate::compliance::{classify, extract, AllowedRegistrySet, ImageReference};
use crate::dockerfile::{self, find_skip_directive, Dockerfile};
use crate::error::Result;
use serde::Serialize;
use tracing::{debug, info};

/// Why an analysis was not performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    EmptyAllowList,
    /// `# DisableDockerDetector "reason"` found in the file
    Disabled(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyAllowList => write!(f, "no allowed registries configured"),
            SkipReason::Disabled(reason) if reason.is_empty() => {
                write!(f, "disabled by DisableDockerDetector directive")
            }
            SkipReason::Disabled(reason) => {
                write!(f, "disabled by DisableDockerDetector directive: {}", reason)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    Skipped { reason: SkipReason },
    Completed { unallowed: Vec<ImageReference> },
}

impl Analysis {
    /// Unallowed references; empty for skipped analyses.
    pub fn unallowed(&self) -> &[ImageReference] {
        match self {
            Analysis::Skipped { .. } => &[],
            Analysis::Completed { unallowed } => unallowed.as_slice(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Analysis::Skipped { .. })
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, Analysis::Completed { unallowed } if unallowed.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct DockerDetector {
    allowed: AllowedRegistrySet,
}

impl DockerDetector {
    pub fn new(allowed: AllowedRegistrySet) -> Self {
        Self { allowed }
    }

    pub fn allowed(&self) -> &AllowedRegistrySet {
        &self.allowed
    }

    /// Analyses pre-parsed Dockerfile records.
    pub fn analyze(&self, dockerfile: &Dockerfile, build_args: &str) -> Result<Analysis> {
        if self.allowed.is_empty() {
            info!("No allowed registries configured, skipping analysis");
            return Ok(Analysis::Skipped {
                reason: SkipReason::EmptyAllowList,
            });
        }
        if let Some(reason) = find_skip_directive(dockerfile) {
            info!(reason = %reason, "Dockerfile opted out of registry checks");
            return Ok(Analysis::Skipped {
                reason: SkipReason::Disabled(reason),
            });
        }

        let overrides = parse_cli_args(build_args)?;
        let table = build_table(&dockerfile.instructions, &overrides)?;
        debug!(
            overrides = overrides.len(),
            arguments = table.len(),
            "Built global argument table"
        );

        let extraction = extract(&dockerfile.instructions, &table)?;
        debug!(
            references = extraction.references.len(),
            stages = extraction.stages.len(),
            "Extracted image references"
        );

        let unallowed = classify(&extraction.references, &extraction.stages, &self.allowed);
        Ok(Analysis::Completed { unallowed })
    }

    /// Parses raw Dockerfile text, then analyses it.
    pub fn analyze_text(&self, text: &str, build_args: &str) -> Result<Analysis> {
        let dockerfile = dockerfile::parse(text)?;
        self.analyze(&dockerfile, build_args)
    }
}
