//! Image reference extraction
//!
//! `FROM` images are expanded against the global argument table. `COPY --from`
//! values are recorded as written: they name a stage, a stage index or an image,
//! and are never expanded.

use crate::build_args::{resolve, ArgumentTable};
use crate::dockerfile::Instruction;
use crate::error::Result;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceOrigin {
    From,
    CopyFrom,
}

/// An image reference found in a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub raw_image: String,
    pub resolved_image: String,
    pub line: usize,
    pub origin: ReferenceOrigin,
    /// Number of stages defined at this point, counting the reference's own `AS` name
    #[serde(skip)]
    pub visible_stages: usize,
}

/// Everything the classifier needs from one pass over the instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// `FROM` references followed by `COPY --from` references, each in file order
    pub references: Vec<ImageReference>,
    /// Stage names from `FROM ... AS <name>`, in order of appearance
    pub stages: Vec<String>,
}

pub fn extract(instructions: &[Instruction], table: &ArgumentTable) -> Result<Extraction> {
    let mut extraction = Extraction::default();
    let mut copy_references = Vec::new();

    for instruction in instructions {
        match instruction {
            Instruction::From { line, image, stage } => {
                let resolved_image = resolve(image, table)?;
                debug!(line, image = %resolved_image, stage = ?stage, "FROM reference");

                if let Some(name) = stage {
                    extraction.stages.push(name.clone());
                }
                extraction.references.push(ImageReference {
                    raw_image: image.clone(),
                    resolved_image,
                    line: *line,
                    origin: ReferenceOrigin::From,
                    visible_stages: extraction.stages.len(),
                });
            }
            Instruction::Copy {
                line,
                from: Some(from),
            } => {
                debug!(line, from = %from, "COPY --from reference");
                copy_references.push(ImageReference {
                    raw_image: from.clone(),
                    resolved_image: from.clone(),
                    line: *line,
                    origin: ReferenceOrigin::CopyFrom,
                    visible_stages: extraction.stages.len(),
                });
            }
            _ => {}
        }
    }

    extraction.references.append(&mut copy_references);
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectorError;

    fn from(line: usize, image: &str, stage: Option<&str>) -> Instruction {
        Instruction::From {
            line,
            image: image.to_string(),
            stage: stage.map(str::to_string),
        }
    }

    fn copy(line: usize, from: Option<&str>) -> Instruction {
        Instruction::Copy {
            line,
            from: from.map(str::to_string),
        }
    }

    #[test]
    fn test_from_references_are_resolved() {
        let mut table = ArgumentTable::default();
        table.insert("REGISTRY", Some("test.azurecr.io".to_string()));

        let extraction = extract(&[from(2, "$REGISTRY/ubuntu", None)], &table).unwrap();

        assert_eq!(extraction.references.len(), 1);
        let reference = &extraction.references[0];
        assert_eq!(reference.raw_image, "$REGISTRY/ubuntu");
        assert_eq!(reference.resolved_image, "test.azurecr.io/ubuntu");
        assert_eq!(reference.line, 2);
        assert_eq!(reference.origin, ReferenceOrigin::From);
    }

    #[test]
    fn test_stages_in_order() {
        let extraction = extract(
            &[
                from(1, "golang:1.22", Some("build")),
                from(5, "alpine", Some("test")),
                from(9, "build", None),
            ],
            &ArgumentTable::default(),
        )
        .unwrap();
        assert_eq!(extraction.stages, vec!["build", "test"]);
    }

    #[test]
    fn test_copy_from_is_not_resolved() {
        let extraction = extract(
            &[copy(3, Some("$STAGE")), copy(4, None)],
            &ArgumentTable::default(),
        )
        .unwrap();
        assert_eq!(extraction.references.len(), 1);
        assert_eq!(extraction.references[0].resolved_image, "$STAGE");
        assert_eq!(extraction.references[0].origin, ReferenceOrigin::CopyFrom);
    }

    #[test]
    fn test_from_references_precede_copy_references() {
        let extraction = extract(
            &[
                from(1, "a.azurecr.io/base", Some("base")),
                copy(2, Some("base")),
                from(3, "b.azurecr.io/runtime", None),
            ],
            &ArgumentTable::default(),
        )
        .unwrap();
        let lines: Vec<usize> = extraction.references.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 3, 2]);
    }

    #[test]
    fn test_visible_stages_follow_definitions() {
        let extraction = extract(
            &[
                copy(1, Some("base")),
                from(2, "base", None),
                from(3, "a.azurecr.io/x", Some("base")),
                copy(4, Some("base")),
            ],
            &ArgumentTable::default(),
        )
        .unwrap();
        let visible: Vec<(usize, usize)> = extraction
            .references
            .iter()
            .map(|r| (r.line, r.visible_stages))
            .collect();
        assert_eq!(visible, vec![(2, 0), (3, 1), (1, 0), (4, 1)]);
    }

    #[test]
    fn test_unresolved_from_fails() {
        let err = extract(&[from(1, "$IMAGE", None)], &ArgumentTable::default()).unwrap_err();
        assert!(matches!(err, DetectorError::UnresolvedPlaceholder { .. }));
    }
}
