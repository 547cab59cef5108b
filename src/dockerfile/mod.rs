//! Dockerfile instruction records
//!
//! The detector consumes typed instruction records. They can be built directly by
//! a caller that already has a Dockerfile AST, or produced from raw text by
//! [`parse`].

pub mod instruction;
pub mod parser;

pub use instruction::{Comment, Dockerfile, Instruction};
pub use parser::parse;

use regex::Regex;
use std::sync::OnceLock;

fn skip_directive_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^DisableDockerDetector(?:\s+"([^"]*)")?\s*$"#).expect("valid regex")
    })
}

/// Looks for a `# DisableDockerDetector "reason"` comment anywhere in the file.
///
/// Returns the quoted reason, or an empty string when the directive has none.
pub fn find_skip_directive(dockerfile: &Dockerfile) -> Option<String> {
    dockerfile.comments.iter().find_map(|comment| {
        skip_directive_pattern()
            .captures(&comment.text)
            .map(|caps| {
                caps.get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            })
    })
}
