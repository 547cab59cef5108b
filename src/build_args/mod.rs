//! Build-argument handling
//!
//! Turns `--build-arg` command-line fragments and leading `ARG` instructions into
//! a resolved argument table, expanding `$KEY` / `${KEY}` placeholders along the way.

pub mod cli;
pub mod placeholder;
pub mod table;

pub use cli::parse_cli_args;
pub use placeholder::resolve;
pub use table::{build_table, ArgumentTable};

use crate::error::{DetectorError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid regex"))
}

/// Checks a build-argument name against `^[A-Za-z][A-Za-z0-9_]*$`.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DetectorError::EmptyArgumentName);
    }
    if !name_pattern().is_match(name) {
        return Err(DetectorError::InvalidArgumentName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
