//! Parsing of `--build-arg` command-line fragments
//!
//! Accepts both `--build-arg KEY=VALUE` and `--build-arg=KEY=VALUE`. Anything
//! else in the fragment (other flags, positional tokens) is skipped.

use super::validate_name;
use crate::error::{DetectorError, Result};
use std::collections::BTreeMap;
use tracing::debug;

const BUILD_ARG_FLAG: &str = "--build-arg";

/// Parses every `--build-arg` occurrence in `args_line` into a key/value map.
///
/// Later occurrences of a key overwrite earlier ones.
pub fn parse_cli_args(args_line: &str) -> Result<BTreeMap<String, String>> {
    let mut overrides = BTreeMap::new();
    let mut rest = args_line;

    while let Some(flag_start) = rest.find(BUILD_ARG_FLAG) {
        rest = &rest[flag_start + BUILD_ARG_FLAG.len()..];
        rest = match rest.strip_prefix('=') {
            Some(after) => after,
            None => rest.trim_start_matches(' '),
        };

        let separator = rest.find('=').ok_or_else(|| {
            DetectorError::MalformedBuildArgs(format!(
                "expected KEY=VALUE after {} in \"{}\"",
                BUILD_ARG_FLAG, args_line
            ))
        })?;
        let key = &rest[..separator];
        validate_name(key)?;

        let value_part = &rest[separator + 1..];
        let value_end = value_part.find(' ').unwrap_or(value_part.len());
        let value = &value_part[..value_end];

        debug!(key, value, "Parsed build-arg override");
        overrides.insert(key.to_string(), value.to_string());

        rest = &value_part[value_end..];
    }

    Ok(overrides)
}
