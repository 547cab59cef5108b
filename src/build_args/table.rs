//! Global build-argument table
//!
//! Only the `ARG` instructions ahead of the first `FROM` are global; they are
//! processed strictly top to bottom so a default can reference any argument
//! declared before it, but never one declared after it.

use super::{resolve, validate_name};
use crate::dockerfile::Instruction;
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::debug;

/// Resolved build arguments, keyed by case-sensitive name.
///
/// A `None` value marks an argument that was declared without a default and
/// received no override; referencing it is an unresolved placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentTable {
    entries: BTreeMap<String, Option<String>>,
}

impl ArgumentTable {
    pub fn insert(&mut self, key: &str, value: Option<String>) {
        self.entries.insert(key.to_string(), value);
    }

    /// Returns the value of `key` if it was declared and has a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    pub fn is_declared(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the global argument table from the leading `ARG` instructions.
///
/// Stops at the first instruction that is not an `ARG`. Overrides win over
/// in-file defaults and are expanded the same way defaults are.
pub fn build_table(
    instructions: &[Instruction],
    overrides: &BTreeMap<String, String>,
) -> Result<ArgumentTable> {
    let mut table = ArgumentTable::default();

    for instruction in instructions {
        let Instruction::Arg { entries, line } = instruction else {
            break;
        };

        for entry in entries {
            let (key, default) = match entry.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (entry.as_str(), None),
            };
            validate_name(key)?;

            let chosen = overrides.get(key).map(String::as_str).or(default);
            let value = match chosen {
                Some(raw) => Some(resolve(raw, &table)?),
                None => None,
            };

            debug!(line, key, value = ?value, "Resolved global build argument");
            table.insert(key, value);
        }
    }

    Ok(table)
}
