use serde::Serialize;

/// Registry entry that admits references without an explicit registry host.
pub const IMPLICIT_REGISTRY: &str = "docker.io";

/// Ordered set of allowed registry suffixes, e.g. `.azurecr.io` or `mcr.microsoft.com`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedRegistrySet {
    entries: Vec<String>,
}

impl AllowedRegistrySet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for entry in entries {
            let entry = entry.into();
            let entry = entry.trim();
            if !entry.is_empty() && !set.entries.iter().any(|e| e == entry) {
                set.entries.push(entry.to_string());
            }
        }
        set
    }

    /// Parses a configuration value separated by commas, semicolons or whitespace.
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(|c: char| c == ',' || c == ';' || c.is_whitespace()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// True when `docker.io` is listed, which admits bare `image[:tag]` references.
    pub fn allows_implicit_registry(&self) -> bool {
        self.entries.iter().any(|e| e == IMPLICIT_REGISTRY)
    }

    /// Plain suffix match with no `.` boundary: `notmcr.microsoft.com` passes
    /// when `mcr.microsoft.com` is listed.
    pub fn host_is_allowed(&self, host: &str) -> bool {
        self.entries.iter().any(|suffix| host.ends_with(suffix.as_str()))
    }
}
