//! `$KEY` and `${KEY}` expansion

use super::{is_name_char, validate_name, ArgumentTable};
use crate::error::{DetectorError, Result};

/// Expands every placeholder in `input` against `table`.
///
/// Braced keys end at the first `}`; bare keys take the longest run of
/// `[A-Za-z0-9_]`, so `$A$B` expands both. Every referenced key must already
/// have a value in the table.
pub fn resolve(input: &str, table: &ArgumentTable) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(dollar) = rest.find('$') {
        output.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let (key, consumed) = if let Some(braced) = after.strip_prefix('{') {
            let close = braced.find('}').ok_or_else(|| malformed(input))?;
            (&braced[..close], close + 2)
        } else {
            let len = after
                .char_indices()
                .find(|(_, c)| !is_name_char(*c))
                .map(|(i, _)| i)
                .unwrap_or(after.len());
            if len == 0 {
                return Err(malformed(input));
            }
            (&after[..len], len)
        };

        validate_name(key)?;
        let value = table
            .get(key)
            .ok_or_else(|| DetectorError::UnresolvedPlaceholder {
                name: key.to_string(),
            })?;
        output.push_str(value);

        rest = &after[consumed..];
    }

    output.push_str(rest);
    Ok(output)
}

fn malformed(input: &str) -> DetectorError {
    DetectorError::MalformedPlaceholder {
        input: input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> ArgumentTable {
        let mut table = ArgumentTable::default();
        for (key, value) in entries {
            table.insert(key, Some(value.to_string()));
        }
        table
    }

    #[test]
    fn test_no_placeholders_is_verbatim() {
        let t = ArgumentTable::default();
        assert_eq!(resolve("ubuntu:22.04", &t).unwrap(), "ubuntu:22.04");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(resolve("", &ArgumentTable::default()).unwrap(), "");
    }

    #[test]
    fn test_bare_placeholder() {
        let t = table(&[("REGISTRY", "test.azurecr.io")]);
        assert_eq!(
            resolve("$REGISTRY/ubuntu", &t).unwrap(),
            "test.azurecr.io/ubuntu"
        );
    }

    #[test]
    fn test_braced_placeholder() {
        let t = table(&[("TAG", "22.04")]);
        assert_eq!(resolve("ubuntu:${TAG}-slim", &t).unwrap(), "ubuntu:22.04-slim");
    }

    #[test]
    fn test_adjacent_placeholders() {
        let t = table(&[("REGISTRY_NAME", "contoso"), ("REGISTRY_SUFFIX", ".azurecr.io")]);
        assert_eq!(
            resolve("$REGISTRY_NAME$REGISTRY_SUFFIX/ubuntu", &t).unwrap(),
            "contoso.azurecr.io/ubuntu"
        );
    }

    #[test]
    fn test_bare_key_stops_at_non_identifier() {
        let t = table(&[("IMAGE", "app")]);
        assert_eq!(resolve("$IMAGE:latest", &t).unwrap(), "app:latest");
        assert_eq!(resolve("$IMAGE-dev", &t).unwrap(), "app-dev");
    }

    #[test]
    fn test_value_is_not_rescanned() {
        let t = table(&[("A", "$B")]);
        assert_eq!(resolve("$A", &t).unwrap(), "$B");
    }

    #[test]
    fn test_unresolved_reference() {
        let err = resolve("$IMAGE", &ArgumentTable::default()).unwrap_err();
        assert_eq!(
            err,
            DetectorError::UnresolvedPlaceholder {
                name: "IMAGE".to_string()
            }
        );
    }

    #[test]
    fn test_declared_without_value_is_unresolved() {
        let mut t = ArgumentTable::default();
        t.insert("IMAGE", None);
        assert!(matches!(
            resolve("${IMAGE}", &t),
            Err(DetectorError::UnresolvedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_unterminated_brace() {
        let t = table(&[("TAG", "1")]);
        assert!(matches!(
            resolve("ubuntu:${TAG", &t),
            Err(DetectorError::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_trailing_dollar() {
        assert!(matches!(
            resolve("ubuntu$", &ArgumentTable::default()),
            Err(DetectorError::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn test_invalid_braced_name() {
        assert!(matches!(
            resolve("${1TAG}", &ArgumentTable::default()),
            Err(DetectorError::InvalidArgumentName { .. })
        ));
        assert_eq!(
            resolve("${}", &ArgumentTable::default()),
            Err(DetectorError::EmptyArgumentName)
        );
    }
}
