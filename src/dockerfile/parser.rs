//! Minimal Dockerfile reader
//!
//! Produces just enough structure for the detector: `ARG` entries, `FROM` images
//! and stage names, `COPY --from` values, and comment text. Everything else is
//! kept as an opaque keyword so instruction order is preserved.

use super::{Comment, Dockerfile, Instruction};
use crate::error::{DetectorError, Result};

/// Parses raw Dockerfile text.
pub fn parse(text: &str) -> Result<Dockerfile> {
    let mut dockerfile = Dockerfile::default();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();

        if let Some(comment) = trimmed.strip_prefix('#') {
            dockerfile.comments.push(Comment {
                line,
                text: comment.trim().to_string(),
            });
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }

        let (content, continues) = match trimmed.strip_suffix('\\') {
            Some(content) => (content.trim_end(), true),
            None => (trimmed, false),
        };

        match pending.as_mut() {
            Some((_, buffer)) => {
                buffer.push(' ');
                buffer.push_str(content);
            }
            None => pending = Some((line, content.to_string())),
        }

        if !continues {
            if let Some((start, buffer)) = pending.take() {
                dockerfile.instructions.push(parse_instruction(start, &buffer)?);
            }
        }
    }

    if let Some((start, buffer)) = pending.take() {
        dockerfile.instructions.push(parse_instruction(start, &buffer)?);
    }

    Ok(dockerfile)
}

fn parse_instruction(line: usize, text: &str) -> Result<Instruction> {
    let (keyword, rest) = match text.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (text, ""),
    };

    match keyword.to_ascii_uppercase().as_str() {
        "ARG" => Ok(Instruction::Arg {
            line,
            entries: split_arg_entries(rest),
        }),
        "FROM" => parse_from(line, rest),
        "COPY" => Ok(Instruction::Copy {
            line,
            from: rest
                .split_whitespace()
                .take_while(|token| token.starts_with("--"))
                .find_map(|token| token.strip_prefix("--from="))
                .map(str::to_string),
        }),
        other => Ok(Instruction::Other {
            line,
            keyword: other.to_string(),
        }),
    }
}

fn parse_from(line: usize, rest: &str) -> Result<Instruction> {
    let mut tokens = rest
        .split_whitespace()
        .skip_while(|token| token.starts_with("--"));

    let image = tokens.next().ok_or_else(|| DetectorError::Syntax {
        line,
        message: "FROM requires an image".to_string(),
    })?;

    let stage = match tokens.next() {
        Some(token) if token.eq_ignore_ascii_case("as") => {
            let name = tokens.next().ok_or_else(|| DetectorError::Syntax {
                line,
                message: "FROM ... AS requires a stage name".to_string(),
            })?;
            Some(name.to_string())
        }
        _ => None,
    };

    Ok(Instruction::From {
        line,
        image: image.to_string(),
        stage,
    })
}

/// Splits `ARG` entries on whitespace or commas outside quotes and drops the
/// quote characters.
fn split_arg_entries(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in text.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() || c == ',' => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }

    words
}
