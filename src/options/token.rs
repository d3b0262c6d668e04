//! Token lexer: raw strings → flag / value tokens.

use crate::options::error::OptionError;

/// A token recognised as an option flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagToken<'t> {
    /// Option name without the leading dashes or any inline value.
    pub name: &'t str,
    /// Value attached in the same token (`--name=value`, `-qab`).
    pub inline_value: Option<&'t str>,
    /// Single-dash form (`-b`), matched against short aliases.
    pub short: bool,
}

/// Parse a token as a flag.
///
/// Returns `None` for value tokens, which includes negative numbers such as
/// `-1` or `-0.5`, a lone `-`, and a bare `--`.
pub fn parse_flag(token: &str) -> Option<FlagToken<'_>> {
    if looks_numeric(token) {
        return None;
    }

    if let Some(body) = token.strip_prefix("--") {
        let (name, inline_value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        if name.is_empty() {
            return None;
        }
        return Some(FlagToken {
            name,
            inline_value,
            short: false,
        });
    }

    let body = token.strip_prefix('-')?;
    let first = body.chars().next()?;
    let (name, rest) = body.split_at(first.len_utf8());
    // Sticky short values: `-b18`, `-qab`, `-b=18`.
    let rest = rest.strip_prefix('=').unwrap_or(rest);
    Some(FlagToken {
        name,
        inline_value: (!rest.is_empty()).then_some(rest),
        short: true,
    })
}

/// Whether the token is a flag rather than a value.
pub fn is_flag(token: &str) -> bool {
    parse_flag(token).is_some()
}

/// Whether the token parses as a (possibly negative) number.
///
/// `inf`, `infinity` and `nan` count, in any case, so `-inf` is a value.
pub fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    let numeric_start = digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        || ["inf", "infinity", "nan"]
            .iter()
            .any(|word| digits.eq_ignore_ascii_case(word));
    numeric_start && token.parse::<f64>().is_ok()
}

/// Split a recorded command line into tokens with POSIX shell quoting.
///
/// Fails on an unterminated quote or a trailing backslash, since everything
/// after the stray quote would otherwise collapse into one value.
pub fn split_command_line(line: &str) -> Result<Vec<String>, OptionError> {
    shlex::split(line).ok_or_else(|| OptionError::MalformedCommandLine {
        line: line.to_string(),
    })
}
