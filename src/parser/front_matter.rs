use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

pub const DELIMITER: &str = "+++";

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\S+)\s*=\s*(.*)$").unwrap());

/// Split normalized text into the TOML-ish header and the body.
/// The body has surrounding blank lines removed.
pub fn split(text: &str) -> Result<(FrontMatter<'_>, &str), ParseError> {
    let rest = text
        .strip_prefix(DELIMITER)
        .and_then(|r| r.strip_prefix('\n'))
        .ok_or(ParseError::MissingFrontMatter)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.starts_with(DELIMITER) {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((FrontMatter { header }, body.trim_matches('\n')));
        }
        offset += line.len();
    }

    Err(ParseError::FrontMatterNotClosed)
}

/// `key = value` lines between the delimiters. The first matching key wins.
#[derive(Debug, Clone, Copy)]
pub struct FrontMatter<'a> {
    header: &'a str,
}

impl<'a> FrontMatter<'a> {
    fn raw(&self, key: &str) -> Option<&'a str> {
        self.header.lines().find_map(|line| {
            let caps = ENTRY_RE.captures(line)?;
            if &caps[1] == key {
                caps.get(2).map(|m| m.as_str())
            } else {
                None
            }
        })
    }

    /// Scalar value with surrounding quotes removed.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.raw(key).map(|v| v.trim().trim_matches(['\'', '"']))
    }

    pub fn value_or_empty(&self, key: &str) -> String {
        self.value(key).unwrap_or_default().to_string()
    }

    /// Array value `[a, "b", 'c']` as trimmed strings, empty elements dropped.
    pub fn values(&self, key: &str) -> Vec<String> {
        let Some(raw) = self.raw(key) else {
            return Vec::new();
        };

        raw.trim()
            .trim_matches(['[', ']'])
            .split(',')
            .map(|part| part.trim_matches([' ', '\'', '"']))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}
