//! Kubernetes-style label selectors.
//!
//! Supports the equality- and set-based forms accepted by the Kubernetes API:
//!
//! ```text
//! keystone-override                 # key exists
//! !legacy                           # key does not exist
//! app=keystone, tier==control       # equality
//! env!=dev                          # inequality (also matches when absent)
//! env in (prod, staging)            # set membership
//! env notin (dev)                   # set exclusion (also matches when absent)
//! ```
//!
//! Requirements separated by commas are combined with logical AND. The empty
//! selector matches every object.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

/// Selector parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid label selector '{selector}': {reason}")]
pub struct SelectorParseError {
    pub selector: String,
    pub reason: String,
}

/// A single selector requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Exists(String),
    DoesNotExist(String),
    Equals(String, String),
    NotEquals(String, String),
    In(String, Vec<String>),
    NotIn(String, Vec<String>),
}

impl Requirement {
    /// Label key this requirement tests.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Exists(k)
            | Self::DoesNotExist(k)
            | Self::Equals(k, _)
            | Self::NotEquals(k, _)
            | Self::In(k, _)
            | Self::NotIn(k, _) => k,
        }
    }

    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        let value = labels.get(self.key()).map(String::as_str);
        match self {
            Self::Exists(_) => value.is_some(),
            Self::DoesNotExist(_) => value.is_none(),
            Self::Equals(_, v) => value == Some(v.as_str()),
            Self::NotEquals(_, v) => value != Some(v.as_str()),
            Self::In(_, set) => value.is_some_and(|val| set.iter().any(|s| s == val)),
            Self::NotIn(_, set) => !value.is_some_and(|val| set.iter().any(|s| s == val)),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists(k) => write!(f, "{k}"),
            Self::DoesNotExist(k) => write!(f, "!{k}"),
            Self::Equals(k, v) => write!(f, "{k}={v}"),
            Self::NotEquals(k, v) => write!(f, "{k}!={v}"),
            Self::In(k, set) => write!(f, "{k} in ({})", set.join(",")),
            Self::NotIn(k, set) => write!(f, "{k} notin ({})", set.join(",")),
        }
    }
}

/// Parsed label selector: a conjunction of [`Requirement`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// Returns `SelectorParseError` for malformed requirements, invalid
    /// label keys or values, and empty value sets.
    pub fn parse(input: &str) -> Result<Self, SelectorParseError> {
        let fail = |reason: String| SelectorParseError {
            selector: input.to_owned(),
            reason,
        };

        if input.trim().is_empty() {
            return Ok(Self::default());
        }

        let requirements = split_top_level(input)
            .map_err(&fail)?
            .into_iter()
            .map(|raw| parse_requirement(raw.trim()).map_err(&fail))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { requirements })
    }

    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// The empty selector matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements.iter().all(|r| r.matches(labels))
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, req) in self.requirements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{req}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for LabelSelector {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split on commas that are not inside a `( ... )` value set.
fn split_top_level(input: &str) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced ')'".to_owned())?;
            }
            ',' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unterminated value set".to_owned());
    }
    parts.push(&input[start..]);
    Ok(parts)
}

fn parse_requirement(raw: &str) -> Result<Requirement, String> {
    if raw.is_empty() {
        return Err("empty requirement".to_owned());
    }

    if let Some(key) = raw.strip_prefix('!') {
        let key = key.trim();
        validate_key(key)?;
        return Ok(Requirement::DoesNotExist(key.to_owned()));
    }

    if let Some((key, value)) = raw.split_once("!=") {
        let (key, value) = (key.trim(), value.trim());
        validate_key(key)?;
        validate_value(value)?;
        return Ok(Requirement::NotEquals(key.to_owned(), value.to_owned()));
    }

    if let Some((key, value)) = raw.split_once('=') {
        let value = value.strip_prefix('=').unwrap_or(value);
        let (key, value) = (key.trim(), value.trim());
        validate_key(key)?;
        validate_value(value)?;
        return Ok(Requirement::Equals(key.to_owned(), value.to_owned()));
    }

    let Some((key, rest)) = raw.split_once(char::is_whitespace) else {
        validate_key(raw)?;
        return Ok(Requirement::Exists(raw.to_owned()));
    };
    validate_key(key)?;

    let rest = rest.trim_start();
    if let Some(set) = rest.strip_prefix("notin") {
        Ok(Requirement::NotIn(key.to_owned(), parse_value_set(set)?))
    } else if let Some(set) = rest.strip_prefix("in") {
        Ok(Requirement::In(key.to_owned(), parse_value_set(set)?))
    } else {
        Err(format!("unexpected operator after key '{key}': '{rest}'"))
    }
}

fn parse_value_set(raw: &str) -> Result<Vec<String>, String> {
    let inner = raw
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| "value set must be enclosed in parentheses".to_owned())?;

    if inner.trim().is_empty() {
        return Err("value set can't be empty for 'in' and 'notin'".to_owned());
    }

    inner
        .split(',')
        .map(|v| {
            let v = v.trim();
            validate_value(v)?;
            Ok(v.to_owned())
        })
        .collect()
}

/// Label keys are `[prefix/]name` where prefix is a DNS subdomain.
fn validate_key(key: &str) -> Result<(), String> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix {
        let valid_prefix = !prefix.is_empty()
            && prefix.len() <= MAX_PREFIX_LEN
            && prefix.split('.').all(|label| {
                !label.is_empty()
                    && label
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                    && !label.starts_with('-')
                    && !label.ends_with('-')
            });
        if !valid_prefix {
            return Err(format!("invalid label key prefix in '{key}'"));
        }
    }

    if name.is_empty() {
        return Err(format!("label key '{key}' has an empty name"));
    }
    if !is_label_name(name) {
        return Err(format!("invalid label key '{key}'"));
    }
    Ok(())
}

fn validate_value(value: &str) -> Result<(), String> {
    if value.is_empty() || is_label_name(value) {
        Ok(())
    } else {
        Err(format!("invalid label value '{value}'"))
    }
}

/// At most 63 chars of `[A-Za-z0-9_.-]`, beginning and ending alphanumeric.
fn is_label_name(s: &str) -> bool {
    let bytes = s.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            s.len() <= MAX_NAME_LEN
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        }
        _ => false,
    }
}
