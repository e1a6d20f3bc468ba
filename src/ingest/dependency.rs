//! Prerequisite token expansion
//!
//! A catalog cell lists prerequisites as explicit ids or compact ranges:
//! `T1.1-T1.3, T2.4` means T1.1, T1.2, T1.3 and T2.4.

use thiserror::Error;

/// Separator between the two bounds of a range token
pub const RANGE_SEPARATOR: char = '-';

/// Most ids a single range token may expand to
pub const MAX_RANGE_LEN: u32 = 1000;

/// A prerequisite token that cannot be expanded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed dependency token '{token}': {reason}")]
pub struct MalformedDependencyToken {
    pub token: String,
    pub reason: &'static str,
}

impl MalformedDependencyToken {
    fn new(token: &str, reason: &'static str) -> Self {
        Self {
            token: token.to_string(),
            reason,
        }
    }
}

/// Split a range bound into its prefix and numeric suffix (after the last dot)
fn split_bound<'a>(token: &str, bound: &'a str) -> Result<(&'a str, u32), MalformedDependencyToken> {
    let (prefix, suffix) = bound
        .trim()
        .rsplit_once('.')
        .ok_or_else(|| MalformedDependencyToken::new(token, "range bound has no dotted suffix"))?;
    if prefix.is_empty() {
        return Err(MalformedDependencyToken::new(token, "range bound has an empty prefix"));
    }
    let number = suffix
        .parse::<u32>()
        .map_err(|_| MalformedDependencyToken::new(token, "range suffix is not an integer"))?;
    Ok((prefix, number))
}

/// Expand one token into the prerequisite ids it denotes
///
/// Tokens without a range separator are a single id. `BASE.m-BASE.n`
/// expands to `BASE.m ..= BASE.n`; both bounds must share the prefix and
/// the range must not descend.
pub fn expand_token(token: &str) -> Result<Vec<String>, MalformedDependencyToken> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(Vec::new());
    }
    if !token.contains(RANGE_SEPARATOR) {
        return Ok(vec![token.to_string()]);
    }

    let bounds: Vec<&str> = token.split(RANGE_SEPARATOR).collect();
    let [from, to] = bounds.as_slice() else {
        return Err(MalformedDependencyToken::new(token, "expected exactly two range bounds"));
    };

    let (from_prefix, first) = split_bound(token, *from)?;
    let (to_prefix, last) = split_bound(token, *to)?;
    if from_prefix != to_prefix {
        return Err(MalformedDependencyToken::new(token, "range bounds have different prefixes"));
    }
    if first > last {
        return Err(MalformedDependencyToken::new(token, "range is descending"));
    }
    if last - first >= MAX_RANGE_LEN {
        return Err(MalformedDependencyToken::new(token, "range too large"));
    }

    Ok((first..=last).map(|n| format!("{}.{}", from_prefix, n)).collect())
}

/// Expand every token of a cell, dropping repeated ids
pub fn expand_dependencies<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<String>, MalformedDependencyToken> {
    let mut ids: Vec<String> = Vec::new();
    for token in tokens {
        for id in expand_token(token.as_ref())? {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}
