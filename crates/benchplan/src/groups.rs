//! Parallel group parsing.
//!
//! A request such as `a (b c) d` arrives as the tokens `["a", "(b", "c)", "d"]`.
//! Tokens between a leading `(` and a trailing `)` form one group that runs
//! concurrently; every other token is its own group.

use crate::error::{PlanError, Result};

/// Groups of benchmark names, in scheduling order.
pub type ParallelGroups = Vec<Vec<String>>;

const OPEN: char = '(';
const CLOSE: char = ')';

/// Returns true if any token carries a group marker.
pub fn has_group_markers<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokens.iter().any(|token| {
        let token = token.as_ref();
        token.starts_with(OPEN) || token.ends_with(CLOSE)
    })
}

/// Removes the group markers from a single token.
pub fn strip_group_markers(token: &str) -> &str {
    let token = token.strip_prefix(OPEN).unwrap_or(token);
    token.strip_suffix(CLOSE).unwrap_or(token)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Sequential,
    InParallelGroup,
}

/// Parses request tokens into execution groups.
///
/// # Errors
///
/// - [`PlanError::NestedGroup`] if a group opens inside another group
/// - [`PlanError::UnmatchedClose`] if a group closes outside a group
/// - [`PlanError::UnclosedGroup`] if the tokens end inside a group
///
/// # Example
///
/// ```
/// use benchplan::parse_groups;
///
/// let groups = parse_groups(&["a", "(b", "c)", "d"]).unwrap();
/// assert_eq!(groups, vec![vec!["a"], vec!["b", "c"], vec!["d"]]);
/// ```
pub fn parse_groups<S: AsRef<str>>(tokens: &[S]) -> Result<ParallelGroups> {
    let mut groups = ParallelGroups::new();
    let mut current: Vec<String> = Vec::new();
    let mut state = State::Sequential;

    for raw in tokens {
        let raw = raw.as_ref();
        let mut token = raw;

        if let Some(rest) = token.strip_prefix(OPEN) {
            if state == State::InParallelGroup {
                return Err(PlanError::NestedGroup(raw.to_string()));
            }
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            // "(x)" opens and closes in one token; fall through.
            token = rest;
            state = State::InParallelGroup;
        }

        if let Some(rest) = token.strip_suffix(CLOSE) {
            if state != State::InParallelGroup {
                return Err(PlanError::UnmatchedClose(raw.to_string()));
            }
            current.push(rest.to_string());
            groups.push(std::mem::take(&mut current));
            state = State::Sequential;
            continue;
        }

        match state {
            State::InParallelGroup => current.push(token.to_string()),
            State::Sequential => groups.push(vec![token.to_string()]),
        }
    }

    if state == State::InParallelGroup {
        return Err(PlanError::UnclosedGroup);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    Ok(groups)
}
