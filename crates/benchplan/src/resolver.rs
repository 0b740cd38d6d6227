//! Expansion of benchmark sets into concrete benchmark names.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::sets::SetRegistry;

/// Expands every set name in `requested` into its members, transitively.
///
/// Each set is expanded at most once. A set name that reappears after its
/// expansion is dropped without adding its members again, so circular set
/// references terminate. Names that are not sets are returned untouched;
/// whether they exist as benchmarks is decided later.
///
/// # Example
///
/// ```
/// use benchplan::{resolve_sets, SetRegistry};
///
/// let names = resolve_sets(&SetRegistry::builtin(), ["mit_set".to_string()]);
/// assert!(names.contains("silo"));
/// assert!(names.contains("fio"));
/// assert!(!names.contains("mit_set"));
/// assert!(!names.contains("standard_set"));
/// ```
pub fn resolve_sets<I>(registry: &SetRegistry, requested: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    let mut names: BTreeSet<String> = requested.into_iter().collect();
    let mut expanded: HashSet<&'static str> = HashSet::new();

    loop {
        let Some(set) = names.iter().find_map(|name| registry.lookup(name)) else {
            break;
        };
        names.remove(set.name);
        if expanded.insert(set.name) {
            debug!(set = set.name, members = set.members.len(), "Expanding benchmark set");
            names.extend(set.members.iter().map(|member| member.to_string()));
        }
    }

    names
}
