//! Per-entry filter matching
//!
//! Unset filter fields are wildcards; an entry matches when every set field
//! compares equal. An all-unset filter therefore matches the whole table.

use crate::types::{Filter, NeighbourEntry};

/// Returns true if `entry` satisfies every field set in `filter`
pub fn matches(entry: &NeighbourEntry, filter: &Filter) -> bool {
    field_matches(filter.destination.as_ref(), &entry.destination)
        && field_matches(filter.lladdr.as_ref(), &entry.lladdr)
        && field_matches(filter.ifindex.as_ref(), &entry.ifindex)
        && field_matches(filter.family.as_ref(), &entry.family)
        && field_matches(filter.state.as_ref(), &entry.state)
}

#[inline]
fn field_matches<T: PartialEq>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}
