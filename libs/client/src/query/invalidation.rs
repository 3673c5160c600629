//! Which cache partitions a mutation makes stale

/// Cache partition holding every analytics and report read
pub const ANALYTICS: &str = "analytics";

/// Partitions derived from `resource`'s records
pub fn dependents(resource: &str) -> &'static [&'static str] {
    match resource {
        // Every aggregate is computed from claims
        "claims" => &[ANALYTICS],
        _ => &[],
    }
}

/// `resource` followed by its dependents
pub fn affected(resource: &str) -> impl Iterator<Item = &str> {
    std::iter::once(resource).chain(dependents(resource).iter().copied())
}
