//! Output file writers consumed by the CLI (§6 External Interfaces).

pub mod communities;
pub mod dendrogram;
pub mod modularity;

use std::cmp::Ordering;

/// Orders node names the way every exported edge/node list in this crate
/// does (§9 "EdgeNodeIndexComparator" / §6 `B_community.dat`): names that
/// parse as an integer sort numerically and precede names that don't;
/// remaining names compare case-insensitively.
#[must_use]
pub fn compare_node_names(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(na), Ok(nb)) => na.cmp(&nb),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::compare_node_names;
    use std::cmp::Ordering;

    #[test]
    fn numeric_names_sort_numerically() {
        assert_eq!(compare_node_names("2", "10"), Ordering::Less);
    }

    #[test]
    fn numeric_names_precede_string_names() {
        assert_eq!(compare_node_names("10", "alice"), Ordering::Less);
        assert_eq!(compare_node_names("alice", "10"), Ordering::Greater);
    }

    #[test]
    fn string_names_compare_case_insensitively() {
        assert_eq!(compare_node_names("Bob", "alice"), Ordering::Greater);
    }
}
