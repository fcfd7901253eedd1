use crate::entry::{BookId, CatalogEntry};

/// A seed row as `(id, title, author, year)`.
pub type SeedRow = (i64, &'static str, &'static str, i64);

/// The fixed catalog written by the seeder, in insertion order.
pub const SEED_SET: &[SeedRow] = &[
    (1, "The Rust Programming Language", "Steve Klabnik", 2019),
    (2, "The Go Programming Language", "Alan Donovan", 2015),
    (3, "Designing Data-Intensive Applications", "Martin Kleppmann", 2017),
    (4, "Clean Code", "Robert C. Martin", 2008),
    (5, "Structure and Interpretation of Computer Programs", "Harold Abelson", 1996),
];

/// The seed set as owned entries.
pub fn seed_set() -> Vec<CatalogEntry> {
    SEED_SET
        .iter()
        .map(|&(id, title, author, year)| CatalogEntry {
            id: BookId(id),
            title: title.to_string(),
            author: author.to_string(),
            year,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_set_is_valid() {
        let entries = seed_set();
        assert_eq!(entries.len(), 5);
        for e in &entries {
            e.validate().unwrap();
        }
    }

    #[test]
    fn seed_ids_are_unique() {
        let ids: HashSet<_> = SEED_SET.iter().map(|row| row.0).collect();
        assert_eq!(ids.len(), SEED_SET.len());
    }

    #[test]
    fn seed_order_is_stable() {
        let ids: Vec<i64> = seed_set().iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
