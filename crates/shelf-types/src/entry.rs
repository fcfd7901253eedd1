use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Primary key of a catalog row.
///
/// Parsing is strict base-10: surrounding whitespace, trailing garbage and
/// fractional values are rejected. Zero and negative values parse (they are
/// simply never present in the store) so lookups can report them as absent
/// rather than malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub i64);

impl BookId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for BookId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(BookId)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One book in the catalog.
///
/// Serialized as `{"id":..,"title":..,"author":..,"year":..}`. Entries are
/// immutable once seeded; nothing in the service updates or deletes them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl CatalogEntry {
    /// Build a validated entry: positive id, non-empty title and author.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
    ) -> Result<Self, TypeError> {
        let entry = Self {
            id: BookId(id),
            title: title.into(),
            author: author.into(),
            year,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), TypeError> {
        if self.id.get() <= 0 {
            return Err(TypeError::NonPositiveId(self.id.get()));
        }
        if self.title.trim().is_empty() {
            return Err(TypeError::EmptyField { field: "title" });
        }
        if self.author.trim().is_empty() {
            return Err(TypeError::EmptyField { field: "author" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_plain_integers() {
        assert_eq!("1".parse::<BookId>().unwrap(), BookId(1));
        assert_eq!("999999".parse::<BookId>().unwrap(), BookId(999_999));
        assert_eq!("-3".parse::<BookId>().unwrap(), BookId(-3));
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in ["abc", "", "1.5", "12abc", " 1", "0x10", "99999999999999999999"] {
            assert_eq!(
                raw.parse::<BookId>(),
                Err(TypeError::InvalidId(raw.to_string())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn entry_serializes_flat() {
        let e = CatalogEntry::new(7, "Dune", "Frank Herbert", 1965).unwrap();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "title": "Dune", "author": "Frank Herbert", "year": 1965})
        );
    }

    #[test]
    fn entry_validation() {
        assert_eq!(
            CatalogEntry::new(0, "t", "a", 2000),
            Err(TypeError::NonPositiveId(0))
        );
        assert_eq!(
            CatalogEntry::new(1, " ", "a", 2000),
            Err(TypeError::EmptyField { field: "title" })
        );
        assert_eq!(
            CatalogEntry::new(1, "t", "", 2000),
            Err(TypeError::EmptyField { field: "author" })
        );
    }

    proptest! {
        #[test]
        fn any_i64_roundtrips_through_display(raw in any::<i64>()) {
            let id = BookId(raw);
            prop_assert_eq!(id.to_string().parse::<BookId>().unwrap(), id);
        }

        #[test]
        fn alphabetic_segments_never_parse(seg in "[a-zA-Z_]{1,12}") {
            prop_assert!(seg.parse::<BookId>().is_err());
        }
    }
}
