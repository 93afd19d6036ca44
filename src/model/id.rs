//! Opaque identifiers
//!
//! The backend sends ids as strings (conversation and message ids are TEXT
//! columns) but some payloads carry plain integers. Both decode to the same
//! opaque [`Id`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque server-assigned identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Null,
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Id(s),
            RawId::Integer(n) => Id(n.to_string()),
            RawId::Null => Id::default(),
        }
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Id(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id(value)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id(value.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_string_and_integer() {
        let a: Id = serde_json::from_str(r#""conv-7""#).unwrap();
        let b: Id = serde_json::from_str("42").unwrap();
        assert_eq!(a.as_str(), "conv-7");
        assert_eq!(b, Id::from(42u64));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Id::from(5u64)).unwrap();
        assert_eq!(json, r#""5""#);
    }
}
