use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic document identifier, unique across the lifetime of an index.
///
/// Serialises as a plain JSON integer (not `{"0": N}`) so it round-trips
/// through the `docid` field of the index snapshot and the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub u64);

impl DocId {
    pub const FIRST: DocId = DocId(1);

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DocId {
    fn from(value: u64) -> Self {
        DocId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let id = DocId(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: DocId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(DocId(7).to_string(), "7");
    }
}
