use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when an identifier is not a canonical UUID
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a canonical UUID")]
pub struct IdFormatError(pub String);

/// Listing identifier
///
/// Only the canonical hyphenated form (`8-4-4-4-12` hex digits) is accepted.
/// Simple, braced and URN spellings that `Uuid::parse_str` would take are
/// rejected so that lookups fail as bad input rather than as missing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Parse from the canonical hyphenated string form
    pub fn parse(s: &str) -> Result<Self, IdFormatError> {
        if !is_canonical(s) {
            return Err(IdFormatError(s.to_string()));
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| IdFormatError(s.to_string()))
    }

    /// Generate a fresh random identifier
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

fn is_canonical(s: &str) -> bool {
    const HYPHENS: [usize; 4] = [8, 13, 18, 23];

    s.len() == 36
        && s.bytes().enumerate().all(|(i, b)| {
            if HYPHENS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

impl FromStr for ListingId {
    type Err = IdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Always the lowercase hyphenated form
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for ListingId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
