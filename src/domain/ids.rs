//! Domain identifier types with validation
//!
//! Newtype wrappers keep vaccine and child identifiers from being mixed up and
//! reject blank values at construction and deserialization time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vaccine identifier newtype wrapper
///
/// Identifies one vaccine series in the catalog (e.g. `"dtap"`). All doses of
/// a series share the same id. Ordering is plain string ordering, which the
/// schedule uses as its secondary sort key.
///
/// # Examples
///
/// ```
/// use immunize::domain::ids::VaccineId;
/// use std::str::FromStr;
///
/// let id = VaccineId::from_str("hepb").unwrap();
/// assert_eq!(id.as_str(), "hepb");
/// assert!(VaccineId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VaccineId(String);

impl VaccineId {
    /// Creates a new VaccineId, trimming surrounding whitespace
    ///
    /// # Returns
    ///
    /// Returns `Ok(VaccineId)` if the ID is non-blank, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Vaccine ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the vaccine ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VaccineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VaccineId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for VaccineId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VaccineId> for String {
    fn from(id: VaccineId) -> Self {
        id.0
    }
}

impl AsRef<str> for VaccineId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Child identifier newtype wrapper
///
/// The engine never looks children up; the id is carried through so that
/// logs and rendered output can be attributed to a record held by the
/// persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChildId(String);

impl ChildId {
    /// Creates a new ChildId
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Child ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the child ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChildId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChildId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChildId> for String {
    fn from(id: ChildId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vaccine_id_valid() {
        let id = VaccineId::new("dtap").unwrap();
        assert_eq!(id.as_str(), "dtap");
        assert_eq!(id.to_string(), "dtap");
    }

    #[test]
    fn test_vaccine_id_trims_whitespace() {
        let id = VaccineId::new("  mmr ").unwrap();
        assert_eq!(id.as_str(), "mmr");
    }

    #[test]
    fn test_vaccine_id_empty() {
        assert!(VaccineId::new("").is_err());
        assert!(VaccineId::new("   ").is_err());
    }

    #[test]
    fn test_vaccine_id_ordering() {
        let a = VaccineId::new("bcg").unwrap();
        let b = VaccineId::new("hepb").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_vaccine_id_serde_roundtrip_rejects_blank() {
        let id: VaccineId = serde_json::from_str("\"ipv\"").unwrap();
        assert_eq!(id.as_str(), "ipv");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ipv\"");

        let blank = serde_json::from_str::<VaccineId>("\"  \"");
        assert!(blank.is_err());
    }

    #[test]
    fn test_child_id() {
        let id = ChildId::from_str("child-42").unwrap();
        assert_eq!(id.as_str(), "child-42");
        assert!(ChildId::new("").is_err());
    }
}
