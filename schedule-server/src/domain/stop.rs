//! Stop identifiers.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The key naming a timetable column, one per physical stop.
///
/// Identifiers are free-form strings taken verbatim from the timetable
/// document, so no normalization is applied.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    /// Wrap a stop identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StopId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StopId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_debug() {
        let stop = StopId::new("Plaza");
        assert_eq!(stop.to_string(), "Plaza");
        assert_eq!(format!("{:?}", stop), "StopId(Plaza)");
    }

    #[test]
    fn borrow_as_str_for_lookup() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StopId::new("Terminal Norte"));
        assert!(set.contains("Terminal Norte"));
        assert!(!set.contains("terminal norte"));
    }

    #[test]
    fn serde_transparent() {
        let stop: StopId = serde_json::from_str("\"Hospital\"").unwrap();
        assert_eq!(stop.as_str(), "Hospital");
        assert_eq!(serde_json::to_string(&stop).unwrap(), "\"Hospital\"");
    }
}
