//! Instrument identifiers and selections.
//!
//! `InstrumentId` is a strongly-typed ticker; `InstrumentSet` is the ordered,
//! duplicate-free selection a pipeline run is built for.

use std::collections::HashSet;
use std::fmt;

use super::error::RiskError;

/// Opaque identifier of a tradable instrument (e.g. an exchange ticker).
///
/// Deserialization goes through [`InstrumentId::parse`], so identifiers read
/// from configuration are trimmed and blank ones are rejected.
///
/// # Examples
///
/// ```
/// use risk_core::types::InstrumentId;
///
/// let id = InstrumentId::new("PETR4.SA");
/// assert_eq!(id.as_str(), "PETR4.SA");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Creates a new instrument ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates an ID from user input, trimming whitespace and rejecting
    /// empty identifiers.
    pub fn parse(raw: &str) -> Result<Self, RiskError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RiskError::invalid_input("instrument identifier is empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for InstrumentId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for InstrumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered selection of instruments without duplicates.
///
/// Duplicates collapse to their first occurrence, so a selection of
/// `[A, B, A]` yields two columns `[A, B]` downstream.
///
/// # Examples
///
/// ```
/// use risk_core::types::InstrumentSet;
///
/// let set: InstrumentSet = ["PETR4.SA", "TAEE11.SA", "PETR4.SA"].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.ids()[1].as_str(), "TAEE11.SA");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentSet {
    ids: Vec<InstrumentId>,
}

impl InstrumentSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instrument unless already present. Returns true if added.
    pub fn insert(&mut self, id: InstrumentId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Identifiers in selection order.
    pub fn ids(&self) -> &[InstrumentId] {
        &self.ids
    }

    /// Iterates over identifiers in selection order.
    pub fn iter(&self) -> std::slice::Iter<'_, InstrumentId> {
        self.ids.iter()
    }

    /// Number of distinct instruments.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true for the "nothing selected" state.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if the instrument is selected.
    pub fn contains(&self, id: &InstrumentId) -> bool {
        self.ids.contains(id)
    }
}

impl<T: Into<InstrumentId>> FromIterator<T> for InstrumentSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let ids = iter
            .into_iter()
            .map(Into::into)
            .filter(|id: &InstrumentId| seen.insert(id.clone()))
            .collect();
        Self { ids }
    }
}

impl<'a> IntoIterator for &'a InstrumentSet {
    type Item = &'a InstrumentId;
    type IntoIter = std::slice::Iter<'a, InstrumentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl fmt::Display for InstrumentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.ids.iter().map(InstrumentId::as_str).collect();
        write!(f, "{}", joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_id_from_str() {
        let id: InstrumentId = "WEGE3.SA".into();
        assert_eq!(id.as_str(), "WEGE3.SA");
        assert_eq!(format!("{}", id), "WEGE3.SA");
    }

    #[test]
    fn test_instrument_id_parse_trims() {
        let id = InstrumentId::parse("  ITUB4.SA ").unwrap();
        assert_eq!(id.as_str(), "ITUB4.SA");
    }

    #[test]
    fn test_instrument_id_parse_rejects_blank() {
        assert!(InstrumentId::parse("   ").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_trims_and_rejects_blank() {
        let ids: Vec<InstrumentId> = serde_json::from_str(r#"[" PETR4.SA", "TAEE11.SA "]"#).unwrap();
        assert_eq!(ids, vec![InstrumentId::new("PETR4.SA"), InstrumentId::new("TAEE11.SA")]);

        let err = serde_json::from_str::<Vec<InstrumentId>>(r#"["PETR4.SA", "  "]"#).unwrap_err();
        assert!(err.to_string().contains("identifier is empty"), "{}", err);
    }

    #[test]
    fn test_set_collapses_duplicates_keeping_order() {
        let set: InstrumentSet = ["B", "A", "B", "C", "A"].into_iter().collect();
        let ids: Vec<&str> = set.iter().map(InstrumentId::as_str).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_set_insert() {
        let mut set = InstrumentSet::new();
        assert!(set.is_empty());
        assert!(set.insert(InstrumentId::new("A")));
        assert!(!set.insert(InstrumentId::new("A")));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&InstrumentId::new("A")));
    }

    #[test]
    fn test_set_display() {
        let set: InstrumentSet = ["A", "B"].into_iter().collect();
        assert_eq!(format!("{}", set), "A, B");
    }
}
