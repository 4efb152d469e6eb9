//! Threshold → class tables and their JSON form.
//!
//! A table keeps entries in the order they were defined. Classification walks
//! that order, so class toggles are applied in the same sequence the author
//! wrote them in the attribute.

use crate::error::TableError;
use core::fmt::{self, Formatter};
use core::marker::PhantomData;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, de};

/// Insertion-ordered mapping from a minimum width to a class name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakpointTable {
    entries: Vec<(u32, String)>,
}

impl BreakpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object such as `{"300": "bp-300", "600": "bp-600"}`.
    pub fn from_json(text: &str) -> Result<Self, TableError> {
        let raw: RawTable = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawTable) -> Result<Self, TableError> {
        let mut table = Self::new();
        for (key, class) in raw.0 {
            let threshold = parse_threshold(&key)?;
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(TableError::InvalidClass { threshold, class });
            }
            table.insert(threshold, class);
        }
        Ok(table)
    }

    /// Insert or replace the class for `threshold`.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, threshold: u32, class: impl Into<String>) {
        let class = class.into();
        if let Some(slot) = self.entries.iter_mut().find(|entry| entry.0 == threshold) {
            slot.1 = class;
        } else {
            self.entries.push((threshold, class));
        }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, threshold: u32, class: impl Into<String>) -> Self {
        self.insert(threshold, class);
        self
    }

    pub fn get(&self, threshold: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.0 == threshold)
            .map(|entry| entry.1.as_str())
    }

    /// Entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries
            .iter()
            .map(|(threshold, class)| (*threshold, class.as_str()))
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Each distinct class with whether `width` wants it, in first-definition order.
    ///
    /// A class shared by several thresholds is wanted when any of them is met.
    pub fn wanted(&self, width: f64) -> Vec<(&str, bool)> {
        let mut wanted: Vec<(&str, bool)> = Vec::with_capacity(self.entries.len());
        for (threshold, class) in &self.entries {
            let met = width >= f64::from(*threshold);
            match wanted.iter_mut().find(|entry| entry.0 == class.as_str()) {
                Some(slot) => slot.1 |= met,
                None => wanted.push((class.as_str(), met)),
            }
        }
        wanted
    }

    /// Largest threshold met by `width`, if any.
    pub fn current(&self, width: f64) -> Option<u32> {
        self.entries
            .iter()
            .map(|entry| entry.0)
            .filter(|threshold| width >= f64::from(*threshold))
            .max()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for BreakpointTable {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (threshold, class) in iter {
            table.insert(threshold, class);
        }
        table
    }
}

impl<'de> Deserialize<'de> for BreakpointTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTable::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(de::Error::custom)
    }
}

fn parse_threshold(key: &str) -> Result<u32, TableError> {
    match key.trim().parse::<u32>() {
        Ok(threshold) if threshold > 0 => Ok(threshold),
        _ => Err(TableError::InvalidThreshold(key.to_owned())),
    }
}

/// Object entries exactly as written, duplicates included.
struct RawTable(Vec<(String, String)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawTableVisitor(PhantomData))
    }
}

struct RawTableVisitor<'de>(PhantomData<&'de ()>);

impl<'de> Visitor<'de> for RawTableVisitor<'de> {
    type Value = RawTable;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object mapping width thresholds to class names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, class)) = access.next_entry::<String, String>()? {
            entries.push((key, class));
        }
        Ok(RawTable(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_definition_order() {
        let table = BreakpointTable::from_json(r#"{"600": "wide", "300": "narrow"}"#).unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(600, "wide"), (300, "narrow")]);
    }

    #[test]
    fn duplicate_threshold_last_definition_wins_in_first_slot() {
        let table =
            BreakpointTable::from_json(r#"{"300": "a", "500": "b", "0300": "c"}"#).unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(300, "c"), (500, "b")]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            BreakpointTable::from_json("not-json"),
            Err(TableError::Json(_))
        ));
        assert!(matches!(
            BreakpointTable::from_json("[300]"),
            Err(TableError::Json(_))
        ));
        assert!(matches!(
            BreakpointTable::from_json(r#"{"300": 5}"#),
            Err(TableError::Json(_))
        ));
        assert!(matches!(
            BreakpointTable::from_json(r#"{"wide": "bp"}"#),
            Err(TableError::InvalidThreshold(key)) if key == "wide"
        ));
        assert!(matches!(
            BreakpointTable::from_json(r#"{"0": "bp"}"#),
            Err(TableError::InvalidThreshold(_))
        ));
        assert!(matches!(
            BreakpointTable::from_json(r#"{"300": "two words"}"#),
            Err(TableError::InvalidClass { threshold: 300, .. })
        ));
    }

    #[test]
    fn empty_object_is_an_empty_table() {
        assert!(BreakpointTable::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn shared_class_is_wanted_when_any_threshold_is_met() {
        let table = BreakpointTable::new()
            .with(300, "wide")
            .with(600, "wide")
            .with(900, "huge");
        assert_eq!(table.wanted(450.0), vec![("wide", true), ("huge", false)]);
        assert_eq!(table.wanted(200.0), vec![("wide", false), ("huge", false)]);
    }

    #[test]
    fn current_is_largest_met_threshold() {
        let table = BreakpointTable::new().with(600, "b").with(300, "a");
        assert_eq!(table.current(650.0), Some(600));
        assert_eq!(table.current(600.0), Some(600));
        assert_eq!(table.current(450.0), Some(300));
        assert_eq!(table.current(299.5), None);
    }
}
