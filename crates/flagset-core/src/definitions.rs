//! # Definitions Module
//!
//! The ordered `name -> bit` table a registry is built from.
//!
//! Order matters: [`crate::FlagSet::resolve`] reports names in definition
//! order, so the table is kept as a sequence and serialized as an ordered map
//! (`{"EN": 1, "FR": 2}`).

use crate::{DefinitionIssue, FlagError, Mask, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;

/// An ordered list of flag definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDefinitions<N> {
    entries: Vec<(N, Mask)>,
}

impl<N> Default for FlagDefinitions<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<N> FlagDefinitions<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition.
    #[must_use]
    pub fn with(mut self, name: N, bit: Mask) -> Self {
        self.entries.push((name, bit));
        self
    }

    /// Append a definition in place.
    pub fn push(&mut self, name: N, bit: Mask) {
        self.entries.push((name, bit));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, Mask)> {
        self.entries.iter().map(|(name, bit)| (name, *bit))
    }

    pub fn into_inner(self) -> Vec<(N, Mask)> {
        self.entries
    }
}

impl<N: Ord + fmt::Display> FlagDefinitions<N> {
    /// Check the table for well-formedness.
    ///
    /// Each value must have exactly one bit set, no two names may share a
    /// bit and no name may appear twice. The first offending entry, in
    /// definition order, is reported.
    pub fn validate(&self) -> Result<()> {
        let mut seen_names: BTreeSet<&N> = BTreeSet::new();
        let mut owners: BTreeMap<Mask, &N> = BTreeMap::new();

        for (name, bit) in &self.entries {
            if !seen_names.insert(name) {
                return Err(FlagError::invalid(name, DefinitionIssue::DuplicateName));
            }
            if !bit.is_single_bit() {
                return Err(FlagError::invalid(
                    name,
                    DefinitionIssue::NotSingleBit { bits: bit.bits() },
                ));
            }
            if let Some(owner) = owners.insert(*bit, name) {
                return Err(FlagError::invalid(
                    name,
                    DefinitionIssue::Collision {
                        with: owner.to_string(),
                    },
                ));
            }
        }

        Ok(())
    }
}

impl<N> FromIterator<(N, Mask)> for FlagDefinitions<N> {
    fn from_iter<I: IntoIterator<Item = (N, Mask)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<N> IntoIterator for FlagDefinitions<N> {
    type Item = (N, Mask);
    type IntoIter = std::vec::IntoIter<(N, Mask)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

impl<N: Serialize> Serialize for FlagDefinitions<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, bit) in &self.entries {
            map.serialize_entry(name, bit)?;
        }
        map.end()
    }
}

impl<'de, N: Deserialize<'de>> Deserialize<'de> for FlagDefinitions<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(DefinitionsVisitor(PhantomData))
    }
}

struct DefinitionsVisitor<N>(PhantomData<N>);

impl<'de, N: Deserialize<'de>> Visitor<'de> for DefinitionsVisitor<N> {
    type Value = FlagDefinitions<N>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of flag names to single-bit unsigned integers")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let capacity = access.size_hint().unwrap_or(0).min(Mask::MAX_FLAGS);
        let mut entries = Vec::with_capacity(capacity);
        while let Some((name, bit)) = access.next_entry::<N, Mask>()? {
            entries.push((name, bit));
        }
        Ok(FlagDefinitions { entries })
    }
}

// =============================================================================
// TESTS
// =============================================================================
