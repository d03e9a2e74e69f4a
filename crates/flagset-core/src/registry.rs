//! # Registry Module
//!
//! The flag registry: an immutable `name -> bit` table plus the operations
//! that compose, inspect and combine masks over it.
//!
//! Every operation is a pure function of its arguments and the table, so a
//! registry can be shared between threads without synchronization.
//!
//! ## Operand resolution
//!
//! The comparison and set-algebra operations take [`Flags`] operands. A raw
//! [`Mask`] is used as-is; names are first composed with [`FlagSet::merge`].
//! An unknown name fails the whole operation with
//! [`FlagError::UnknownFlagName`].
//!
//! ## `remove` and `difference`
//!
//! Both compute the symmetric difference (`current ^ needed`). Removing a
//! flag that is not present therefore sets it. [`FlagSet::clear`] is the
//! `current & !needed` variant.

use crate::{DefinitionIssue, FlagDefinitions, FlagError, Flags, Mask, Result};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// FLAGSET
// =============================================================================

/// An immutable registry of named single-bit flags.
///
/// Definition order is preserved and drives the output order of
/// [`FlagSet::resolve`]. Lookups go through a `BTreeMap` index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet<N> {
    /// Definitions in insertion order.
    entries: Vec<(N, Mask)>,

    /// Reverse lookup: name -> position in `entries`.
    index: BTreeMap<N, usize>,
}

impl<N: Ord + Clone> FlagSet<N> {
    /// Build a registry without validating the definitions.
    ///
    /// Values are expected to be distinct single bits (`1 << 0`, `1 << 1`,
    /// ...). Nothing checks this: two names sharing a bit resolve together.
    /// A repeated name keeps its first position and takes the last value.
    /// Use [`FlagSet::try_new`] to reject such tables.
    pub fn new(definitions: impl IntoIterator<Item = (N, Mask)>) -> Self {
        let mut entries: Vec<(N, Mask)> = Vec::new();
        let mut index: BTreeMap<N, usize> = BTreeMap::new();

        for (name, bit) in definitions {
            if let Some(&position) = index.get(&name) {
                if let Some(entry) = entries.get_mut(position) {
                    entry.1 = bit;
                }
            } else {
                index.insert(name.clone(), entries.len());
                entries.push((name, bit));
            }
        }

        Self { entries, index }
    }

    /// Number of defined flags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, Mask)> {
        self.entries.iter().map(|(name, bit)| (name, *bit))
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &N> {
        self.entries.iter().map(|(name, _)| name)
    }

    /// The bit bound to `name`, if defined.
    pub fn get<Q>(&self, name: &Q) -> Option<Mask>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index
            .get(name)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, bit)| *bit)
    }

    pub fn contains<Q>(&self, name: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(name)
    }

    /// Union of every defined bit.
    pub fn all(&self) -> Mask {
        self.entries.iter().map(|(_, bit)| *bit).collect()
    }

    /// Bits of `mask` that no definition accounts for.
    pub fn unknown_bits(&self, mask: Mask) -> Mask {
        mask.without(self.all())
    }

    /// Names whose bit is fully set in `mask`, in definition order.
    ///
    /// Bits without a matching definition are ignored; this never fails.
    pub fn resolve(&self, mask: Mask) -> Vec<&N> {
        self.entries
            .iter()
            .filter(|(_, bit)| mask.contains(*bit))
            .map(|(name, _)| name)
            .collect()
    }

    /// Copy of the definition table.
    pub fn definitions(&self) -> FlagDefinitions<N> {
        self.entries.iter().cloned().collect()
    }
}

impl<N: Ord + Clone + fmt::Display> FlagSet<N> {
    /// Build a registry, rejecting malformed definitions.
    ///
    /// Fails with [`FlagError::InvalidFlagDefinition`] when a value does not
    /// have exactly one bit set, when two names share a bit, or when a name
    /// is repeated.
    pub fn try_new(definitions: impl IntoIterator<Item = (N, Mask)>) -> Result<Self> {
        let definitions: FlagDefinitions<N> = definitions.into_iter().collect();
        definitions.validate()?;
        Ok(Self::new(definitions))
    }

    /// Build a registry assigning `1 << 0`, `1 << 1`, ... in order.
    pub fn from_names(names: impl IntoIterator<Item = N>) -> Result<Self> {
        let mut definitions = FlagDefinitions::new();
        for (position, name) in names.into_iter().enumerate() {
            let bit = u32::try_from(position)
                .ok()
                .and_then(Mask::checked_bit)
                .ok_or_else(|| {
                    FlagError::invalid(
                        &name,
                        DefinitionIssue::TooManyFlags {
                            max: Mask::MAX_FLAGS,
                        },
                    )
                })?;
            definitions.push(name, bit);
        }
        Self::try_new(definitions)
    }

    /// The bit bound to `name`, or [`FlagError::UnknownFlagName`].
    pub fn lookup<Q>(&self, name: &Q) -> Result<Mask>
    where
        N: Borrow<Q>,
        Q: Ord + fmt::Display + ?Sized,
    {
        self.get(name).ok_or_else(|| FlagError::unknown(name))
    }

    /// Compose names into one mask by OR-ing their bits.
    ///
    /// Order and repetition do not affect the result; an empty sequence
    /// yields [`Mask::EMPTY`].
    pub fn merge<I>(&self, names: I) -> Result<Mask>
    where
        I: IntoIterator,
        I::Item: Borrow<N>,
    {
        names.into_iter().try_fold(Mask::EMPTY, |acc, name| {
            let name: &N = name.borrow();
            Ok(acc | self.lookup(name)?)
        })
    }

    /// Resolve any operand to its canonical mask.
    pub fn mask_of(&self, flags: impl Into<Flags<N>>) -> Result<Mask> {
        match flags.into() {
            Flags::Mask(mask) => Ok(mask),
            Flags::Name(name) => self.lookup(&name),
            Flags::Names(names) => self.merge(&names),
        }
    }

    fn operands(
        &self,
        current: impl Into<Flags<N>>,
        needed: impl Into<Flags<N>>,
    ) -> Result<(Mask, Mask)> {
        Ok((self.mask_of(current)?, self.mask_of(needed)?))
    }

    /// True iff `current` holds every bit of `needed`.
    ///
    /// An empty `needed` is a subset of everything.
    pub fn has(&self, current: impl Into<Flags<N>>, needed: impl Into<Flags<N>>) -> Result<bool> {
        let (current, needed) = self.operands(current, needed)?;
        Ok(current.contains(needed))
    }

    /// True iff `current` and `needed` share at least one bit.
    pub fn intersects(
        &self,
        current: impl Into<Flags<N>>,
        needed: impl Into<Flags<N>>,
    ) -> Result<bool> {
        let (current, needed) = self.operands(current, needed)?;
        Ok(current.intersects(needed))
    }

    /// Symmetric difference: bits set in exactly one operand.
    ///
    /// Mask the result with `needed` (or use [`FlagSet::missing`]) to get
    /// only the bits `current` lacks.
    pub fn difference(
        &self,
        current: impl Into<Flags<N>>,
        needed: impl Into<Flags<N>>,
    ) -> Result<Mask> {
        let (current, needed) = self.operands(current, needed)?;
        Ok(current ^ needed)
    }

    /// Union of both operands.
    pub fn add(&self, current: impl Into<Flags<N>>, needed: impl Into<Flags<N>>) -> Result<Mask> {
        let (current, needed) = self.operands(current, needed)?;
        Ok(current | needed)
    }

    /// Toggle `needed` in `current` (`current ^ needed`).
    ///
    /// Present bits are cleared, absent bits are set. Same result as
    /// [`FlagSet::difference`].
    pub fn remove(
        &self,
        current: impl Into<Flags<N>>,
        needed: impl Into<Flags<N>>,
    ) -> Result<Mask> {
        let (current, needed) = self.operands(current, needed)?;
        Ok(current ^ needed)
    }

    /// Clear `needed` from `current` (`current & !needed`).
    pub fn clear(&self, current: impl Into<Flags<N>>, needed: impl Into<Flags<N>>) -> Result<Mask> {
        let (current, needed) = self.operands(current, needed)?;
        Ok(current.without(needed))
    }

    /// Bits of `needed` that `current` lacks (`needed & !current`).
    pub fn missing(
        &self,
        current: impl Into<Flags<N>>,
        needed: impl Into<Flags<N>>,
    ) -> Result<Mask> {
        let (current, needed) = self.operands(current, needed)?;
        Ok(needed.without(current))
    }
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

impl<N: Serialize> Serialize for FlagSet<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, bit) in &self.entries {
            map.serialize_entry(name, bit)?;
        }
        map.end()
    }
}

/// Deserializing always validates, as [`FlagSet::try_new`] does.
impl<'de, N> Deserialize<'de> for FlagSet<N>
where
    N: Deserialize<'de> + Ord + Clone + fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let definitions = FlagDefinitions::<N>::deserialize(deserializer)?;
        Self::try_new(definitions).map_err(D::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================
