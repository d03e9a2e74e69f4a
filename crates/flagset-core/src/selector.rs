//! # Selector Module
//!
//! Operands accepted by the comparison and set-algebra operations.
//!
//! An operand is either an already-composed [`Mask`], a single name, or a
//! sequence of names. The registry resolves it into one canonical `Mask`
//! before any bit arithmetic takes place.

use crate::Mask;

/// A mask, a single flag name, or a sequence of flag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flags<N> {
    Mask(Mask),
    Name(N),
    Names(Vec<N>),
}

impl<N> Flags<N> {
    /// A single name.
    pub fn name(name: N) -> Self {
        Self::Name(name)
    }

    /// A sequence of names. Duplicates are permitted.
    pub fn names(names: impl IntoIterator<Item = N>) -> Self {
        Self::Names(names.into_iter().collect())
    }

    /// The raw mask, if this operand needs no name lookup.
    pub fn as_mask(&self) -> Option<Mask> {
        match self {
            Self::Mask(mask) => Some(*mask),
            Self::Name(_) | Self::Names(_) => None,
        }
    }
}

impl<N> Default for Flags<N> {
    fn default() -> Self {
        Self::Mask(Mask::EMPTY)
    }
}

impl<N> From<Mask> for Flags<N> {
    fn from(mask: Mask) -> Self {
        Self::Mask(mask)
    }
}

impl<N> From<Vec<N>> for Flags<N> {
    fn from(names: Vec<N>) -> Self {
        Self::Names(names)
    }
}

impl<N, const K: usize> From<[N; K]> for Flags<N> {
    fn from(names: [N; K]) -> Self {
        Self::Names(names.into())
    }
}
