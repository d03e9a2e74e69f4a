//! # Mask Module
//!
//! The plain value produced and consumed by registry operations.
//!
//! A [`Mask`] carries no back-reference to the registry that produced it:
//! any registry can operate on any mask, and bits without a defined name are
//! simply carried along.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A combination of flag bits.
///
/// Backed by a `u128`, so a registry can hold up to [`Mask::MAX_FLAGS`]
/// distinct flags. Serializes as a bare unsigned integer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Mask(pub u128);

impl Mask {
    /// The mask with no bits set.
    pub const EMPTY: Self = Self(0);

    /// Number of distinct single-bit values a mask can hold.
    pub const MAX_FLAGS: usize = u128::BITS as usize;

    /// The single-bit mask `1 << position`.
    ///
    /// Positions past [`Mask::MAX_FLAGS`] yield [`Mask::EMPTY`]; use
    /// [`Mask::checked_bit`] to detect them. An empty definition resolves
    /// from every mask, so build registries with [`FlagSet::try_new`],
    /// which rejects it.
    ///
    /// [`FlagSet::try_new`]: crate::FlagSet::try_new
    #[must_use]
    pub const fn bit(position: u32) -> Self {
        match Self::checked_bit(position) {
            Some(mask) => mask,
            None => Self::EMPTY,
        }
    }

    /// The single-bit mask `1 << position`, or `None` when out of range.
    #[must_use]
    pub const fn checked_bit(position: u32) -> Option<Self> {
        match 1u128.checked_shl(position) {
            Some(bits) => Some(Self(bits)),
            None => None,
        }
    }

    /// Raw integer value.
    #[must_use]
    pub const fn bits(self) -> u128 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True iff every bit of `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True iff the two masks share at least one bit.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Bits set in exactly one of the two masks.
    #[must_use]
    pub const fn symmetric_difference(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// Bits of `self` that are not set in `other`.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Number of set bits.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// True iff exactly one bit is set (the value is a power of two).
    #[must_use]
    pub const fn is_single_bit(self) -> bool {
        self.0.is_power_of_two()
    }

    /// Positions of the set bits, lowest first.
    pub fn positions(self) -> impl Iterator<Item = u32> {
        let mut remaining = self.0;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let position = remaining.trailing_zeros();
            remaining &= remaining - 1;
            Some(position)
        })
    }
}

impl From<u128> for Mask {
    fn from(bits: u128) -> Self {
        Self(bits)
    }
}

impl From<Mask> for u128 {
    fn from(mask: Mask) -> Self {
        mask.0
    }
}

impl FromIterator<Mask> for Mask {
    fn from_iter<I: IntoIterator<Item = Mask>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::union)
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

impl BitOr for Mask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Mask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for Mask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitXor for Mask {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.symmetric_difference(rhs)
    }
}

impl BitXorAssign for Mask {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Mask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

// =============================================================================
// FORMATTING
// =============================================================================

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Binary for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

// =============================================================================
// TESTS
// =============================================================================
