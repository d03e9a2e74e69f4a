//! # Flagset Core
//!
//! The deterministic bitmask flag registry.
//!
//! A [`FlagSet`] binds human-readable names to single-bit values and offers
//! composition ([`FlagSet::merge`]), inspection ([`FlagSet::has`],
//! [`FlagSet::resolve`]) and set algebra ([`FlagSet::add`],
//! [`FlagSet::difference`], [`FlagSet::remove`]) over the resulting [`Mask`]
//! values.
//!
//! ```
//! use flagset_core::{FlagSet, Mask};
//!
//! let languages = FlagSet::try_new([
//!     ("EN", Mask::bit(0)),
//!     ("FR", Mask::bit(1)),
//!     ("DE", Mask::bit(2)),
//! ])?;
//!
//! let spoken = languages.merge(["EN", "FR", "DE", "EN"])?;
//! assert_eq!(spoken.bits(), 7);
//!
//! let others = languages.difference(spoken, ["EN"])?;
//! assert_eq!(languages.resolve(others), vec![&"FR", &"DE"]);
//! # Ok::<(), flagset_core::FlagError>(())
//! ```
//!
//! All data structures use `BTreeMap` for deterministic ordering. Nothing in
//! this crate performs I/O, logs or allocates shared mutable state.

pub mod definitions;
pub mod error;
pub mod formats;
pub mod mask;
pub mod registry;
pub mod selector;

pub use definitions::FlagDefinitions;
pub use error::{DefinitionIssue, FlagError};
pub use mask::Mask;
pub use registry::FlagSet;
pub use selector::Flags;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FlagError>;
