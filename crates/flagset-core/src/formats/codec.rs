//! Mask and snapshot codecs.
//!
//! A mask travels as a variable-length unsigned integer: small masks take a
//! single byte, the widest take 19.
//!
//! A snapshot is laid out as:
//!
//! ```text
//! ┌──────────┬─────────────┬──────────────────────────────────┐
//! │ "FLGS"   │ version u16 │ postcard map { name -> mask }    │
//! │ 4 bytes  │ LE, 2 bytes │ definition order                 │
//! └──────────┴─────────────┴──────────────────────────────────┘
//! ```

use crate::{FlagDefinitions, FlagError, FlagSet, Mask, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Magic bytes opening every definitions snapshot.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"FLGS";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;

const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + size_of::<u16>();

// =============================================================================
// MASK
// =============================================================================

/// Encode a mask as a varint.
pub fn encode_mask(mask: Mask) -> Result<Vec<u8>> {
    Ok(postcard::to_allocvec(&mask)?)
}

/// Decode a varint mask. The input must contain exactly one value.
pub fn decode_mask(bytes: &[u8]) -> Result<Mask> {
    let (mask, rest) = postcard::take_from_bytes::<Mask>(bytes)?;
    if !rest.is_empty() {
        return Err(FlagError::format(format!(
            "{} trailing byte(s) after mask",
            rest.len()
        )));
    }
    Ok(mask)
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Encode a registry's definition table as a versioned snapshot.
pub fn encode_definitions<N>(flags: &FlagSet<N>) -> Result<Vec<u8>>
where
    N: Serialize,
{
    let body = postcard::to_allocvec(flags)?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
    bytes.extend_from_slice(&SNAPSHOT_MAGIC);
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decode a snapshot back into a validated registry.
pub fn decode_definitions<N>(bytes: &[u8]) -> Result<FlagSet<N>>
where
    N: DeserializeOwned + Ord + Clone + fmt::Display,
{
    FlagSet::try_new(decode_snapshot(bytes)?)
}

/// Decode a snapshot into its raw definition table, leaving validation to
/// the caller.
pub fn decode_snapshot<N>(bytes: &[u8]) -> Result<FlagDefinitions<N>>
where
    N: DeserializeOwned,
{
    let (magic, rest) = bytes
        .split_first_chunk::<4>()
        .ok_or_else(|| FlagError::format("snapshot is shorter than its header"))?;
    if *magic != SNAPSHOT_MAGIC {
        return Err(FlagError::format("not a flag definitions snapshot"));
    }

    let (version, body) = rest
        .split_first_chunk::<2>()
        .ok_or_else(|| FlagError::format("snapshot is shorter than its header"))?;
    let version = u16::from_le_bytes(*version);
    if version != SNAPSHOT_VERSION {
        return Err(FlagError::format(format!(
            "unsupported snapshot version {version}"
        )));
    }

    let (definitions, rest) = postcard::take_from_bytes::<FlagDefinitions<N>>(body)?;
    if !rest.is_empty() {
        return Err(FlagError::format(format!(
            "{} trailing byte(s) after snapshot",
            rest.len()
        )));
    }
    Ok(definitions)
}

// =============================================================================
// TESTS
// =============================================================================
