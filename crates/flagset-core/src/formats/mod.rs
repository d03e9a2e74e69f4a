//! # Formats Module
//!
//! Binary encodings for masks and definition tables.
//!
//! This module contains:
//! - Mask encoding (postcard varint)
//! - Definitions snapshot (magic + version header + postcard body)
//!
//! Note: File I/O and text wrapping (base64, JSON) remain in the app layer
//! (apps/flagset). This module only handles format conversion.

mod codec;

pub use codec::*;
