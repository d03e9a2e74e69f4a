//! # Operand Module
//!
//! Command-line operand syntax.
//!
//! | Input            | Meaning                         |
//! |------------------|---------------------------------|
//! | `-` or empty     | the empty mask                  |
//! | `42`             | raw mask, decimal               |
//! | `0x2a`, `0X2A`   | raw mask, hexadecimal           |
//! | `0b101010`       | raw mask, binary                |
//! | `EN,FR,DE`       | names, comma separated          |
//!
//! Names made only of decimal digits are therefore read as masks.

use flagset_core::{Flags, Mask};
use thiserror::Error;

/// A malformed mask literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mask literal '{input}': {reason}")]
pub struct OperandError {
    input: String,
    reason: String,
}

/// Parse one operand into a mask or a list of names.
pub fn parse_operand(input: &str) -> Result<Flags<String>, OperandError> {
    let input = input.trim();
    if input.is_empty() || input == "-" {
        return Ok(Flags::Mask(Mask::EMPTY));
    }

    let radix_body = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .map(|body| (16, body))
        .or_else(|| {
            input
                .strip_prefix("0b")
                .or_else(|| input.strip_prefix("0B"))
                .map(|body| (2, body))
        });

    if let Some((radix, body)) = radix_body {
        return parse_bits(input, body.replace('_', "").as_str(), radix).map(Flags::Mask);
    }

    if input.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
        return parse_bits(input, input.replace('_', "").as_str(), 10).map(Flags::Mask);
    }

    Ok(Flags::names(
        input
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    ))
}

fn parse_bits(input: &str, digits: &str, radix: u32) -> Result<Mask, OperandError> {
    u128::from_str_radix(digits, radix)
        .map(Mask)
        .map_err(|e| OperandError {
            input: input.to_string(),
            reason: e.to_string(),
        })
}
