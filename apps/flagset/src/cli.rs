//! # CLI Module
//!
//! Command implementations for the `flagset` binary.
//!
//! Each `cmd_*` function loads the registry, evaluates one operation and
//! prints the outcome to stdout, either as text or as a single JSON object.
//! The evaluation itself lives in the `evaluate_*` functions so it can be
//! tested without capturing output.

use crate::CliResult;
use crate::config::{Validation, load_registry, save_snapshot};
use crate::operand::parse_operand;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flagset_core::formats::{decode_mask, encode_mask};
use flagset_core::{FlagSet, Mask};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

// =============================================================================
// OPERATIONS
// =============================================================================

/// Binary operations producing a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskOp {
    /// `current ^ needed`
    Difference,
    /// `current | needed`
    Add,
    /// `current ^ needed`, same as `Difference`
    Remove,
    /// `current & !needed`
    Clear,
    /// `needed & !current`
    Missing,
}

impl MaskOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Difference => "difference",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Clear => "clear",
            Self::Missing => "missing",
        }
    }

    fn apply(self, flags: &FlagSet<String>, current: Mask, needed: Mask) -> CliResult<Mask> {
        let mask = match self {
            Self::Difference => flags.difference(current, needed)?,
            Self::Add => flags.add(current, needed)?,
            Self::Remove => flags.remove(current, needed)?,
            Self::Clear => flags.clear(current, needed)?,
            Self::Missing => flags.missing(current, needed)?,
        };
        Ok(mask)
    }
}

// =============================================================================
// REPORTS
// =============================================================================

/// A mask together with what the registry makes of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskReport {
    pub operation: &'static str,
    pub mask: Mask,
    pub hex: String,
    pub names: Vec<String>,
    /// Bits of `mask` with no defined name.
    pub unknown_bits: Mask,
}

impl MaskReport {
    fn new(operation: &'static str, flags: &FlagSet<String>, mask: Mask) -> Self {
        let unknown_bits = flags.unknown_bits(mask);
        if !unknown_bits.is_empty() {
            warn!(
                operation,
                unknown = %format!("{unknown_bits:#x}"),
                "mask carries undefined bits"
            );
        }
        Self {
            operation,
            mask,
            hex: format!("{mask:#x}"),
            names: flags.resolve(mask).into_iter().cloned().collect(),
            unknown_bits,
        }
    }

    pub fn to_text(&self) -> String {
        let mut output = format!("{} ({}) [{}]", self.mask, self.hex, self.names.join(", "));
        if !self.unknown_bits.is_empty() {
            output.push_str(&format!(" unknown bits: {:#x}", self.unknown_bits));
        }
        output
    }
}

/// Result of a subset or overlap check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub operation: &'static str,
    pub current: Mask,
    pub needed: Mask,
    pub result: bool,
    /// Bits of `needed` absent from `current`.
    pub missing: Vec<String>,
}

/// One row of `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionRow {
    pub name: String,
    pub mask: Mask,
    pub positions: Vec<u32>,
}

/// Encoded form of a mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedReport {
    pub mask: Mask,
    pub base64: String,
    pub bytes: usize,
}

/// Render a report the way `cmd_*` prints it.
pub fn render<T: Serialize>(
    report: &T,
    json: bool,
    text: impl FnOnce(&T) -> String,
) -> CliResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(text(report))
    }
}

fn emit<T: Serialize>(report: &T, json: bool, text: impl FnOnce(&T) -> String) -> CliResult<()> {
    println!("{}", render(report, json, text)?);
    Ok(())
}

fn validation(unchecked: bool) -> Validation {
    if unchecked {
        Validation::Unchecked
    } else {
        Validation::Strict
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

/// Resolve a textual operand against the registry.
pub fn evaluate_operand(flags: &FlagSet<String>, operand: &str) -> CliResult<Mask> {
    let parsed = parse_operand(operand)?;
    debug!(operand, ?parsed, "operand parsed");
    Ok(flags.mask_of(parsed)?)
}

pub fn evaluate_merge(flags: &FlagSet<String>, names: &str) -> CliResult<MaskReport> {
    let mask = evaluate_operand(flags, names)?;
    Ok(MaskReport::new("merge", flags, mask))
}

pub fn evaluate_resolve(flags: &FlagSet<String>, operand: &str) -> CliResult<MaskReport> {
    let mask = evaluate_operand(flags, operand)?;
    Ok(MaskReport::new("resolve", flags, mask))
}

pub fn evaluate_has(
    flags: &FlagSet<String>,
    current: &str,
    needed: &str,
    any: bool,
) -> CliResult<CheckReport> {
    let current = evaluate_operand(flags, current)?;
    let needed = evaluate_operand(flags, needed)?;
    let result = if any {
        flags.intersects(current, needed)?
    } else {
        flags.has(current, needed)?
    };
    let missing = flags.missing(current, needed)?;

    Ok(CheckReport {
        operation: if any { "intersects" } else { "has" },
        current,
        needed,
        result,
        missing: flags.resolve(missing).into_iter().cloned().collect(),
    })
}

pub fn evaluate_combine(
    flags: &FlagSet<String>,
    op: MaskOp,
    current: &str,
    needed: &str,
) -> CliResult<MaskReport> {
    let current = evaluate_operand(flags, current)?;
    let needed = evaluate_operand(flags, needed)?;
    let mask = op.apply(flags, current, needed)?;
    Ok(MaskReport::new(op.name(), flags, mask))
}

pub fn evaluate_inspect(flags: &FlagSet<String>) -> Vec<DefinitionRow> {
    flags
        .iter()
        .map(|(name, mask)| DefinitionRow {
            name: name.clone(),
            mask,
            positions: mask.positions().collect(),
        })
        .collect()
}

pub fn evaluate_encode(flags: &FlagSet<String>, operand: &str) -> CliResult<EncodedReport> {
    let mask = evaluate_operand(flags, operand)?;
    let bytes = encode_mask(mask)?;
    Ok(EncodedReport {
        mask,
        base64: BASE64.encode(&bytes),
        bytes: bytes.len(),
    })
}

pub fn evaluate_decode(flags: &FlagSet<String>, encoded: &str) -> CliResult<MaskReport> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| format!("invalid base64 '{encoded}': {e}"))?;
    let mask = decode_mask(&bytes)?;
    Ok(MaskReport::new("decode", flags, mask))
}

// =============================================================================
// COMMANDS
// =============================================================================

/// List every definition in order.
pub fn cmd_inspect(definitions: &Path, unchecked: bool, json: bool) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    let rows = evaluate_inspect(&flags);

    emit(&rows, json, |rows| {
        let mut output = format!("{} flag(s), all = {:#x}\n", rows.len(), flags.all());
        for row in rows {
            let positions: Vec<String> = row.positions.iter().map(|p| p.to_string()).collect();
            output.push_str(&format!(
                "  {:<16} {:>40} bit {}\n",
                row.name,
                format!("{:#x}", row.mask),
                positions.join("+")
            ));
        }
        output.trim_end().to_string()
    })
}

/// Compose names into a mask.
pub fn cmd_merge(definitions: &Path, unchecked: bool, json: bool, names: &str) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    let report = evaluate_merge(&flags, names)?;
    emit(&report, json, MaskReport::to_text)
}

/// Turn a mask back into names.
pub fn cmd_resolve(definitions: &Path, unchecked: bool, json: bool, mask: &str) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    let report = evaluate_resolve(&flags, mask)?;
    emit(&report, json, MaskReport::to_text)
}

/// Subset test, or overlap test when `any` is set.
pub fn cmd_has(
    definitions: &Path,
    unchecked: bool,
    json: bool,
    current: &str,
    needed: &str,
    any: bool,
) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    let report = evaluate_has(&flags, current, needed, any)?;
    emit(&report, json, |r| {
        if r.missing.is_empty() {
            r.result.to_string()
        } else {
            format!("{} (missing: {})", r.result, r.missing.join(", "))
        }
    })
}

/// Apply a binary mask operation.
pub fn cmd_combine(
    definitions: &Path,
    unchecked: bool,
    json: bool,
    op: MaskOp,
    current: &str,
    needed: &str,
) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    let report = evaluate_combine(&flags, op, current, needed)?;
    emit(&report, json, MaskReport::to_text)
}

/// Print the base64 varint encoding of an operand.
pub fn cmd_encode(definitions: &Path, unchecked: bool, json: bool, operand: &str) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    let report = evaluate_encode(&flags, operand)?;
    emit(&report, json, |r| r.base64.clone())
}

/// Decode a base64 varint mask and resolve it.
pub fn cmd_decode(definitions: &Path, unchecked: bool, json: bool, encoded: &str) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    let report = evaluate_decode(&flags, encoded)?;
    emit(&report, json, MaskReport::to_text)
}

/// Write the loaded registry as a binary snapshot.
pub fn cmd_snapshot(definitions: &Path, unchecked: bool, output: &Path) -> CliResult<()> {
    let flags = load_registry(definitions, validation(unchecked))?;
    save_snapshot(&flags, output)
}

// =============================================================================
// TESTS
// =============================================================================
