//! # Config Module
//!
//! Loading a flag registry from disk.
//!
//! Two formats are accepted, told apart by their first bytes:
//! - a binary snapshot (starts with `FLGS`, see `flagset_core::formats`)
//! - a JSON object mapping names to single-bit integers, in definition order:
//!
//! ```json
//! { "EN": 1, "FR": 2, "DE": 4, "ES": 8, "IT": 16 }
//! ```

use crate::CliResult;
use flagset_core::formats::{SNAPSHOT_MAGIC, decode_snapshot, encode_definitions};
use flagset_core::{FlagDefinitions, FlagSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// How strictly definitions are checked on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Reject multi-bit values, shared bits and repeated names.
    #[default]
    Strict,
    /// Take the table as written.
    Unchecked,
}

/// Load a registry from a JSON definitions file or a binary snapshot.
pub fn load_registry(path: &Path, validation: Validation) -> CliResult<FlagSet<String>> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("cannot read definitions '{}': {e}", path.display()))?;

    let flags = if bytes.starts_with(&SNAPSHOT_MAGIC) {
        debug!(path = %path.display(), "reading binary snapshot");
        build_registry(decode_snapshot(&bytes)?, validation)?
    } else {
        debug!(path = %path.display(), "reading JSON definitions");
        parse_definitions(&bytes, validation)?
    };

    info!(path = %path.display(), flags = flags.len(), "registry loaded");
    Ok(flags)
}

/// Parse a JSON definitions document.
pub fn parse_definitions(json: &[u8], validation: Validation) -> CliResult<FlagSet<String>> {
    let definitions: FlagDefinitions<String> =
        serde_json::from_slice(json).map_err(|e| format!("invalid definitions JSON: {e}"))?;
    build_registry(definitions, validation)
}

fn build_registry(
    definitions: FlagDefinitions<String>,
    validation: Validation,
) -> CliResult<FlagSet<String>> {
    match validation {
        Validation::Strict => Ok(FlagSet::try_new(definitions)?),
        Validation::Unchecked => {
            if let Err(issue) = definitions.validate() {
                warn!(%issue, "loading malformed definitions unchecked");
            }
            Ok(FlagSet::new(definitions))
        }
    }
}

/// Write a registry as a binary snapshot.
pub fn save_snapshot(flags: &FlagSet<String>, path: &Path) -> CliResult<()> {
    let bytes = encode_definitions(flags)?;
    std::fs::write(path, &bytes)
        .map_err(|e| format!("cannot write snapshot '{}': {e}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagset_core::Mask;

    #[test]
    fn strict_parse_accepts_well_formed_json() {
        let flags = parse_definitions(br#"{"EN": 1, "FR": 2}"#, Validation::Strict);
        let flags = flags.ok();
        assert_eq!(flags.as_ref().map(|f| f.len()), Some(2));
        assert_eq!(flags.and_then(|f| f.get("FR")), Some(Mask(2)));
    }

    #[test]
    fn strict_parse_rejects_shared_bits() {
        let result = parse_definitions(br#"{"EN": 1, "FR": 1}"#, Validation::Strict);
        assert!(result.is_err());
    }

    #[test]
    fn unchecked_parse_keeps_shared_bits() {
        let flags = parse_definitions(br#"{"EN": 1, "ALIAS": 1}"#, Validation::Unchecked).ok();
        assert_eq!(flags.map(|f| f.resolve(Mask(1)).len()), Some(2));
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(parse_definitions(b"[1, 2]", Validation::Strict).is_err());
        assert!(parse_definitions(br#"{"EN": -1}"#, Validation::Unchecked).is_err());
    }

    #[test]
    fn snapshot_follows_requested_validation() {
        let dir = tempfile::tempdir().ok();
        let path = dir.as_ref().map(|d| d.path().join("shared.flgs"));
        let Some(path) = path else { return };

        let flags = parse_definitions(br#"{"READ": 1, "VIEW": 1}"#, Validation::Unchecked);
        let saved = flags.map(|f| save_snapshot(&f, &path).is_ok()).ok();
        assert_eq!(saved, Some(true));

        let strict = load_registry(&path, Validation::Strict).map_err(|e| e.to_string());
        assert!(strict.is_err_and(|e| e.contains("VIEW")));

        let unchecked = load_registry(&path, Validation::Unchecked).ok();
        assert_eq!(unchecked.map(|f| f.resolve(Mask(1)).len()), Some(2));
    }
}
