//! # Error Module
//!
//! Failure conditions of the flag registry.
//!
//! Only name lookups, construction-time validation and the binary formats
//! can fail. Every other operation is total.

use thiserror::Error;

/// Errors produced by the flag registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// A name was looked up that the registry does not define.
    #[error("unknown flag name '{name}'")]
    UnknownFlagName { name: String },

    /// A definition was rejected by a validating constructor.
    #[error("invalid flag definition '{name}': {issue}")]
    InvalidFlagDefinition { name: String, issue: DefinitionIssue },

    /// A binary encoding could not be produced or read back.
    #[error("format error: {0}")]
    Format(String),
}

/// Why a definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionIssue {
    #[error("value {bits:#x} does not have exactly one bit set")]
    NotSingleBit { bits: u128 },

    #[error("bit is already bound to '{with}'")]
    Collision { with: String },

    #[error("name is defined more than once")]
    DuplicateName,

    #[error("a registry holds at most {max} flags")]
    TooManyFlags { max: usize },
}

impl FlagError {
    pub fn unknown(name: impl std::fmt::Display) -> Self {
        Self::UnknownFlagName {
            name: name.to_string(),
        }
    }

    pub fn invalid(name: impl std::fmt::Display, issue: DefinitionIssue) -> Self {
        Self::InvalidFlagDefinition {
            name: name.to_string(),
            issue,
        }
    }

    pub fn format(details: impl Into<String>) -> Self {
        Self::Format(details.into())
    }
}

impl From<postcard::Error> for FlagError {
    fn from(err: postcard::Error) -> Self {
        Self::Format(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_message_names_the_offender() {
        let err = FlagError::unknown("XX");
        assert_eq!(err.to_string(), "unknown flag name 'XX'");
    }

    #[test]
    fn invalid_definition_message_includes_issue() {
        let err = FlagError::invalid("BOTH", DefinitionIssue::NotSingleBit { bits: 3 });
        assert_eq!(
            err.to_string(),
            "invalid flag definition 'BOTH': value 0x3 does not have exactly one bit set"
        );

        let err = FlagError::invalid(
            "FR",
            DefinitionIssue::Collision {
                with: "EN".to_string(),
            },
        );
        assert!(err.to_string().contains("already bound to 'EN'"));
    }
}
