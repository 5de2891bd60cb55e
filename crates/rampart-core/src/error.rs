//! Error types.

use thiserror::Error;

use crate::enums::CompanionKind;
use crate::types::StructureId;

/// Rejected structure operations.
#[derive(Debug, Error, PartialEq)]
pub enum StructureError {
    #[error("degenerate structure bounds {width}x{height}")]
    DegenerateBounds { width: f32, height: f32 },

    #[error("no structure with id {0}")]
    UnknownStructure(StructureId),
}

/// Rejected companion operations.
#[derive(Debug, Error, PartialEq)]
pub enum CompanionError {
    #[error("companion kind `{}` is not unlocked", .0.as_str())]
    Locked(CompanionKind),
}

/// Failure loading or validating a `FortressConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse fortress config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}
