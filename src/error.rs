//! Error types for digi-core
//!
//! Formatting of kinds, auris and mounts is total; errors only arise when
//! parsing addresses back, reading mounts out of model documents, or
//! wiring schemes and controllers together at start-up.

use thiserror::Error;

/// Unified error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Addressing Errors
    // =========================================================================
    #[error("Invalid auri {input:?}: {reason}")]
    AuriParse { input: String, reason: String },

    #[error("Invalid group/version/resource {input:?}: {reason}")]
    GvrParse { input: String, reason: String },

    #[error("Invalid mount at {path}: {reason}")]
    MountParse { path: String, reason: String },

    // =========================================================================
    // Registration Errors
    // =========================================================================
    #[error("Kind not registered in scheme: {kind}")]
    KindNotRegistered { kind: String },

    #[error("Controller already registered: {name}")]
    ControllerExists { name: String },

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML serialize error: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),
}

/// Result type alias for digi-core
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::KindNotRegistered {
            kind: "digi.dev/v1/Lamp".into(),
        };
        assert_eq!(err.to_string(), "Kind not registered in scheme: digi.dev/v1/Lamp");

        let err = Error::AuriParse {
            input: "lamps".into(),
            reason: "expected 5 segments".into(),
        };
        assert_eq!(err.to_string(), "Invalid auri \"lamps\": expected 5 segments");
    }
}
