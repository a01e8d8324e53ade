//! Error types for the Buckaroo NVP protocol core.
//!
//! All of these are caller errors: they describe input that has to be fixed
//! before a request can be sent, never a condition worth retrying.

/// A field set could not be built from the given pairs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldMapError {
    /// Two fields share a name once case is ignored.
    #[error("duplicate field '{name}'")]
    DuplicateField {
        /// The name of the second occurrence, as it was given.
        name: String,
    },
}

/// Signing or verifying a field set failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The shared secret is empty.
    #[error("signing secret is empty")]
    EmptySecret,
}

/// Request parameters failed validation before anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A required parameter is absent or blank.
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),
}
