use base64::DecodeError;
use thiserror::Error;

/// Errors raised while scanning or decoding PEM blocks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// No `-----BEGIN ...-----` line was found.
    #[error("missing a pre encapsulation boundary")]
    MissingPreEncapsulationBoundary,

    /// A block was opened but never closed.
    #[error("missing a post encapsulation boundary for {0}")]
    MissingPostEncapsulationBoundary(String),

    #[error("missing PEM data")]
    MissingData,

    /// BEGIN and END labels differ, e.g. BEGIN CERTIFICATE / END PRIVATE KEY.
    #[error("label doesn't match: BEGIN {begin}, END {end}")]
    LabelMissMatch { begin: String, end: String },

    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),
}
