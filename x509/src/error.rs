use der::Tag;
use thiserror::Error;

use crate::extensions;

/// Certificate-level parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Der(#[from] der::Error),
    #[error(transparent)]
    Asn1(#[from] asn1::Error),
    #[error(transparent)]
    Pem(#[from] pem::error::Error),
    #[error(transparent)]
    Extension(#[from] extensions::Error),

    #[error("{0}: missing {1}")]
    MissingField(&'static str, &'static str),
    #[error("{context}: expected {expected}, got {actual}")]
    ExpectedTag {
        context: &'static str,
        expected: Tag,
        actual: Tag,
    },
    #[error("invalid version: {0}")]
    InvalidVersion(String),
    #[error("{0}: unexpected trailing fields")]
    TrailingFields(&'static str),

    // Bundle errors
    #[error("cannot parse {0} block")]
    UnexpectedBlock(String),
    #[error("cannot find any PEM block")]
    NoPemBlock,
}

pub type Result<T> = std::result::Result<T, Error>;
