//! Error types for decoding ASN.1 primitive values.

use std::num::ParseIntError;

use der::Tag;
use thiserror::Error;

/// Errors raised while turning a DER value into a typed primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Der(#[from] der::Error),
    #[error("expected {expected}, got {actual}")]
    UnexpectedTag {
        expected: &'static str,
        actual: Tag,
    },

    // Boolean errors
    #[error("BOOLEAN: invalid encoding")]
    InvalidBoolean,

    // Integer errors
    #[error("INTEGER: no data")]
    IntegerNoData,

    // ObjectIdentifier errors
    #[error("OBJECT IDENTIFIER: no data")]
    ObjectIdentifierNoData,
    #[error("OBJECT IDENTIFIER: incomplete encoding")]
    ObjectIdentifierIncompleteEncoding,
    #[error("OBJECT IDENTIFIER: component too large")]
    ObjectIdentifierComponentTooLarge,
    #[error("OBJECT IDENTIFIER: too few components (need at least 2)")]
    ObjectIdentifierTooFewComponents,
    #[error("OBJECT IDENTIFIER: invalid component '{0}'")]
    ObjectIdentifierInvalidComponent(String),
    #[error("parse int error: {0}")]
    ParseInt(ParseIntError),

    // BitString errors
    #[error("BIT STRING: no data")]
    BitStringNoData,
    #[error("BIT STRING: unused bits {0} out of range (must be 0-7)")]
    BitStringUnusedBitsOutOfRange(u8),

    // String type errors
    #[error("UTF8String: invalid UTF-8")]
    Utf8StringInvalidUtf8,
    #[error("PrintableString: invalid encoding")]
    PrintableStringInvalidEncoding,
    #[error("IA5String: invalid encoding")]
    Ia5StringInvalidEncoding,
    #[error("BMPString: odd length {0}")]
    BmpStringOddLength(usize),
    #[error("BMPString: invalid UTF-16")]
    BmpStringInvalidUtf16,

    // Time errors
    #[error("UTCTime: invalid format '{0}'")]
    UtcTimeInvalidFormat(String),
    #[error("GeneralizedTime: invalid format '{0}'")]
    GeneralizedTimeInvalidFormat(String),
}
