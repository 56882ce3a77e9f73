//! Extension-specific error types

use der::Tag;
use thiserror::Error;

/// Context for where an extension error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Extension,
    AuthorityKeyIdentifier,
    SubjectKeyIdentifier,
    KeyUsage,
    CertificatePolicies,
    SubjectAltName,
    IssuerAltName,
    GeneralName,
    BasicConstraints,
    ExtendedKeyUsage,
    CRLDistributionPoints,
    AuthorityInfoAccess,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extension => write!(f, "Extension"),
            Self::AuthorityKeyIdentifier => write!(f, "AuthorityKeyIdentifier"),
            Self::SubjectKeyIdentifier => write!(f, "SubjectKeyIdentifier"),
            Self::KeyUsage => write!(f, "KeyUsage"),
            Self::CertificatePolicies => write!(f, "CertificatePolicies"),
            Self::SubjectAltName => write!(f, "SubjectAltName"),
            Self::IssuerAltName => write!(f, "IssuerAltName"),
            Self::GeneralName => write!(f, "GeneralName"),
            Self::BasicConstraints => write!(f, "BasicConstraints"),
            Self::ExtendedKeyUsage => write!(f, "ExtendedKeyUsage"),
            Self::CRLDistributionPoints => write!(f, "CRLDistributionPoints"),
            Self::AuthorityInfoAccess => write!(f, "AuthorityInfoAccess"),
        }
    }
}

/// Extension parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Malformed encoding
    #[error(transparent)]
    Der(#[from] der::Error),
    #[error(transparent)]
    Asn1(#[from] asn1::Error),

    // Structural errors
    #[error("{kind}: expected {expected}, got {actual}")]
    ExpectedTag {
        kind: Kind,
        expected: Tag,
        actual: Tag,
    },
    #[error("{kind}: unexpected {actual}")]
    UnexpectedTag { kind: Kind, actual: Tag },
    #[error("{0}: missing {1}")]
    MissingField(Kind, &'static str),

    // CHOICE alternatives outside the known range
    #[error("unsupported distribution point tag {0}")]
    UnsupportedChoice(u32),

    // BasicConstraints specific errors
    #[error("BasicConstraints: pathLenConstraint out of range for u32")]
    PathLenConstraintOutOfRange,
}

/// Result type for extension operations
pub type Result<T> = std::result::Result<T, Error>;
