use asn1::{Boolean, ObjectIdentifier, OctetString, Text};
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};
use serde::Serialize;

// Submodules
mod authority_info_access;
mod authority_key_identifier;
mod basic_constraints;
mod certificate_policies;
mod crl_distribution_points;
pub mod error;
mod extended_key_usage;
mod general_name;
mod issuer_alt_name;
mod key_usage;
pub mod registry;
mod sct;
mod subject_alt_name;
mod subject_key_identifier;

// Re-export public types
pub use authority_info_access::{AccessDescription, AuthorityInfoAccess};
pub use authority_key_identifier::AuthorityKeyIdentifier;
pub use basic_constraints::BasicConstraints;
pub use certificate_policies::{CertificatePolicies, PolicyInformation, PolicyQualifierInfo};
pub use crl_distribution_points::{
    CRLDistributionPoints, DistributionPoint, DistributionPointName, ReasonFlags,
};
pub use error::{Error, Kind};
pub use extended_key_usage::ExtendedKeyUsage;
pub use general_name::{
    GeneralName, OtherName, decode_general_name, decode_general_names,
    decode_general_names_content, group_general_names,
};
pub use issuer_alt_name::IssuerAltName;
pub use key_usage::KeyUsage;
pub use sct::SignedCertificateTimestampList;
pub use subject_alt_name::SubjectAltName;
pub use subject_key_identifier::SubjectKeyIdentifier;

/// Display name used for extensions without a decoder.
pub const UNKNOWN_EXTENSION_NAME: &str = "-N/A-";

/// Trait for typed X.509 extensions.
///
/// `parse` receives the content of the extension's OCTET STRING, which is
/// itself the DER encoding of the extension-specific structure.
pub trait StandardExtension: Sized {
    /// The OID of this extension type as a string (e.g., "2.5.29.19" for BasicConstraints)
    const OID: &'static str;
    /// Display name, e.g. "Basic Constraints".
    const NAME: &'static str;

    fn parse(value: &[u8]) -> error::Result<Self>;

    /// Display lines, one value per line.
    fn lines(&self) -> Vec<String>;
}

/// Extensions with a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    AuthorityKeyIdentifier,
    SubjectKeyIdentifier,
    KeyUsage,
    CertificatePolicies,
    SubjectAltName,
    IssuerAltName,
    BasicConstraints,
    ExtendedKeyUsage,
    CRLDistributionPoints,
    AuthorityInfoAccess,
    SignedCertificateTimestampList,
}

impl ExtensionKind {
    pub fn from_oid(oid: &str) -> Option<Self> {
        let kind = match oid {
            AuthorityKeyIdentifier::OID => Self::AuthorityKeyIdentifier,
            SubjectKeyIdentifier::OID => Self::SubjectKeyIdentifier,
            KeyUsage::OID => Self::KeyUsage,
            CertificatePolicies::OID => Self::CertificatePolicies,
            SubjectAltName::OID => Self::SubjectAltName,
            IssuerAltName::OID => Self::IssuerAltName,
            BasicConstraints::OID => Self::BasicConstraints,
            ExtendedKeyUsage::OID => Self::ExtendedKeyUsage,
            CRLDistributionPoints::OID => Self::CRLDistributionPoints,
            AuthorityInfoAccess::OID => Self::AuthorityInfoAccess,
            SignedCertificateTimestampList::OID => Self::SignedCertificateTimestampList,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthorityKeyIdentifier => AuthorityKeyIdentifier::NAME,
            Self::SubjectKeyIdentifier => SubjectKeyIdentifier::NAME,
            Self::KeyUsage => KeyUsage::NAME,
            Self::CertificatePolicies => CertificatePolicies::NAME,
            Self::SubjectAltName => SubjectAltName::NAME,
            Self::IssuerAltName => IssuerAltName::NAME,
            Self::BasicConstraints => BasicConstraints::NAME,
            Self::ExtendedKeyUsage => ExtendedKeyUsage::NAME,
            Self::CRLDistributionPoints => CRLDistributionPoints::NAME,
            Self::AuthorityInfoAccess => AuthorityInfoAccess::NAME,
            Self::SignedCertificateTimestampList => SignedCertificateTimestampList::NAME,
        }
    }

    /// Runs the decoder for this kind and flattens the result to display lines.
    pub fn decode_lines(&self, value: &[u8]) -> error::Result<Vec<String>> {
        match self {
            Self::AuthorityKeyIdentifier => lines_of::<AuthorityKeyIdentifier>(value),
            Self::SubjectKeyIdentifier => lines_of::<SubjectKeyIdentifier>(value),
            Self::KeyUsage => lines_of::<KeyUsage>(value),
            Self::CertificatePolicies => lines_of::<CertificatePolicies>(value),
            Self::SubjectAltName => lines_of::<SubjectAltName>(value),
            Self::IssuerAltName => lines_of::<IssuerAltName>(value),
            Self::BasicConstraints => lines_of::<BasicConstraints>(value),
            Self::ExtendedKeyUsage => lines_of::<ExtendedKeyUsage>(value),
            Self::CRLDistributionPoints => lines_of::<CRLDistributionPoints>(value),
            Self::AuthorityInfoAccess => lines_of::<AuthorityInfoAccess>(value),
            Self::SignedCertificateTimestampList => {
                lines_of::<SignedCertificateTimestampList>(value)
            }
        }
    }
}

fn lines_of<T: StandardExtension>(value: &[u8]) -> error::Result<Vec<String>> {
    Ok(T::parse(value)?.lines())
}

/*
RFC 5280 Section 4.1.2.9

Extension  ::=  SEQUENCE  {
    extnID      OBJECT IDENTIFIER,
    critical    BOOLEAN DEFAULT FALSE,
    extnValue   OCTET STRING
}
*/

/// Extension as it appears in the certificate, value still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtension {
    oid: ObjectIdentifier,
    critical: bool,
    value: Vec<u8>,
}

impl RawExtension {
    pub fn new(oid: ObjectIdentifier, critical: bool, value: Vec<u8>) -> Self {
        RawExtension {
            oid,
            critical,
            value,
        }
    }

    pub fn oid(&self) -> &ObjectIdentifier {
        &self.oid
    }

    pub fn critical(&self) -> bool {
        self.critical
    }

    /// Content of the extnValue OCTET STRING.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Parses the value as `T`, or `None` when this is a different extension.
    pub fn parse<T: StandardExtension>(&self) -> Option<error::Result<T>> {
        (self.oid == T::OID).then(|| T::parse(&self.value))
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for RawExtension {}

impl<'a> Decoder<Tlv<'a>, RawExtension> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<RawExtension, Self::Error> {
        let sequence = self.expect(Tag::SEQUENCE)?;
        let mut fields = sequence.children().peekable();

        let oid: ObjectIdentifier = next_field(&mut fields, "extnID")?.decode()?;
        let critical = match fields.peek() {
            Some(Ok(field)) if field.tag() == Tag::BOOLEAN => {
                let critical: Boolean = next_field(&mut fields, "critical")?.decode()?;
                critical.value()
            }
            _ => false,
        };
        let value: OctetString = next_field(&mut fields, "extnValue")?.decode()?;
        Ok(RawExtension {
            oid,
            critical,
            value: value.into(),
        })
    }
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = Result<Tlv<'a>, der::Error>>,
    name: &'static str,
) -> Result<Tlv<'a>, Error> {
    match fields.next() {
        Some(field) => Ok(field?),
        None => Err(Error::MissingField(Kind::Extension, name)),
    }
}

/// Decoded, display-ready extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    pub name: String,
    pub oid: String,
    pub critical: bool,
    pub values: Vec<String>,
}

impl Extension {
    /// Decodes `raw` through the dispatch table.
    ///
    /// A decoder error becomes the single value of the extension and is
    /// logged; it never propagates. Unknown OIDs are named `-N/A-` and carry
    /// the OID as their value.
    pub fn from_raw(position: usize, raw: &RawExtension) -> Self {
        let oid = raw.oid().to_string();
        let (name, values) = match ExtensionKind::from_oid(&oid) {
            Some(kind) => match kind.decode_lines(raw.value()) {
                Ok(values) => (kind.name(), values),
                Err(err) => {
                    tracing::error!(
                        "certificate at position {}: extension {} ({}): {}",
                        position,
                        kind.name(),
                        oid,
                        err
                    );
                    (kind.name(), vec![err.to_string()])
                }
            },
            None => (UNKNOWN_EXTENSION_NAME, vec![oid.clone()]),
        };
        Extension {
            name: name.to_string(),
            oid,
            critical: raw.critical(),
            values,
        }
    }

    /// Header line: `Name (oid)` with a ` [critical]` suffix when critical.
    pub fn title(&self) -> String {
        if self.critical {
            format!("{} ({}) [critical]", self.name, self.oid)
        } else {
            format!("{} ({})", self.name, self.oid)
        }
    }
}

// Shared decoding helpers for the extension modules.

/// Reads one value spanning all of `bytes` and checks its tag.
pub(crate) fn read_value(kind: Kind, bytes: &[u8], tag: Tag) -> error::Result<Tlv<'_>> {
    expect_tag(kind, der::read_all(bytes)?, tag)
}

pub(crate) fn expect_tag(kind: Kind, tlv: Tlv<'_>, tag: Tag) -> error::Result<Tlv<'_>> {
    if tlv.tag() != tag {
        return Err(Error::ExpectedTag {
            kind,
            expected: tag,
            actual: tlv.tag(),
        });
    }
    Ok(tlv)
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Character string value, or the lossy content for any other type.
pub(crate) fn text_or_lossy(tlv: Tlv<'_>) -> String {
    let text: Result<Text, asn1::Error> = tlv.decode();
    text.map(String::from)
        .unwrap_or_else(|_| lossy(tlv.content()))
}

/// `label (oid)` when the registry knows the OID, the bare OID otherwise.
pub(crate) fn labelled(oid: &ObjectIdentifier, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{} ({})", label, oid),
        None => oid.to_string(),
    }
}
