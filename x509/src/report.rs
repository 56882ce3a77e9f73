//! Serialisable views of loaded locations for structured output.

use serde::Serialize;

use crate::bundle::CertificateEntry;
use crate::extensions::Extension;
use crate::format::hex_array;
use crate::location::{CertificateLocation, CertificateLocations};
use crate::{Certificate, CertificateKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationReport {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub certificates: Vec<CertificateReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateReport {
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub details: Option<CertificateDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateDetails {
    pub version: u8,
    pub serial_number: String,
    pub signature_algorithm: String,
    #[serde(rename = "type")]
    pub kind: CertificateKind,
    pub issuer: String,
    pub not_before: String,
    pub not_after: String,
    pub subject: String,
    pub dns_names: Vec<String>,
    pub ip_addresses: Vec<String>,
    pub authority_key_id: String,
    pub subject_key_id: String,
    pub public_key_algorithm: String,
    pub key_usage: Vec<String>,
    pub ext_key_usage: Vec<String>,
    pub ca: bool,
    pub extensions: Vec<Extension>,
}

impl CertificateDetails {
    fn new(position: usize, certificate: &Certificate) -> Self {
        CertificateDetails {
            version: certificate.version(),
            serial_number: certificate.serial_number_hex(),
            signature_algorithm: certificate.signature_algorithm().signature_name(),
            kind: certificate.kind(),
            issuer: certificate.issuer().to_string(),
            not_before: certificate.not_before().to_rfc3339(),
            not_after: certificate.not_after().to_rfc3339(),
            subject: certificate.subject().to_string(),
            dns_names: certificate.dns_names(),
            ip_addresses: certificate
                .ip_addresses()
                .iter()
                .map(ToString::to_string)
                .collect(),
            authority_key_id: hex_array(&certificate.authority_key_id().unwrap_or_default()),
            subject_key_id: hex_array(&certificate.subject_key_id().unwrap_or_default()),
            public_key_algorithm: certificate.public_key_algorithm(),
            key_usage: names(certificate.key_usage_names()),
            ext_key_usage: names(certificate.ext_key_usage_names()),
            ca: certificate.is_ca(),
            extensions: certificate.extensions(position),
        }
    }
}

fn names(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(String::from).collect()
}

impl From<&CertificateEntry> for CertificateReport {
    fn from(entry: &CertificateEntry) -> Self {
        CertificateReport {
            position: entry.position(),
            error: entry.error().map(ToString::to_string),
            details: entry
                .certificate()
                .map(|certificate| CertificateDetails::new(entry.position(), certificate)),
        }
    }
}

impl From<&CertificateLocation> for LocationReport {
    fn from(location: &CertificateLocation) -> Self {
        LocationReport {
            name: location.name(),
            path: location.path().to_string(),
            error: location.error().map(String::from),
            certificates: location
                .certificates()
                .map(|certificates| certificates.iter().map(CertificateReport::from).collect())
                .unwrap_or_default(),
        }
    }
}

pub fn report(locations: &CertificateLocations) -> Vec<LocationReport> {
    locations.iter().map(LocationReport::from).collect()
}
