use std::fmt;
use std::net::IpAddr;

use asn1::{BitString, Integer, Time};
use certinfo::decoder::{DecodableFrom, Decoder};
use certinfo::encoder::Encoder;
use chrono::{DateTime, Utc};
use der::{Tag, Tlv};
use pem::{Label, Pem};
use serde::Serialize;

use crate::error::Result;
use crate::extensions::{
    AuthorityKeyIdentifier, BasicConstraints, ExtendedKeyUsage, Extension, KeyUsage, RawExtension,
    StandardExtension, SubjectAltName, SubjectKeyIdentifier,
};
use crate::format::hex_array;
use crate::name::expect;

pub mod algorithm;
pub mod bundle;
pub mod error;
pub mod extensions;
pub mod format;
pub mod location;
pub mod name;
pub mod public_key;
pub mod report;

pub use algorithm::AlgorithmIdentifier;
pub use bundle::{CertificateEntry, Certificates};
pub use error::Error;
pub use location::{CertificateLocation, CertificateLocations};
pub use name::Name;
pub use public_key::{RsaPublicKey, SubjectPublicKeyInfo};

/*
https://datatracker.ietf.org/doc/html/rfc5280#section-4.1

Certificate  ::=  SEQUENCE  {
    tbsCertificate       TBSCertificate,
    signatureAlgorithm   AlgorithmIdentifier,
    signatureValue       BIT STRING
}

TBSCertificate  ::=  SEQUENCE  {
     version         [0]  EXPLICIT Version DEFAULT v1,
     serialNumber         CertificateSerialNumber,
     signature            AlgorithmIdentifier,
     issuer               Name,
     validity             Validity,
     subject              Name,
     subjectPublicKeyInfo SubjectPublicKeyInfo,
     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
     extensions      [3]  EXPLICIT Extensions OPTIONAL
}

Validity ::= SEQUENCE {
    notBefore      Time,
    notAfter       Time
}
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    raw: Vec<u8>,
    version: u8,
    serial_number: Integer,
    signature_algorithm: AlgorithmIdentifier,
    issuer: Name,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    subject: Name,
    subject_public_key_info: SubjectPublicKeyInfo,
    extensions: Vec<RawExtension>,
    signature_value: BitString,
}

/// Certificate role derived from its key identifiers and CA flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertificateKind {
    Root,
    Intermediate,
    EndEntity,
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateKind::Root => write!(f, "root"),
            CertificateKind::Intermediate => write!(f, "intermediate"),
            CertificateKind::EndEntity => write!(f, "end-entity"),
        }
    }
}

impl Certificate {
    /// Decodes the first DER value of `bytes`. Bytes after it are ignored.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let (tlv, rest) = der::read(bytes)?;
        let mut certificate: Certificate = tlv.decode()?;
        certificate.raw = bytes[..bytes.len() - rest.len()].to_vec();
        Ok(certificate)
    }

    /// The DER encoding the certificate was decoded from.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Version number, 1 to 3.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn serial_number(&self) -> &Integer {
        &self.serial_number
    }

    /// Serial number magnitude as `AA:BB` hex.
    pub fn serial_number_hex(&self) -> String {
        hex_array(&self.serial_number.magnitude_bytes())
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier {
        &self.signature_algorithm
    }

    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    pub fn subject(&self) -> &Name {
        &self.subject
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.subject_public_key_info
    }

    pub fn public_key_algorithm(&self) -> String {
        self.subject_public_key_info.algorithm.public_key_name()
    }

    pub fn signature_value(&self) -> &BitString {
        &self.signature_value
    }

    pub fn signature_hex(&self) -> String {
        hex_array(self.signature_value.as_bytes())
    }

    pub fn raw_extensions(&self) -> &[RawExtension] {
        &self.extensions
    }

    /// First extension of type `T`. Extensions that fail to decode are
    /// treated as absent here; [`Certificate::extensions`] reports them.
    pub fn extension<T: StandardExtension>(&self) -> Option<T> {
        self.extensions
            .iter()
            .find_map(|raw| raw.parse::<T>())
            .and_then(|parsed| parsed.ok())
    }

    /// Every extension decoded for display. `position` only tags log lines.
    pub fn extensions(&self, position: usize) -> Vec<Extension> {
        self.extensions
            .iter()
            .map(|raw| Extension::from_raw(position, raw))
            .collect()
    }

    pub fn is_ca(&self) -> bool {
        self.extension::<BasicConstraints>()
            .is_some_and(|constraints| constraints.ca)
    }

    pub fn authority_key_id(&self) -> Option<Vec<u8>> {
        self.extension::<AuthorityKeyIdentifier>()
            .and_then(|aki| aki.key_identifier)
    }

    pub fn subject_key_id(&self) -> Option<Vec<u8>> {
        self.extension::<SubjectKeyIdentifier>()
            .map(|ski| ski.key_identifier)
    }

    pub fn dns_names(&self) -> Vec<String> {
        self.extension::<SubjectAltName>()
            .map(|san| san.dns_names().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn ip_addresses(&self) -> Vec<IpAddr> {
        self.extension::<SubjectAltName>()
            .map(|san| san.ip_addresses())
            .unwrap_or_default()
    }

    /// Key usage summary, e.g. `Cert Sign`, `CRL Sign`.
    pub fn key_usage_names(&self) -> Vec<&'static str> {
        self.extension::<KeyUsage>()
            .map(|usage| usage.usage_names())
            .unwrap_or_default()
    }

    /// Extended key usage summary, e.g. `Server Auth`.
    pub fn ext_key_usage_names(&self) -> Vec<&'static str> {
        self.extension::<ExtendedKeyUsage>()
            .map(|usage| usage.usage_names())
            .unwrap_or_default()
    }

    /// Root when there is no authority key id or it equals the subject key
    /// id, otherwise intermediate for CAs and end-entity for the rest.
    pub fn kind(&self) -> CertificateKind {
        match self.authority_key_id() {
            None => CertificateKind::Root,
            Some(aki) if Some(&aki) == self.subject_key_id().as_ref() => CertificateKind::Root,
            Some(_) if self.is_ca() => CertificateKind::Intermediate,
            Some(_) => CertificateKind::EndEntity,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.not_after
    }

    /// PEM armor of the raw DER, terminated by a newline.
    pub fn to_pem(&self) -> Result<String> {
        Ok(Pem::from_der(Label::Certificate, &self.raw).encode()?)
    }
}

impl DecodableFrom<Vec<u8>> for Certificate {}

impl Decoder<Vec<u8>, Certificate> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Certificate> {
        Certificate::from_der(self)
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for Certificate {}

impl<'a> Decoder<Tlv<'a>, Certificate> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<Certificate> {
        let sequence = expect(*self, "Certificate", Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let tbs = next(&mut fields, "Certificate", "tbsCertificate")?;
        let signature_algorithm: AlgorithmIdentifier =
            next(&mut fields, "Certificate", "signatureAlgorithm")?.decode()?;
        let signature_value: BitString =
            next(&mut fields, "Certificate", "signatureValue")?.decode()?;
        let tbs = decode_tbs(tbs)?;
        Ok(Certificate {
            raw: self.to_der(),
            version: tbs.version,
            serial_number: tbs.serial_number,
            signature_algorithm,
            issuer: tbs.issuer,
            not_before: tbs.not_before,
            not_after: tbs.not_after,
            subject: tbs.subject,
            subject_public_key_info: tbs.subject_public_key_info,
            extensions: tbs.extensions,
            signature_value,
        })
    }
}

struct TbsCertificate {
    version: u8,
    serial_number: Integer,
    issuer: Name,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    subject: Name,
    subject_public_key_info: SubjectPublicKeyInfo,
    extensions: Vec<RawExtension>,
}

const TBS: &str = "TBSCertificate";

fn decode_tbs(tlv: Tlv<'_>) -> Result<TbsCertificate> {
    let sequence = expect(tlv, TBS, Tag::SEQUENCE)?;
    let mut fields = sequence.children().peekable();

    let version = match fields.peek() {
        Some(Ok(field)) if field.tag() == Tag::context(0, true) => {
            let field = next(&mut fields, TBS, "version")?;
            decode_version(field)?
        }
        _ => 1,
    };
    let serial_number: Integer = next(&mut fields, TBS, "serialNumber")?.decode()?;
    let _signature: AlgorithmIdentifier = next(&mut fields, TBS, "signature")?.decode()?;
    let issuer: Name = next(&mut fields, TBS, "issuer")?.decode()?;

    let validity = expect(next(&mut fields, TBS, "validity")?, "Validity", Tag::SEQUENCE)?;
    let mut times = validity.children();
    let not_before: Time = next(&mut times, "Validity", "notBefore")?.decode()?;
    let not_after: Time = next(&mut times, "Validity", "notAfter")?.decode()?;

    let subject: Name = next(&mut fields, TBS, "subject")?.decode()?;
    let subject_public_key_info: SubjectPublicKeyInfo =
        next(&mut fields, TBS, "subjectPublicKeyInfo")?.decode()?;

    let mut extensions = Vec::new();
    for field in fields {
        let field = field?;
        match field.tag().context_number() {
            // issuerUniqueID, subjectUniqueID
            Some(1) | Some(2) => continue,
            Some(3) => {
                let list = expect(der::read_all(field.content())?, "Extensions", Tag::SEQUENCE)?;
                for extension in list.children() {
                    let extension: RawExtension = extension?.decode()?;
                    extensions.push(extension);
                }
            }
            _ => return Err(Error::TrailingFields(TBS)),
        }
    }

    Ok(TbsCertificate {
        version,
        serial_number,
        issuer,
        not_before: not_before.datetime(),
        not_after: not_after.datetime(),
        subject,
        subject_public_key_info,
        extensions,
    })
}

// Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
fn decode_version(field: Tlv<'_>) -> Result<u8> {
    let version: Integer = der::read_all(field.content())?.decode()?;
    match version.to_u32() {
        Some(v @ 0..=2) => Ok(v as u8 + 1),
        _ => Err(Error::InvalidVersion(version.to_string())),
    }
}

fn next<'a>(
    fields: &mut impl Iterator<Item = std::result::Result<Tlv<'a>, der::Error>>,
    context: &'static str,
    name: &'static str,
) -> Result<Tlv<'a>> {
    match fields.next() {
        Some(field) => Ok(field?),
        None => Err(Error::MissingField(context, name)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::net::Ipv4Addr;

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    pub(crate) const LEAF_PEM: &str = r"-----BEGIN CERTIFICATE-----
MIIDiDCCAnCgAwIBAgICEAEwDQYJKoZIhvcNAQELBQAwPTELMAkGA1UEBhMCR0Ix
ETAPBgNVBAoMCENlcnRpbmZvMRswGQYDVQQDDBJDZXJ0aW5mbyBUZXN0IFJvb3Qw
HhcNMjQwMTAxMDAwMDAwWhcNNDMwNjAxMDAwMDAwWjA7MQswCQYDVQQGEwJHQjER
MA8GA1UECgwIQ2VydGluZm8xGTAXBgNVBAMMEGxlYWYuZXhhbXBsZS5jb20wWTAT
BgcqhkjOPQIBBggqhkjOPQMBBwNCAASZwb/uxykVNA1lcDHCv3LuPo7kfWg6FzUy
QHT6LvtXCgWOSEaN78Nqshk0Km+vRuA6bYWOX7oahYtseUhiAGP7o4IBXTCCAVkw
DAYDVR0TAQH/BAIwADAOBgNVHQ8BAf8EBAMCBaAwHQYDVR0lBBYwFAYIKwYBBQUH
AwEGCCsGAQUFBwMCMB0GA1UdDgQWBBTgBFgKi3TKAOE4bsqAizjueJfcOTAfBgNV
HSMEGDAWgBQwmQRVHX3JaUrllu1pobUzzG/7MzAyBgNVHREEKzApghBsZWFmLmV4
YW1wbGUuY29tgg93d3cuZXhhbXBsZS5jb22HBH8AAAEwMAYDVR0fBCkwJzAloCOg
IYYfaHR0cDovL2NybC5leGFtcGxlLmNvbS9yb290LmNybDBfBggrBgEFBQcBAQRT
MFEwIwYIKwYBBQUHMAGGF2h0dHA6Ly9vY3NwLmV4YW1wbGUuY29tMCoGCCsGAQUF
BzAChh5odHRwOi8vY2EuZXhhbXBsZS5jb20vcm9vdC5jcnQwEwYDVR0gBAwwCjAI
BgZngQwBAgEwDQYJKoZIhvcNAQELBQADggEBAEC82Y/Cq9Wj4C91wQAEAEMIWPu0
vidrdHb2pUnecLs0CNyUhL1mk1VTZ+3xCKWiHopfpllWk/c+A8T1pTrYg/xj/3ga
dagTeDO8ufoUA8IUPALZmco+GDQnCladEDUJkZirZRpj/cgMvjaAMXXPxMn27YQx
KIfmop5BIlq5WFrwR9IaPaQ6AiB7ue7tQuKxxN+Nl7RYCWzWVnJ4XXlpQUNRiUK8
WQEdcqZsvlalXX1WXRtLE1O47Ea/+LYSHrxnJxZ34qGoC+450QvkHpKIZPEW6s+w
l5zm7ZQQQhYXCIsSDg0rFe4iR1lNeFiRLuEO+961XiflK0gTExj6Dlet4Mc=
-----END CERTIFICATE-----
";

    pub(crate) const ROOT_PEM: &str = r"-----BEGIN CERTIFICATE-----
MIIDOjCCAiKgAwIBAgIBATANBgkqhkiG9w0BAQsFADA9MQswCQYDVQQGEwJHQjER
MA8GA1UECgwIQ2VydGluZm8xGzAZBgNVBAMMEkNlcnRpbmZvIFRlc3QgUm9vdDAe
Fw0yNDAxMDEwMDAwMDBaFw00NDAxMDEwMDAwMDBaMD0xCzAJBgNVBAYTAkdCMREw
DwYDVQQKDAhDZXJ0aW5mbzEbMBkGA1UEAwwSQ2VydGluZm8gVGVzdCBSb290MIIB
IjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEApRqYqJGKss+pN8KXjmPwUy+i
TKrX0C++LYh4ZCP4v9DoB7S7mI1f4kqJpteNfdfaKtKQkwWgVIf3PqDIdZsDxBhi
UDcI6GwRiNG0xTsAzLkHpbHSmK5eKhJ/OKeDI17hjdo6ywti62ozVyOmbTWZa9om
To6a2b8DhAk/dXUBBlK0ZcYVDcKq02oXQgXh1XO89cgzpo2HejAds+8sQW7Uaz7D
M+AHiwaOlipb6LrIPDm6UTKPz8BbQ0tA/Frhzjd6l4J6I3zt0CRLaHWE5fRJaHQN
y5Ic9ALhU47gL/DlYBXARr62fEOysjJ5w2w+i+oRLdnqi+tR/71yO01n1e4VsQID
AQABo0UwQzASBgNVHRMBAf8ECDAGAQH/AgEBMA4GA1UdDwEB/wQEAwIBBjAdBgNV
HQ4EFgQUMJkEVR19yWlK5ZbtaaG1M8xv+zMwDQYJKoZIhvcNAQELBQADggEBAD/E
GxeV9a9Ufrf84yDZ2JU4uDH6aa4R8fG1YKB77Wt0pHWSwBGn3Uw26HcY2+IIbQfN
FFVxSVU4jK4nGgfDRouEltIJdf3qXsF65Iri1tr2S1lqXE/7XdWa2oCpbZ3dp0Yl
zfQz5Jji56QrZ6vu5oBosYhXdYXVwXve0C/S9Op1DmSxSHzP19vzzAAhA93AILZD
K5VKOLr2UQQV4oqXkVXLlwyym1NPkNhwc3LWdDS5YbNALonbgnq7BesdK+0r3Kun
W205o/+vpZN85gkxpeCGP6k+ahckSnWJHHDv10OAL7GvlAuYjUneugUksjFzYhgT
YqShgyevwB3QxqVJXlg=
-----END CERTIFICATE-----
";

    pub(crate) fn der_of(pem: &str) -> Vec<u8> {
        let pem: Pem = pem.parse().unwrap();
        pem.decode().unwrap()
    }

    pub(crate) fn certificate(pem: &str) -> Certificate {
        der_of(pem).decode().unwrap()
    }

    #[test]
    fn test_leaf_fields() {
        let leaf = certificate(LEAF_PEM);
        assert_eq!(3, leaf.version());
        assert_eq!("10:01", leaf.serial_number_hex());
        assert_eq!("SHA256-RSA", leaf.signature_algorithm().signature_name());
        assert_eq!("CN=Certinfo Test Root,O=Certinfo,C=GB", leaf.issuer().to_string());
        assert_eq!("CN=leaf.example.com,O=Certinfo,C=GB", leaf.subject().to_string());
        assert_eq!(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            leaf.not_before()
        );
        assert_eq!(
            Utc.with_ymd_and_hms(2043, 6, 1, 0, 0, 0).unwrap(),
            leaf.not_after()
        );
        assert_eq!("ECDSA", leaf.public_key_algorithm());
        assert_eq!(256, leaf.signature_value().as_bytes().len());
    }

    #[test]
    fn test_leaf_extension_accessors() {
        let leaf = certificate(LEAF_PEM);
        assert_eq!(vec!["leaf.example.com", "www.example.com"], leaf.dns_names());
        assert_eq!(
            vec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))],
            leaf.ip_addresses()
        );
        assert_eq!(
            Some("30:99:04:55:1D:7D:C9:69:4A:E5:96:ED:69:A1:B5:33:CC:6F:FB:33".to_string()),
            leaf.authority_key_id().map(|id| hex_array(&id))
        );
        assert_eq!(
            Some("E0:04:58:0A:8B:74:CA:00:E1:38:6E:CA:80:8B:38:EE:78:97:DC:39".to_string()),
            leaf.subject_key_id().map(|id| hex_array(&id))
        );
        assert_eq!(vec!["Digital Signature", "Key Encipherment"], leaf.key_usage_names());
        assert_eq!(vec!["Server Auth", "Client Auth"], leaf.ext_key_usage_names());
        assert!(!leaf.is_ca());
        assert_eq!(CertificateKind::EndEntity, leaf.kind());
    }

    #[test]
    fn test_leaf_extensions() {
        let leaf = certificate(LEAF_PEM);
        let titles: Vec<String> = leaf.extensions(1).iter().map(Extension::title).collect();
        assert_eq!(
            vec![
                "Basic Constraints (2.5.29.19) [critical]",
                "Key Usage (2.5.29.15) [critical]",
                "Extended Key Usage (2.5.29.37)",
                "Subject Key Identifier (2.5.29.14)",
                "Authority Key Identifier (2.5.29.35)",
                "Subject Alt. Name (2.5.29.17)",
                "CRL Distribution Points (2.5.29.31)",
                "Authority Information Access (1.3.6.1.5.5.7.1.1)",
                "Certificate Policies (2.5.29.32)",
            ],
            titles
        );
        let values: Vec<Vec<String>> = leaf.extensions(1).into_iter().map(|e| e.values).collect();
        assert_eq!(vec!["CA: false"], values[0]);
        assert_eq!(vec!["Digital Signature", "Key Encipherment"], values[1]);
        assert_eq!(
            vec![
                "server auth (1.3.6.1.5.5.7.3.1)",
                "client auth (1.3.6.1.5.5.7.3.2)"
            ],
            values[2]
        );
        assert_eq!(
            vec!["DNS Name: leaf.example.com, www.example.com", "IP Address: \u{7f}\0\0\u{1}"],
            values[5]
        );
        assert_eq!(
            vec!["Distribution Point: URI: http://crl.example.com/root.crl"],
            values[6]
        );
        assert_eq!(
            vec![
                "ocsp (1.3.6.1.5.5.7.48.1) - URI: http://ocsp.example.com",
                "ca issuers (1.3.6.1.5.5.7.48.2) - URI: http://ca.example.com/root.crt",
            ],
            values[7]
        );
        assert_eq!(vec!["domain validated (2.23.140.1.2.1)"], values[8]);
    }

    #[test]
    fn test_root_fields() {
        let root = certificate(ROOT_PEM);
        assert_eq!("01", root.serial_number_hex());
        assert_eq!(root.issuer(), root.subject());
        assert!(root.is_ca());
        assert_eq!(CertificateKind::Root, root.kind());
        assert_eq!(vec!["Cert Sign", "CRL Sign"], root.key_usage_names());
        assert!(root.ext_key_usage_names().is_empty());
        assert!(root.dns_names().is_empty());
        assert_eq!("RSA", root.public_key_algorithm());
        let constraints = root.extension::<BasicConstraints>().unwrap();
        assert_eq!(Some(1), constraints.path_len_constraint);
        assert!(
            root.subject_public_key_info()
                .describe()
                .contains("    Public Key: (2048 bit)")
        );
    }

    #[test]
    fn test_to_pem_round_trips_raw() {
        let leaf = certificate(LEAF_PEM);
        assert_eq!(LEAF_PEM, leaf.to_pem().unwrap());
        assert_eq!(der_of(LEAF_PEM), leaf.raw());
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut der = der_of(ROOT_PEM);
        let raw = der.clone();
        der.extend([0x00, 0x00]);
        let root = Certificate::from_der(&der).unwrap();
        assert_eq!(raw, root.raw());
    }

    #[rstest]
    #[case(Utc.with_ymd_and_hms(2043, 5, 31, 23, 59, 59).unwrap(), false)]
    #[case(Utc.with_ymd_and_hms(2043, 6, 1, 0, 0, 0).unwrap(), false)]
    #[case(Utc.with_ymd_and_hms(2043, 6, 1, 0, 0, 1).unwrap(), true)]
    fn test_is_expired(#[case] now: DateTime<Utc>, #[case] expected: bool) {
        assert_eq!(expected, certificate(LEAF_PEM).is_expired(now));
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::not_sequence(vec![0x04, 0x00])]
    #[case::truncated(der_of(LEAF_PEM)[..100].to_vec())]
    #[case::missing_fields(vec![0x30, 0x03, 0x30, 0x01, 0x00])]
    fn test_decode_error(#[case] input: Vec<u8>) {
        assert!(Certificate::from_der(&input).is_err());
    }

    #[test]
    fn test_invalid_version() {
        // [0] { INTEGER 5 }
        let field = der::encode(Tag::context(0, true), &der::encode(Tag::INTEGER, &[0x05]));
        let tlv = der::read_all(&field).unwrap();
        assert_eq!(Err(Error::InvalidVersion("5".to_string())), decode_version(tlv));
    }

    #[rstest]
    #[case(CertificateKind::Root, "root")]
    #[case(CertificateKind::Intermediate, "intermediate")]
    #[case(CertificateKind::EndEntity, "end-entity")]
    fn test_kind_display(#[case] kind: CertificateKind, #[case] expected: &str) {
        assert_eq!(expected, kind.to_string());
    }
}
