use asn1::Integer;
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};

use super::error::{Error, Kind, Result};
use super::general_name::{GeneralName, decode_general_names_content, group_general_names};
use super::{StandardExtension, read_value};
use crate::format::hex_array;

/*
RFC 5280 Section 4.2.1.1
AuthorityKeyIdentifier ::= SEQUENCE {
    keyIdentifier             [0] KeyIdentifier           OPTIONAL,
    authorityCertIssuer       [1] GeneralNames            OPTIONAL,
    authorityCertSerialNumber [2] CertificateSerialNumber OPTIONAL
}

KeyIdentifier ::= OCTET STRING
CertificateSerialNumber ::= INTEGER
*/

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityKeyIdentifier {
    pub key_identifier: Option<Vec<u8>>,
    pub authority_cert_issuer: Option<Vec<GeneralName>>,
    pub authority_cert_serial_number: Option<Integer>,
}

impl StandardExtension for AuthorityKeyIdentifier {
    const OID: &'static str = "2.5.29.35";
    const NAME: &'static str = "Authority Key Identifier";

    fn parse(value: &[u8]) -> Result<Self> {
        read_value(Kind::AuthorityKeyIdentifier, value, Tag::SEQUENCE)?.decode()
    }

    fn lines(&self) -> Vec<String> {
        // The key id line is always first, empty when absent.
        let mut lines = vec![hex_array(self.key_identifier.as_deref().unwrap_or_default())];
        if let Some(issuer) = &self.authority_cert_issuer {
            lines.push(format!(
                "Authority Cert. Issuer: {}",
                group_general_names(issuer).join(", ")
            ));
        }
        if let Some(serial) = self
            .authority_cert_serial_number
            .as_ref()
            .filter(|serial| !serial.is_zero())
        {
            lines.push(format!("Authority Cert SN: {}", serial));
        }
        lines
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for AuthorityKeyIdentifier {}

impl<'a> Decoder<Tlv<'a>, AuthorityKeyIdentifier> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<AuthorityKeyIdentifier> {
        let mut aki = AuthorityKeyIdentifier::default();
        for field in self.children() {
            let field = field?;
            match field.tag().context_number() {
                Some(0) => aki.key_identifier = Some(field.content().to_vec()),
                Some(1) => {
                    aki.authority_cert_issuer =
                        Some(decode_general_names_content(field.content())?)
                }
                Some(2) => {
                    aki.authority_cert_serial_number = Some(Integer::try_from(field.content())?)
                }
                _ => {
                    return Err(Error::UnexpectedTag {
                        kind: Kind::AuthorityKeyIdentifier,
                        actual: field.tag(),
                    });
                }
            }
        }
        Ok(aki)
    }
}
