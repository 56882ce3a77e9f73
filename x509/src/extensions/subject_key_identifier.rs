use asn1::OctetString;
use certinfo::decoder::Decoder;
use der::Tag;

use super::error::{Kind, Result};
use super::{StandardExtension, read_value};
use crate::format::hex_array;

/*
RFC 5280 Section 4.2.1.2
SubjectKeyIdentifier ::= KeyIdentifier
KeyIdentifier ::= OCTET STRING
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectKeyIdentifier {
    pub key_identifier: Vec<u8>,
}

impl StandardExtension for SubjectKeyIdentifier {
    const OID: &'static str = "2.5.29.14";
    const NAME: &'static str = "Subject Key Identifier";

    fn parse(value: &[u8]) -> Result<Self> {
        let key_identifier: OctetString =
            read_value(Kind::SubjectKeyIdentifier, value, Tag::OCTET_STRING)?.decode()?;
        Ok(SubjectKeyIdentifier {
            key_identifier: key_identifier.into(),
        })
    }

    fn lines(&self) -> Vec<String> {
        vec![hex_array(&self.key_identifier)]
    }
}
