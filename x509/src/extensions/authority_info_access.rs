use asn1::ObjectIdentifier;
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};

use super::error::{Error, Kind, Result};
use super::general_name::{GeneralName, decode_general_name};
use super::registry::access_method_name;
use super::{StandardExtension, expect_tag, labelled, read_value};

/*
RFC 5280 Section 4.2.2.1

id-pe-authorityInfoAccess OBJECT IDENTIFIER ::= { id-pe 1 }
AuthorityInfoAccessSyntax  ::= SEQUENCE SIZE (1..MAX) OF AccessDescription

AccessDescription  ::=  SEQUENCE {
    accessMethod          OBJECT IDENTIFIER,
    accessLocation        GeneralName
}

id-ad OBJECT IDENTIFIER ::= { id-pkix 48 }
id-ad-caIssuers OBJECT IDENTIFIER ::= { id-ad 2 }
id-ad-ocsp OBJECT IDENTIFIER ::= { id-ad 1 }
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityInfoAccess {
    pub descriptors: Vec<AccessDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDescription {
    pub access_method: ObjectIdentifier,
    /// `None` when the location is not a known GeneralName alternative.
    pub access_location: Option<GeneralName>,
}

impl AccessDescription {
    pub fn line(&self) -> String {
        let method = labelled(
            &self.access_method,
            access_method_name(&self.access_method.to_string()),
        );
        match &self.access_location {
            Some(location) => format!("{} - {}: {}", method, location.label(), location),
            None => method,
        }
    }
}

impl StandardExtension for AuthorityInfoAccess {
    const OID: &'static str = "1.3.6.1.5.5.7.1.1";
    const NAME: &'static str = "Authority Information Access";

    fn parse(value: &[u8]) -> Result<Self> {
        let sequence = read_value(Kind::AuthorityInfoAccess, value, Tag::SEQUENCE)?;
        let descriptors = sequence
            .children()
            .map(|descriptor| -> Result<AccessDescription> { descriptor?.decode() })
            .collect::<Result<Vec<_>>>()?;
        Ok(AuthorityInfoAccess { descriptors })
    }

    fn lines(&self) -> Vec<String> {
        self.descriptors.iter().map(AccessDescription::line).collect()
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for AccessDescription {}

impl<'a> Decoder<Tlv<'a>, AccessDescription> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<AccessDescription> {
        let sequence = expect_tag(Kind::AuthorityInfoAccess, *self, Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let access_method: ObjectIdentifier = fields
            .next()
            .ok_or(Error::MissingField(Kind::AuthorityInfoAccess, "accessMethod"))??
            .decode()?;
        let access_location = match fields.next() {
            Some(location) => decode_general_name(location?),
            None => None,
        };
        Ok(AccessDescription {
            access_method,
            access_location,
        })
    }
}
