use std::fmt;

use asn1::ObjectIdentifier;
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};

use crate::error::{Error, Result};
use crate::extensions::text_or_lossy;

/*
RFC 5280 Section 4.1.2.4

Name ::= CHOICE { -- only one possibility for now --
    rdnSequence  RDNSequence }

RDNSequence ::= SEQUENCE OF RelativeDistinguishedName

RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue

AttributeTypeAndValue ::= SEQUENCE {
    type     AttributeType,
    value    AttributeValue }
*/

/// Distinguished name in encoding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    rdns: Vec<RelativeDistinguishedName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    attributes: Vec<AttributeTypeAndValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    attribute_type: ObjectIdentifier,
    /// Character value, or the lossy content for non-string values.
    value: String,
    /// Full DER of the value, used for attributes without a short name.
    raw: Vec<u8>,
}

impl Name {
    pub fn rdns(&self) -> &[RelativeDistinguishedName] {
        &self.rdns
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }
}

impl RelativeDistinguishedName {
    pub fn attributes(&self) -> &[AttributeTypeAndValue] {
        &self.attributes
    }
}

impl AttributeTypeAndValue {
    pub fn attribute_type(&self) -> &ObjectIdentifier {
        &self.attribute_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Short name of a distinguished name attribute.
pub fn attribute_short_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "2.5.4.6" => "C",
        "2.5.4.10" => "O",
        "2.5.4.11" => "OU",
        "2.5.4.3" => "CN",
        "2.5.4.5" => "SERIALNUMBER",
        "2.5.4.7" => "L",
        "2.5.4.8" => "ST",
        "2.5.4.9" => "STREET",
        "2.5.4.17" => "POSTALCODE",
        _ => return None,
    };
    Some(name)
}

fn escape_value(value: &str) -> String {
    let last = value.len().saturating_sub(1);
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        let escape = match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => true,
            ' ' => i == 0 || i == last,
            '#' => i == 0,
            _ => false,
        };
        if escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let oid = self.attribute_type.to_string();
        match attribute_short_name(&oid) {
            Some(short) => write!(f, "{}={}", short, escape_value(&self.value)),
            None => {
                let hex: String = self.raw.iter().map(|b| format!("{:02x}", b)).collect();
                write!(f, "{}=#{}", oid, hex)
            }
        }
    }
}

/// String form in reverse RDN order, e.g. `CN=example.com,O=Example,C=US`.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.rdns.iter().rev().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            for (j, attribute) in rdn.attributes.iter().enumerate() {
                if j > 0 {
                    write!(f, "+")?;
                }
                write!(f, "{}", attribute)?;
            }
        }
        Ok(())
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for Name {}

impl<'a> Decoder<Tlv<'a>, Name> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<Name> {
        let sequence = expect(*self, "Name", Tag::SEQUENCE)?;
        let mut rdns = Vec::new();
        for rdn in sequence.children() {
            let rdn = expect(rdn?, "RelativeDistinguishedName", Tag::SET)?;
            let mut attributes = Vec::new();
            for attribute in rdn.children() {
                let attribute: AttributeTypeAndValue = attribute?.decode()?;
                attributes.push(attribute);
            }
            rdns.push(RelativeDistinguishedName { attributes });
        }
        Ok(Name { rdns })
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for AttributeTypeAndValue {}

impl<'a> Decoder<Tlv<'a>, AttributeTypeAndValue> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<AttributeTypeAndValue> {
        let sequence = expect(*self, "AttributeTypeAndValue", Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let attribute_type: ObjectIdentifier = fields
            .next()
            .ok_or(Error::MissingField("AttributeTypeAndValue", "type"))??
            .decode()?;
        let value = fields
            .next()
            .ok_or(Error::MissingField("AttributeTypeAndValue", "value"))??;
        Ok(AttributeTypeAndValue {
            attribute_type,
            value: text_or_lossy(value),
            raw: value.to_der(),
        })
    }
}

pub(crate) fn expect<'a>(tlv: Tlv<'a>, context: &'static str, tag: Tag) -> Result<Tlv<'a>> {
    if tlv.tag() != tag {
        return Err(Error::ExpectedTag {
            context,
            expected: tag,
            actual: tlv.tag(),
        });
    }
    Ok(tlv)
}
