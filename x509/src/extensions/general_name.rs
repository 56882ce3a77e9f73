use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use asn1::ObjectIdentifier;
use certinfo::decoder::Decoder;
use der::{Children, Class, Tag, Tlv};

use super::error::{Error, Kind, Result};
use super::{lossy, read_value, text_or_lossy};

/*
RFC 5280 Section 4.2.1.6
GeneralName ::= CHOICE {
    otherName                 [0] OtherName,
    rfc822Name                [1] IA5String,
    dNSName                   [2] IA5String,
    x400Address               [3] ORAddress,
    directoryName             [4] Name,
    ediPartyName              [5] EDIPartyName,
    uniformResourceIdentifier [6] IA5String,
    iPAddress                 [7] OCTET STRING,
    registeredID              [8] OBJECT IDENTIFIER
}

OtherName ::= SEQUENCE {
    type-id    OBJECT IDENTIFIER,
    value      [0] EXPLICIT ANY DEFINED BY type-id
}
*/

/// One alternative of the GeneralName CHOICE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    OtherName(OtherName),
    Rfc822Name(String),
    DnsName(String),
    X400Address(String),
    DirectoryName(String),
    EdiPartyName(String),
    Uri(String),
    IpAddress(Vec<u8>),
    RegisteredId(String),
}

const LABELS: [&str; 9] = [
    "Other Name",
    "Rfc822 Name",
    "DNS Name",
    "X400 Address",
    "Directory Name",
    "EdiParty Name",
    "URI",
    "IP Address",
    "Registered ID",
];

impl GeneralName {
    pub fn tag_number(&self) -> usize {
        match self {
            GeneralName::OtherName(_) => 0,
            GeneralName::Rfc822Name(_) => 1,
            GeneralName::DnsName(_) => 2,
            GeneralName::X400Address(_) => 3,
            GeneralName::DirectoryName(_) => 4,
            GeneralName::EdiPartyName(_) => 5,
            GeneralName::Uri(_) => 6,
            GeneralName::IpAddress(_) => 7,
            GeneralName::RegisteredId(_) => 8,
        }
    }

    /// Display label, e.g. "DNS Name".
    pub fn label(&self) -> &'static str {
        LABELS[self.tag_number()]
    }

    /// The address for 4 and 16 byte iPAddress values. Display keeps the
    /// raw content.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self {
            GeneralName::IpAddress(bytes) => ip_from_bytes(bytes),
            _ => None,
        }
    }
}

fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Some(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        return Some(IpAddr::V6(Ipv6Addr::from(octets)));
    }
    None
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralName::OtherName(other) => write!(f, "{}", other),
            GeneralName::Rfc822Name(v)
            | GeneralName::DnsName(v)
            | GeneralName::X400Address(v)
            | GeneralName::DirectoryName(v)
            | GeneralName::EdiPartyName(v)
            | GeneralName::Uri(v)
            | GeneralName::RegisteredId(v) => write!(f, "{}", v),
            GeneralName::IpAddress(bytes) => write!(f, "{}", lossy(bytes)),
        }
    }
}

/// otherName value. `type_id` is `None` when the nested structure could not
/// be decoded and `value` holds the raw content instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherName {
    pub type_id: Option<ObjectIdentifier>,
    pub value: String,
}

impl OtherName {
    fn decode_or_raw(content: &[u8]) -> Self {
        match parse_other_name(content) {
            Ok((type_id, value)) => OtherName {
                type_id: Some(type_id),
                value,
            },
            Err(_) => OtherName {
                type_id: None,
                value: lossy(content),
            },
        }
    }
}

impl fmt::Display for OtherName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_id {
            Some(oid) => write!(f, "{}: {}", oid, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

fn parse_other_name(content: &[u8]) -> Result<(ObjectIdentifier, String)> {
    // IMPLICIT form starts with the OID; some encoders add a SEQUENCE around it.
    let body = match der::read_all(content) {
        Ok(seq) if seq.tag() == Tag::SEQUENCE => seq.content(),
        _ => content,
    };
    let mut fields = Children::new(body);
    let type_id: ObjectIdentifier = fields
        .next()
        .ok_or(Error::MissingField(Kind::GeneralName, "type-id"))??
        .decode()?;
    let value = match fields.next() {
        Some(wrapper) => {
            let wrapper = wrapper?;
            if wrapper.tag() != Tag::context(0, true) {
                return Err(Error::ExpectedTag {
                    kind: Kind::GeneralName,
                    expected: Tag::context(0, true),
                    actual: wrapper.tag(),
                });
            }
            text_or_lossy(der::read_all(wrapper.content())?)
        }
        None => String::new(),
    };
    Ok((type_id, value))
}

/// Decodes one context-tagged GeneralName.
///
/// Tags outside 0..=8, or values that are not context-specific, yield
/// `None` instead of an error.
pub fn decode_general_name(tlv: Tlv<'_>) -> Option<GeneralName> {
    if tlv.tag().class() != Class::ContextSpecific {
        return None;
    }
    let content = tlv.content();
    let name = match tlv.tag().number() {
        0 => GeneralName::OtherName(OtherName::decode_or_raw(content)),
        1 => GeneralName::Rfc822Name(lossy(content)),
        2 => GeneralName::DnsName(lossy(content)),
        3 => GeneralName::X400Address(lossy(content)),
        4 => GeneralName::DirectoryName(lossy(content)),
        5 => GeneralName::EdiPartyName(lossy(content)),
        6 => GeneralName::Uri(lossy(content)),
        7 => GeneralName::IpAddress(content.to_vec()),
        8 => GeneralName::RegisteredId(lossy(content)),
        _ => return None,
    };
    Some(name)
}

/// Decodes `GeneralNames ::= SEQUENCE OF GeneralName` from its full encoding.
pub fn decode_general_names(bytes: &[u8]) -> Result<Vec<GeneralName>> {
    let sequence = read_value(Kind::GeneralName, bytes, Tag::SEQUENCE)?;
    decode_general_names_content(sequence.content())
}

/// Decodes the element list of an IMPLICIT-tagged GeneralNames.
pub fn decode_general_names_content(content: &[u8]) -> Result<Vec<GeneralName>> {
    let mut names = Vec::new();
    for element in Children::new(content) {
        if let Some(name) = decode_general_name(element?) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Groups names by label as `"Label: v1, v2"`, in order of first appearance.
pub fn group_general_names(names: &[GeneralName]) -> Vec<String> {
    let mut groups: Vec<(&'static str, Vec<String>)> = Vec::new();
    for name in names {
        let value = name.to_string();
        match groups.iter_mut().find(|(label, _)| *label == name.label()) {
            Some((_, values)) => values.push(value),
            None => groups.push((name.label(), vec![value])),
        }
    }
    groups
        .into_iter()
        .map(|(label, values)| format!("{}: {}", label, values.join(", ")))
        .collect()
}
