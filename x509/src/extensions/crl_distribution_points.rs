use asn1::{BitString, ObjectIdentifier};
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Children, Tag, Tlv};

use super::error::{Error, Kind, Result};
use super::general_name::{GeneralName, decode_general_names_content, group_general_names};
use super::{StandardExtension, expect_tag, read_value, text_or_lossy};

/*
RFC 5280 Section 4.2.1.13

CRLDistributionPoints ::= SEQUENCE SIZE (1..MAX) OF DistributionPoint

DistributionPoint ::= SEQUENCE {
    distributionPoint       [0]     DistributionPointName OPTIONAL,
    reasons                 [1]     ReasonFlags OPTIONAL,
    cRLIssuer               [2]     GeneralNames OPTIONAL }

DistributionPointName ::= CHOICE {
    fullName                [0]     GeneralNames,
    nameRelativeToCRLIssuer [1]     RelativeDistinguishedName }

ReasonFlags ::= BIT STRING {
    unused                  (0),
    keyCompromise           (1),
    cACompromise            (2),
    affiliationChanged      (3),
    superseded              (4),
    cessationOfOperation    (5),
    certificateHold         (6),
    privilegeWithdrawn      (7),
    aACompromise            (8) }
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CRLDistributionPoints {
    pub distribution_points: Vec<DistributionPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionPoint {
    pub distribution_point: Option<DistributionPointName>,
    pub reasons: Option<ReasonFlags>,
    pub crl_issuer: Option<Vec<GeneralName>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionPointName {
    FullName(Vec<GeneralName>),
    /// `(type, value)` pairs of the relative distinguished name.
    NameRelativeToCrlIssuer(Vec<(ObjectIdentifier, String)>),
}

impl DistributionPointName {
    fn values(&self) -> Vec<String> {
        match self {
            DistributionPointName::FullName(names) => group_general_names(names),
            DistributionPointName::NameRelativeToCrlIssuer(attributes) => attributes
                .iter()
                .map(|(oid, value)| format!("{}: {}", oid, value))
                .collect(),
        }
    }
}

const REASON_FLAGS: [&str; 9] = [
    "unused",
    "keyCompromise",
    "cACompromise",
    "affiliationChanged",
    "superseded",
    "cessationOfOperation",
    "certificateHold",
    "privilegeWithdrawn",
    "aACompromise",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonFlags(BitString);

impl ReasonFlags {
    pub fn labels(&self) -> Vec<&'static str> {
        REASON_FLAGS
            .iter()
            .enumerate()
            .filter_map(|(i, label)| self.0.bit(i).then_some(*label))
            .collect()
    }
}

impl DistributionPoint {
    /// Non-empty parts joined by a space, `None` when every part is empty.
    pub fn line(&self) -> Option<String> {
        let mut parts = Vec::new();
        let names = self
            .distribution_point
            .as_ref()
            .map(DistributionPointName::values)
            .unwrap_or_default();
        if !names.is_empty() {
            parts.push(format!("Distribution Point: {}", names.join(", ")));
        }
        let reasons = self
            .reasons
            .as_ref()
            .map(ReasonFlags::labels)
            .unwrap_or_default();
        if !reasons.is_empty() {
            parts.push(format!("Reasons: {}", reasons.join(", ")));
        }
        let issuer = self
            .crl_issuer
            .as_deref()
            .map(group_general_names)
            .unwrap_or_default();
        if !issuer.is_empty() {
            parts.push(format!("CRL Issuer: {}", issuer.join(", ")));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

impl StandardExtension for CRLDistributionPoints {
    const OID: &'static str = "2.5.29.31";
    const NAME: &'static str = "CRL Distribution Points";

    fn parse(value: &[u8]) -> Result<Self> {
        let sequence = read_value(Kind::CRLDistributionPoints, value, Tag::SEQUENCE)?;
        let distribution_points = sequence
            .children()
            .map(|point| -> Result<DistributionPoint> { point?.decode() })
            .collect::<Result<Vec<_>>>()?;
        Ok(CRLDistributionPoints {
            distribution_points,
        })
    }

    fn lines(&self) -> Vec<String> {
        self.distribution_points
            .iter()
            .filter_map(DistributionPoint::line)
            .collect()
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for DistributionPoint {}

impl<'a> Decoder<Tlv<'a>, DistributionPoint> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<DistributionPoint> {
        let sequence = expect_tag(Kind::CRLDistributionPoints, *self, Tag::SEQUENCE)?;
        let mut point = DistributionPoint::default();
        for field in sequence.children() {
            let field = field?;
            match field.tag().context_number() {
                Some(0) => point.distribution_point = decode_point_name(field.content())?,
                Some(1) => {
                    let bits = BitString::try_from(field.content())?;
                    point.reasons = Some(ReasonFlags(bits));
                }
                Some(2) => point.crl_issuer = Some(decode_general_names_content(field.content())?),
                _ => {
                    return Err(Error::UnexpectedTag {
                        kind: Kind::CRLDistributionPoints,
                        actual: field.tag(),
                    });
                }
            }
        }
        Ok(point)
    }
}

/// Decodes the CHOICE inside the EXPLICIT `[0]` wrapper.
fn decode_point_name(content: &[u8]) -> Result<Option<DistributionPointName>> {
    if content.is_empty() {
        return Ok(None);
    }
    let choice = der::read_all(content)?;
    let name = match choice.tag().context_number() {
        Some(0) => DistributionPointName::FullName(decode_general_names_content(choice.content())?),
        Some(1) => DistributionPointName::NameRelativeToCrlIssuer(decode_relative_name(
            choice.content(),
        )?),
        Some(n) => return Err(Error::UnsupportedChoice(n)),
        None => {
            return Err(Error::UnexpectedTag {
                kind: Kind::CRLDistributionPoints,
                actual: choice.tag(),
            });
        }
    };
    Ok(Some(name))
}

/// RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue
fn decode_relative_name(content: &[u8]) -> Result<Vec<(ObjectIdentifier, String)>> {
    let mut attributes = Vec::new();
    for attribute in Children::new(content) {
        let attribute = expect_tag(Kind::CRLDistributionPoints, attribute?, Tag::SEQUENCE)?;
        let mut fields = attribute.children();
        let oid: ObjectIdentifier = fields
            .next()
            .ok_or(Error::MissingField(Kind::CRLDistributionPoints, "type"))??
            .decode()?;
        let value = match fields.next() {
            Some(value) => text_or_lossy(value?),
            None => String::new(),
        };
        attributes.push((oid, value));
    }
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use certinfo::encoder::Encoder;
    use rstest::rstest;

    use super::*;

    fn context(number: u32, constructed: bool, content: &[u8]) -> Vec<u8> {
        der::encode(Tag::context(number, constructed), content)
    }

    fn sequence(parts: &[Vec<u8>]) -> Vec<u8> {
        der::encode(Tag::SEQUENCE, &parts.concat())
    }

    fn full_name(uri: &[u8]) -> Vec<u8> {
        context(0, true, &context(0, true, &context(6, false, uri)))
    }

    #[rstest]
    #[case::single_uri(
        sequence(&[sequence(&[full_name(b"http://crl.example.com/ca.crl")])]),
        vec!["Distribution Point: URI: http://crl.example.com/ca.crl"]
    )]
    #[case::empty_point_dropped(
        sequence(&[sequence(&[]), sequence(&[full_name(b"http://crl.example.com/a.crl")])]),
        vec!["Distribution Point: URI: http://crl.example.com/a.crl"]
    )]
    #[case::reasons_and_issuer(
        sequence(&[sequence(&[
            full_name(b"http://crl.example.com/b.crl"),
            context(1, false, &[0x05, 0x60]),
            context(2, true, &context(2, false, b"ca.example.com")),
        ])]),
        vec!["Distribution Point: URI: http://crl.example.com/b.crl Reasons: keyCompromise, cACompromise CRL Issuer: DNS Name: ca.example.com"]
    )]
    #[case::relative_name(
        sequence(&[sequence(&[context(0, true, &context(1, true, &sequence(&[
            "2.5.4.3".parse::<ObjectIdentifier>().unwrap().encode().unwrap(),
            der::encode(Tag::PRINTABLE_STRING, b"CRL1"),
        ])))])]),
        vec!["Distribution Point: 2.5.4.3: CRL1"]
    )]
    #[case::all_empty(sequence(&[sequence(&[]), sequence(&[])]), vec![])]
    fn test_crl_distribution_points(#[case] input: Vec<u8>, #[case] expected: Vec<&str>) {
        let points = CRLDistributionPoints::parse(&input).unwrap();
        assert_eq!(expected, points.lines());
    }

    #[test]
    fn test_crl_distribution_points_unsupported_choice() {
        let input = sequence(&[sequence(&[context(0, true, &context(2, true, &[]))])]);
        let err = CRLDistributionPoints::parse(&input).unwrap_err();
        assert_eq!(Error::UnsupportedChoice(2), err);
        assert_eq!("unsupported distribution point tag 2", err.to_string());
    }

    #[test]
    fn test_reason_flags_labels() {
        let flags = ReasonFlags(BitString::new(7, vec![0xff, 0x80]));
        assert_eq!(REASON_FLAGS.to_vec(), flags.labels());
    }
}
