use asn1::{Boolean, Integer};
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};
use serde::{Deserialize, Serialize};

use super::error::{Error, Kind, Result};
use super::{StandardExtension, read_value};

/*
RFC 5280 Section 4.2.1.9
BasicConstraints ::= SEQUENCE {
    cA                      BOOLEAN DEFAULT FALSE,
    pathLenConstraint       INTEGER (0..MAX) OPTIONAL
}
*/

/// Basic Constraints extension ([RFC 5280 Section 4.2.1.9](https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.9)).
///
/// Identifies whether the subject of the certificate is a CA and the maximum
/// depth of valid certification paths that include this certificate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicConstraints {
    /// Whether this certificate represents a CA
    pub ca: bool,
    /// Optional maximum path length for certificate chains
    pub path_len_constraint: Option<u32>,
}

impl StandardExtension for BasicConstraints {
    const OID: &'static str = "2.5.29.19";
    const NAME: &'static str = "Basic Constraints";

    fn parse(value: &[u8]) -> Result<Self> {
        read_value(Kind::BasicConstraints, value, Tag::SEQUENCE)?.decode()
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("CA: {}", self.ca)];
        // A zero constraint is indistinguishable from "absent" in the output.
        if let Some(n) = self.path_len_constraint.filter(|n| *n != 0) {
            lines.push(format!("PathLenConstraint: {}", n));
        }
        lines
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for BasicConstraints {}

impl<'a> Decoder<Tlv<'a>, BasicConstraints> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<BasicConstraints> {
        let mut constraints = BasicConstraints::default();
        for field in self.children() {
            let field = field?;
            match field.tag() {
                Tag::BOOLEAN => {
                    let ca: Boolean = field.decode()?;
                    constraints.ca = ca.value();
                }
                Tag::INTEGER => {
                    let n: Integer = field.decode()?;
                    constraints.path_len_constraint =
                        Some(n.to_u32().ok_or(Error::PathLenConstraintOutOfRange)?);
                }
                actual => {
                    return Err(Error::UnexpectedTag {
                        kind: Kind::BasicConstraints,
                        actual,
                    });
                }
            }
        }
        Ok(constraints)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty(&[0x30, 0x00], false, None, vec!["CA: false"])]
    #[case::ca(&[0x30, 0x03, 0x01, 0x01, 0xff], true, None, vec!["CA: true"])]
    #[case::ca_path_len(&[0x30, 0x06, 0x01, 0x01, 0xff, 0x02, 0x01, 0x03], true, Some(3), vec!["CA: true", "PathLenConstraint: 3"])]
    #[case::path_len_zero(&[0x30, 0x06, 0x01, 0x01, 0xff, 0x02, 0x01, 0x00], true, Some(0), vec!["CA: true"])]
    #[case::explicit_false(&[0x30, 0x03, 0x01, 0x01, 0x00], false, None, vec!["CA: false"])]
    fn test_basic_constraints(
        #[case] input: &[u8],
        #[case] ca: bool,
        #[case] path_len: Option<u32>,
        #[case] lines: Vec<&str>,
    ) {
        let bc = BasicConstraints::parse(input).unwrap();
        assert_eq!(ca, bc.ca);
        assert_eq!(path_len, bc.path_len_constraint);
        assert_eq!(lines, bc.lines());
    }

    #[rstest]
    #[case::negative(&[0x30, 0x03, 0x02, 0x01, 0xff], Error::PathLenConstraintOutOfRange)]
    #[case::too_large(&[0x30, 0x07, 0x02, 0x05, 0x01, 0x00, 0x00, 0x00, 0x00], Error::PathLenConstraintOutOfRange)]
    #[case::unexpected(&[0x30, 0x02, 0x05, 0x00], Error::UnexpectedTag { kind: Kind::BasicConstraints, actual: Tag::NULL })]
    #[case::not_sequence(&[0x01, 0x01, 0xff], Error::ExpectedTag { kind: Kind::BasicConstraints, expected: Tag::SEQUENCE, actual: Tag::BOOLEAN })]
    fn test_basic_constraints_error(#[case] input: &[u8], #[case] expected: Error) {
        assert_eq!(expected, BasicConstraints::parse(input).unwrap_err());
    }
}
