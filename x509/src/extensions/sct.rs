use asn1::OctetString;
use certinfo::decoder::Decoder;
use der::Tag;

use super::StandardExtension;
use super::error::Result;

/*
RFC 6962 Section 3.3
SignedCertificateTimestampList ::= OCTET STRING
*/

/// Embedded SCT list. The TLS-encoded list itself is not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedCertificateTimestampList {
    pub raw: Vec<u8>,
}

impl StandardExtension for SignedCertificateTimestampList {
    const OID: &'static str = "1.3.6.1.4.1.11129.2.4.2";
    const NAME: &'static str = "CT Precertificate SCTs";

    fn parse(value: &[u8]) -> Result<Self> {
        let raw = match der::read_all(value) {
            Ok(tlv) if tlv.tag() == Tag::OCTET_STRING => {
                let list: OctetString = tlv.decode()?;
                list.into()
            }
            _ => value.to_vec(),
        };
        Ok(SignedCertificateTimestampList { raw })
    }

    fn lines(&self) -> Vec<String> {
        vec!["...".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::octet_string(&[0x04, 0x02, 0x00, 0x00], vec![0x00, 0x00])]
    #[case::raw(&[0x00, 0x01], vec![0x00, 0x01])]
    fn test_sct_list(#[case] input: &[u8], #[case] raw: Vec<u8>) {
        let list = SignedCertificateTimestampList::parse(input).unwrap();
        assert_eq!(raw, list.raw);
        assert_eq!(vec!["...".to_string()], list.lines());
    }
}
