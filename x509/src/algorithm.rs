use asn1::ObjectIdentifier;
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};

use crate::error::{Error, Result};
use crate::name::expect;

/*
RFC 5280 Section 4.1.1.2
AlgorithmIdentifier  ::=  SEQUENCE  {
    algorithm               OBJECT IDENTIFIER,
    parameters              ANY DEFINED BY algorithm OPTIONAL
}
*/

const RSASSA_PSS: &str = "1.2.840.113549.1.1.10";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    /// Parameters as raw DER, `None` when omitted.
    pub parameters: Option<Vec<u8>>,
}

impl AlgorithmIdentifier {
    /// Signature algorithm name such as `SHA256-RSA`, or the OID when unknown.
    pub fn signature_name(&self) -> String {
        let oid = self.algorithm.to_string();
        if oid == RSASSA_PSS {
            return self
                .pss_hash()
                .and_then(|hash| pss_name(&hash))
                .map(String::from)
                .unwrap_or(oid);
        }
        signature_algorithm_name(&oid).map(String::from).unwrap_or(oid)
    }

    /// Public key algorithm name such as `RSA`, or the OID when unknown.
    pub fn public_key_name(&self) -> String {
        let oid = self.algorithm.to_string();
        public_key_algorithm_name(&oid).map(String::from).unwrap_or(oid)
    }

    /*
    RSASSA-PSS-params ::= SEQUENCE {
        hashAlgorithm      [0] HashAlgorithm DEFAULT sha1,
        ...
    }
    */
    fn pss_hash(&self) -> Option<String> {
        let params = der::read_all(self.parameters.as_deref()?).ok()?;
        let hash = params
            .children()
            .filter_map(|field| field.ok())
            .find(|field| field.tag() == Tag::context(0, true))?;
        let hash = der::read_all(hash.content()).ok()?;
        let hash: AlgorithmIdentifier = hash.decode().ok()?;
        Some(hash.algorithm.to_string())
    }
}

fn pss_name(hash: &str) -> Option<&'static str> {
    let name = match hash {
        "2.16.840.1.101.3.4.2.1" => "SHA256-RSAPSS",
        "2.16.840.1.101.3.4.2.2" => "SHA384-RSAPSS",
        "2.16.840.1.101.3.4.2.3" => "SHA512-RSAPSS",
        _ => return None,
    };
    Some(name)
}

pub fn signature_algorithm_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "1.2.840.113549.1.1.2" => "MD2-RSA",
        "1.2.840.113549.1.1.4" => "MD5-RSA",
        "1.2.840.113549.1.1.5" | "1.3.14.3.2.29" => "SHA1-RSA",
        "1.2.840.113549.1.1.11" => "SHA256-RSA",
        "1.2.840.113549.1.1.12" => "SHA384-RSA",
        "1.2.840.113549.1.1.13" => "SHA512-RSA",
        "1.2.840.10040.4.3" => "DSA-SHA1",
        "2.16.840.1.101.3.4.3.2" => "DSA-SHA256",
        "1.2.840.10045.4.1" => "ECDSA-SHA1",
        "1.2.840.10045.4.3.2" => "ECDSA-SHA256",
        "1.2.840.10045.4.3.3" => "ECDSA-SHA384",
        "1.2.840.10045.4.3.4" => "ECDSA-SHA512",
        "1.3.101.112" => "Ed25519",
        _ => return None,
    };
    Some(name)
}

pub fn public_key_algorithm_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "1.2.840.113549.1.1.1" => "RSA",
        "1.2.840.10040.4.1" => "DSA",
        "1.2.840.10045.2.1" => "ECDSA",
        "1.3.101.110" => "X25519",
        "1.3.101.112" => "Ed25519",
        _ => return None,
    };
    Some(name)
}

impl<'a> DecodableFrom<Tlv<'a>> for AlgorithmIdentifier {}

impl<'a> Decoder<Tlv<'a>, AlgorithmIdentifier> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<AlgorithmIdentifier> {
        let sequence = expect(*self, "AlgorithmIdentifier", Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let algorithm: ObjectIdentifier = fields
            .next()
            .ok_or(Error::MissingField("AlgorithmIdentifier", "algorithm"))??
            .decode()?;
        let parameters = match fields.next() {
            Some(parameters) => Some(parameters?.to_der()),
            None => None,
        };
        if fields.next().is_some() {
            return Err(Error::TrailingFields("AlgorithmIdentifier"));
        }
        Ok(AlgorithmIdentifier {
            algorithm,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use certinfo::encoder::Encoder;
    use rstest::rstest;

    use super::*;

    fn oid(s: &str) -> Vec<u8> {
        s.parse::<ObjectIdentifier>().unwrap().encode().unwrap()
    }

    fn algorithm(parts: &[Vec<u8>]) -> AlgorithmIdentifier {
        let encoded = der::encode(Tag::SEQUENCE, &parts.concat());
        der::read_all(&encoded).unwrap().decode().unwrap()
    }

    fn pss(hash: &str) -> Vec<u8> {
        let hash = der::encode(Tag::SEQUENCE, &[oid(hash), vec![0x05, 0x00]].concat());
        der::encode(Tag::SEQUENCE, &der::encode(Tag::context(0, true), &hash))
    }

    #[rstest]
    #[case::sha256_rsa(vec![oid("1.2.840.113549.1.1.11"), vec![0x05, 0x00]], "SHA256-RSA")]
    #[case::sha1_rsa_oiw(vec![oid("1.3.14.3.2.29")], "SHA1-RSA")]
    #[case::ecdsa_sha384(vec![oid("1.2.840.10045.4.3.3")], "ECDSA-SHA384")]
    #[case::ed25519(vec![oid("1.3.101.112")], "Ed25519")]
    #[case::pss_sha256(vec![oid("1.2.840.113549.1.1.10"), pss("2.16.840.1.101.3.4.2.1")], "SHA256-RSAPSS")]
    #[case::pss_sha512(vec![oid("1.2.840.113549.1.1.10"), pss("2.16.840.1.101.3.4.2.3")], "SHA512-RSAPSS")]
    #[case::pss_default_hash(vec![oid("1.2.840.113549.1.1.10"), der::encode(Tag::SEQUENCE, &[])], "1.2.840.113549.1.1.10")]
    #[case::unknown(vec![oid("1.2.3.4")], "1.2.3.4")]
    fn test_signature_name(#[case] parts: Vec<Vec<u8>>, #[case] expected: &str) {
        assert_eq!(expected, algorithm(&parts).signature_name());
    }

    #[rstest]
    #[case("1.2.840.113549.1.1.1", "RSA")]
    #[case("1.2.840.10045.2.1", "ECDSA")]
    #[case("1.3.101.110", "X25519")]
    #[case("1.2.3.4", "1.2.3.4")]
    fn test_public_key_name(#[case] algorithm_oid: &str, #[case] expected: &str) {
        assert_eq!(expected, algorithm(&[oid(algorithm_oid)]).public_key_name());
    }

    #[test]
    fn test_algorithm_identifier_parameters() {
        let id = algorithm(&[oid("1.2.840.113549.1.1.11"), vec![0x05, 0x00]]);
        assert_eq!(Some(vec![0x05, 0x00]), id.parameters);
        let id = algorithm(&[oid("1.3.101.112")]);
        assert_eq!(None, id.parameters);
    }
}
