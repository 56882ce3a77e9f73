use std::fmt;

use asn1::{BitString, Integer};
use certinfo::decoder::{DecodableFrom, Decoder};
use der::{Tag, Tlv};

use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result};
use crate::format::{hex_array, split_string};
use crate::name::expect;

const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";

/*
RFC 5280 Section 4.1.2.7
SubjectPublicKeyInfo  ::=  SEQUENCE  {
    algorithm            AlgorithmIdentifier,
    subjectPublicKey     BIT STRING  }

RFC 8017 Appendix A.1.1
RSAPublicKey ::= SEQUENCE {
    modulus           INTEGER,  -- n
    publicExponent    INTEGER   -- e
}
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub subject_public_key: BitString,
}

impl SubjectPublicKeyInfo {
    /// Decodes the key as RSA, `None` for other algorithms.
    pub fn rsa_public_key(&self) -> Option<Result<RsaPublicKey>> {
        (self.algorithm.algorithm == RSA_ENCRYPTION).then(|| -> Result<RsaPublicKey> {
            let key = der::read_all(self.subject_public_key.as_bytes())?;
            key.decode()
        })
    }

    /// Multi-line description: RSA keys show modulus and exponent, other
    /// algorithms only their name.
    pub fn describe(&self) -> String {
        match self.rsa_public_key() {
            Some(Ok(key)) => key.to_string(),
            Some(Err(err)) => format!("Public Key Algorithm: RSA\n    {}", err),
            None => format!("Public Key Algorithm: {}", self.algorithm.public_key_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub modulus: Integer,
    pub public_exponent: Integer,
}

impl fmt::Display for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = vec![
            "Public Key Algorithm: RSA".to_string(),
            format!("    Public Key: ({} bit)", self.modulus.bits()),
            "    Modulus".to_string(),
        ];
        lines.extend(split_string(
            &hex_array(&self.modulus.magnitude_bytes()),
            "        ",
            45,
        ));
        lines.push(format!("    Exponent: {}", self.public_exponent));
        write!(f, "{}", lines.join("\n"))
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for SubjectPublicKeyInfo {}

impl<'a> Decoder<Tlv<'a>, SubjectPublicKeyInfo> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let sequence = expect(*self, "SubjectPublicKeyInfo", Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let algorithm: AlgorithmIdentifier = fields
            .next()
            .ok_or(Error::MissingField("SubjectPublicKeyInfo", "algorithm"))??
            .decode()?;
        let subject_public_key: BitString = fields
            .next()
            .ok_or(Error::MissingField("SubjectPublicKeyInfo", "subjectPublicKey"))??
            .decode()?;
        Ok(SubjectPublicKeyInfo {
            algorithm,
            subject_public_key,
        })
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for RsaPublicKey {}

impl<'a> Decoder<Tlv<'a>, RsaPublicKey> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<RsaPublicKey> {
        let sequence = expect(*self, "RSAPublicKey", Tag::SEQUENCE)?;
        let mut fields = sequence.children();
        let modulus: Integer = fields
            .next()
            .ok_or(Error::MissingField("RSAPublicKey", "modulus"))??
            .decode()?;
        let public_exponent: Integer = fields
            .next()
            .ok_or(Error::MissingField("RSAPublicKey", "publicExponent"))??
            .decode()?;
        Ok(RsaPublicKey {
            modulus,
            public_exponent,
        })
    }
}
