use asn1::BitString;
use certinfo::decoder::{DecodableFrom, Decoder};
use certinfo::encoder::{EncodableTo, Encoder};
use der::{Tag, Tlv};
use serde::{Deserialize, Serialize};

use super::error::{Error, Kind, Result};
use super::{StandardExtension, read_value};

/*
RFC 5280 Section 4.2.1.3
KeyUsage ::= BIT STRING {
    digitalSignature        (0),
    nonRepudiation          (1), -- renamed to contentCommitment
    keyEncipherment         (2),
    dataEncipherment        (3),
    keyAgreement            (4),
    keyCertSign             (5),
    cRLSign                 (6),
    encipherOnly            (7),
    decipherOnly            (8)
}
*/

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyUsage {
    pub digital_signature: bool,
    pub content_commitment: bool,
    pub key_encipherment: bool,
    pub data_encipherment: bool,
    pub key_agreement: bool,
    pub key_cert_sign: bool,
    pub crl_sign: bool,
    pub encipher_only: bool,
    pub decipher_only: bool,
}

/// Labels used in the extension block, in bit order.
const EXTENSION_LABELS: [&str; 9] = [
    "Digital Signature",
    "Content Commitment",
    "Key Encipherment",
    "Data Encipherment",
    "Key Agreement",
    "Key Cert Sign",
    "CRLs Sign",
    "Encipher Only",
    "Decipher Only",
];

/// Labels used in the certificate summary, in bit order.
const SUMMARY_LABELS: [&str; 9] = [
    "Digital Signature",
    "Content Commitment",
    "Key Encipherment",
    "Data Encipherment",
    "Key Agreement",
    "Cert Sign",
    "CRL Sign",
    "Encipher Only",
    "Decipher Only",
];

impl KeyUsage {
    fn bits(&self) -> [bool; 9] {
        [
            self.digital_signature,
            self.content_commitment,
            self.key_encipherment,
            self.data_encipherment,
            self.key_agreement,
            self.key_cert_sign,
            self.crl_sign,
            self.encipher_only,
            self.decipher_only,
        ]
    }

    fn from_bits(bits: &BitString) -> Self {
        KeyUsage {
            digital_signature: bits.bit(0),
            content_commitment: bits.bit(1),
            key_encipherment: bits.bit(2),
            data_encipherment: bits.bit(3),
            key_agreement: bits.bit(4),
            key_cert_sign: bits.bit(5),
            crl_sign: bits.bit(6),
            encipher_only: bits.bit(7),
            decipher_only: bits.bit(8),
        }
    }

    fn select(&self, labels: &[&'static str; 9]) -> Vec<&'static str> {
        self.bits()
            .into_iter()
            .zip(labels)
            .filter_map(|(set, label)| set.then_some(*label))
            .collect()
    }

    /// Set-bit labels as shown in the extension block.
    pub fn labels(&self) -> Vec<&'static str> {
        self.select(&EXTENSION_LABELS)
    }

    /// Set-bit labels as shown in the certificate summary.
    pub fn usage_names(&self) -> Vec<&'static str> {
        self.select(&SUMMARY_LABELS)
    }
}

impl StandardExtension for KeyUsage {
    const OID: &'static str = "2.5.29.15";
    const NAME: &'static str = "Key Usage";

    fn parse(value: &[u8]) -> Result<Self> {
        read_value(Kind::KeyUsage, value, Tag::BIT_STRING)?.decode()
    }

    fn lines(&self) -> Vec<String> {
        self.labels().into_iter().map(String::from).collect()
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for KeyUsage {}

impl<'a> Decoder<Tlv<'a>, KeyUsage> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<KeyUsage> {
        let bits: BitString = self.decode()?;
        Ok(KeyUsage::from_bits(&bits))
    }
}

impl EncodableTo<KeyUsage> for Vec<u8> {}

/// Encodes the flags as a DER BIT STRING with trailing zero bits removed.
impl Encoder<KeyUsage, Vec<u8>> for KeyUsage {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let bits = self.bits();
        let last_bit = bits.iter().rposition(|&b| b).map_or(0, |p| p + 1);
        let num_bytes = last_bit.div_ceil(8);

        let mut content = vec![0u8; num_bytes + 1];
        content[0] = (num_bytes * 8 - last_bit) as u8;
        for (index, _) in bits.iter().enumerate().filter(|(_, set)| **set) {
            content[1 + index / 8] |= 0x80 >> (index % 8);
        }
        Ok(der::encode(Tag::BIT_STRING, &content))
    }
}
