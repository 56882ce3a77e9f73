//! Typed ASN.1 primitive values decoded from [`der::Tlv`].
//!
//! Each type implements [`Decoder`] on `Tlv` and checks the universal tag
//! before reading the content. Types that also appear IMPLICIT-tagged in
//! X.509 (INTEGER, OBJECT IDENTIFIER, BIT STRING) can be built from raw
//! content bytes with `TryFrom<&[u8]>`.

use std::{fmt::Display, str::FromStr};

use certinfo::decoder::{DecodableFrom, Decoder};
use certinfo::encoder::{EncodableTo, Encoder};
use chrono::{DateTime, NaiveDateTime, Utc};
use der::{Tag, Tlv};
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod error;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boolean(bool);

impl Boolean {
    pub fn value(&self) -> bool {
        self.0
    }
}

impl From<Boolean> for bool {
    fn from(value: Boolean) -> Self {
        value.0
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for Boolean {}

impl<'a> Decoder<Tlv<'a>, Boolean> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<Boolean> {
        let tlv = self.expect(Tag::BOOLEAN)?;
        match tlv.content() {
            [0x00] => Ok(Boolean(false)),
            [0xff] => Ok(Boolean(true)),
            _ => Err(Error::InvalidBoolean),
        }
    }
}

// INTEGER values are arbitrary sized and signed.
// Serial numbers are the only place where this matters in X.509.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.inner.to_u32()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }

    /// Big-endian magnitude without a sign byte.
    pub fn magnitude_bytes(&self) -> Vec<u8> {
        match self.inner.sign() {
            Sign::NoSign => Vec::new(),
            _ => self.inner.magnitude().to_bytes_be(),
        }
    }

    /// Number of significant bits of the magnitude.
    pub fn bits(&self) -> u64 {
        self.inner.bits()
    }
}

impl TryFrom<&[u8]> for Integer {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::IntegerNoData);
        }
        Ok(Integer {
            inner: BigInt::from_signed_bytes_be(value),
        })
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for Integer {}

impl<'a> Decoder<Tlv<'a>, Integer> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<Integer> {
        Integer::try_from(self.expect(Tag::INTEGER)?.content())
    }
}

impl Serialize for Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn components(&self) -> &[u64] {
        &self.inner
    }

    fn content_bytes(&self) -> Vec<u8> {
        let mut arcs = self.inner.iter().copied();
        let first = arcs.next().unwrap_or(0) * 40 + arcs.next().unwrap_or(0);
        let mut out = Vec::new();
        for arc in std::iter::once(first).chain(arcs) {
            let mut groups = vec![(arc & 0x7f) as u8];
            let mut rest = arc >> 7;
            while rest > 0 {
                groups.push((rest & 0x7f) as u8 | 0x80);
                rest >>= 7;
            }
            out.extend(groups.iter().rev());
        }
        out
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::ObjectIdentifierNoData);
        }

        let mut subidentifiers = Vec::new();
        let mut val = 0u64;
        let mut pending = false;
        for b in value {
            if val > (u64::MAX >> 7) {
                return Err(Error::ObjectIdentifierComponentTooLarge);
            }
            val = (val << 7) | u64::from(b & 0x7f);
            pending = b & 0x80 != 0;
            if !pending {
                subidentifiers.push(val);
                val = 0;
            }
        }
        if pending {
            return Err(Error::ObjectIdentifierIncompleteEncoding);
        }

        // The first subidentifier packs the first two arcs.
        let first = subidentifiers[0];
        let mut inner = match first {
            0..=39 => vec![0, first],
            40..=79 => vec![1, first - 40],
            _ => vec![2, first - 80],
        };
        inner.extend_from_slice(&subidentifiers[1..]);
        Ok(ObjectIdentifier { inner })
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for ObjectIdentifier {}

impl<'a> Decoder<Tlv<'a>, ObjectIdentifier> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<ObjectIdentifier> {
        ObjectIdentifier::try_from(self.expect(Tag::OBJECT_IDENTIFIER)?.content())
    }
}

impl EncodableTo<ObjectIdentifier> for Vec<u8> {}

impl Encoder<ObjectIdentifier, Vec<u8>> for ObjectIdentifier {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        if self.inner.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        Ok(der::encode(Tag::OBJECT_IDENTIFIER, &self.content_bytes()))
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .inner
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .split('.')
            .map(|c| {
                if c.is_empty() || !c.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::ObjectIdentifierInvalidComponent(c.to_string()));
                }
                c.parse::<u64>().map_err(Error::ParseInt)
            })
            .collect::<Result<Vec<u64>>>()?;
        if inner.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        Ok(ObjectIdentifier { inner })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Serialize for ObjectIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Self {
        BitString { unused, data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.unused as usize)
    }

    /// Named-bit lookup: bit 0 is the most significant bit of the first byte.
    /// Bits past the end read as unset.
    pub fn bit(&self, index: usize) -> bool {
        if index >= self.bit_len() {
            return false;
        }
        self.data[index / 8] & (0x80 >> (index % 8)) != 0
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        let (&unused, data) = value.split_first().ok_or(Error::BitStringNoData)?;
        if unused > 7 || (data.is_empty() && unused != 0) {
            return Err(Error::BitStringUnusedBitsOutOfRange(unused));
        }
        Ok(BitString {
            unused,
            data: data.to_vec(),
        })
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for BitString {}

impl<'a> Decoder<Tlv<'a>, BitString> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<BitString> {
        BitString::try_from(self.expect(Tag::BIT_STRING)?.content())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString(Vec<u8>);

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<OctetString> for Vec<u8> {
    fn from(value: OctetString) -> Self {
        value.0
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for OctetString {}

impl<'a> Decoder<Tlv<'a>, OctetString> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<OctetString> {
        Ok(OctetString(
            self.expect(Tag::OCTET_STRING)?.content().to_vec(),
        ))
    }
}

/// Any of the character string types used in names and policy qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Text> for String {
    fn from(value: Text) -> Self {
        value.0
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_printable(b: u8) -> bool {
    // '*' and '&' are not in the PrintableString alphabet but are common in the wild.
    b.is_ascii_alphanumeric() || b" '()+,-./:=?*&".contains(&b)
}

impl<'a> DecodableFrom<Tlv<'a>> for Text {}

impl<'a> Decoder<Tlv<'a>, Text> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<Text> {
        let content = self.content();
        let s = match self.tag() {
            Tag::UTF8_STRING => String::from_utf8(content.to_vec())
                .map_err(|_| Error::Utf8StringInvalidUtf8)?,
            Tag::PRINTABLE_STRING => {
                if !content.iter().copied().all(is_printable) {
                    return Err(Error::PrintableStringInvalidEncoding);
                }
                content.iter().map(|&b| b as char).collect()
            }
            Tag::IA5_STRING | Tag::VISIBLE_STRING => {
                if !content.is_ascii() {
                    return Err(Error::Ia5StringInvalidEncoding);
                }
                content.iter().map(|&b| b as char).collect()
            }
            // Latin-1 maps one to one onto the first 256 code points.
            Tag::T61_STRING => content.iter().map(|&b| b as char).collect(),
            Tag::BMP_STRING => {
                if content.len() % 2 != 0 {
                    return Err(Error::BmpStringOddLength(content.len()));
                }
                let units = content
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect::<Vec<_>>();
                String::from_utf16(&units).map_err(|_| Error::BmpStringInvalidUtf16)?
            }
            actual => {
                return Err(Error::UnexpectedTag {
                    expected: "string",
                    actual,
                });
            }
        };
        Ok(Text(s))
    }
}

/// UTCTime or GeneralizedTime, always expressed in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(DateTime<Utc>);

impl Time {
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    fn parse_utc_time(s: &str) -> Result<Self> {
        let invalid = || Error::UtcTimeInvalidFormat(s.to_string());
        let body = s.strip_suffix('Z').ok_or_else(invalid)?;
        if !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let body = match body.len() {
            12 => body.to_string(),
            10 => format!("{body}00"),
            _ => return Err(invalid()),
        };
        // Two digit years: 50-99 are 19xx, 00-49 are 20xx.
        let yy: u32 = body[..2].parse().map_err(|_| invalid())?;
        let century = if yy >= 50 { "19" } else { "20" };
        NaiveDateTime::parse_from_str(&format!("{century}{body}"), "%Y%m%d%H%M%S")
            .map(|t| Time(t.and_utc()))
            .map_err(|_| invalid())
    }

    fn parse_generalized_time(s: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%S%.fZ")
            .map(|t| Time(t.and_utc()))
            .map_err(|_| Error::GeneralizedTimeInvalidFormat(s.to_string()))
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Time(value)
    }
}

impl<'a> DecodableFrom<Tlv<'a>> for Time {}

impl<'a> Decoder<Tlv<'a>, Time> for Tlv<'a> {
    type Error = Error;

    fn decode(&self) -> Result<Time> {
        let s = String::from_utf8_lossy(self.content());
        match self.tag() {
            Tag::UTC_TIME => Time::parse_utc_time(&s),
            Tag::GENERALIZED_TIME => Time::parse_generalized_time(&s),
            actual => Err(Error::UnexpectedTag {
                expected: "time",
                actual,
            }),
        }
    }
}
