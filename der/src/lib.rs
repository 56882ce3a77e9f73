//! Primitive DER reader.
//!
//! [`read`] decodes exactly one value at the front of a buffer and hands the
//! remaining bytes back to the caller. Nothing here recurses: walking a
//! SEQUENCE means calling the reader again on its content, which
//! [`Tlv::children`] does one element at a time.

use std::fmt::{Display, Formatter};

use certinfo::decoder::{DecodableFrom, Decoder};
use certinfo::encoder::{EncodableTo, Encoder};
use nom::error::ErrorKind;
use nom::{IResult, Parser};

pub mod error;

pub use error::Error;

type NomError<'a> = nom::error::Error<&'a [u8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl From<u8> for Class {
    fn from(value: u8) -> Self {
        match value >> 6 {
            0 => Class::Universal,
            1 => Class::Application,
            2 => Class::ContextSpecific,
            _ => Class::Private,
        }
    }
}

impl Class {
    fn bits(self) -> u8 {
        match self {
            Class::Universal => 0x00,
            Class::Application => 0x40,
            Class::ContextSpecific => 0x80,
            Class::Private => 0xc0,
        }
    }
}

/// Identifier octets of a DER value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    class: Class,
    constructed: bool,
    number: u32,
}

impl Tag {
    pub const BOOLEAN: Tag = Tag::universal(0x01, false);
    pub const INTEGER: Tag = Tag::universal(0x02, false);
    pub const BIT_STRING: Tag = Tag::universal(0x03, false);
    pub const OCTET_STRING: Tag = Tag::universal(0x04, false);
    pub const NULL: Tag = Tag::universal(0x05, false);
    pub const OBJECT_IDENTIFIER: Tag = Tag::universal(0x06, false);
    pub const UTF8_STRING: Tag = Tag::universal(0x0c, false);
    pub const SEQUENCE: Tag = Tag::universal(0x10, true);
    pub const SET: Tag = Tag::universal(0x11, true);
    pub const PRINTABLE_STRING: Tag = Tag::universal(0x13, false);
    pub const T61_STRING: Tag = Tag::universal(0x14, false);
    pub const IA5_STRING: Tag = Tag::universal(0x16, false);
    pub const UTC_TIME: Tag = Tag::universal(0x17, false);
    pub const GENERALIZED_TIME: Tag = Tag::universal(0x18, false);
    pub const VISIBLE_STRING: Tag = Tag::universal(0x1a, false);
    pub const UNIVERSAL_STRING: Tag = Tag::universal(0x1c, false);
    pub const BMP_STRING: Tag = Tag::universal(0x1e, false);

    pub const fn new(class: Class, constructed: bool, number: u32) -> Self {
        Tag {
            class,
            constructed,
            number,
        }
    }

    pub const fn universal(number: u32, constructed: bool) -> Self {
        Tag::new(Class::Universal, constructed, number)
    }

    /// `[number]` in the context-specific class.
    pub const fn context(number: u32, constructed: bool) -> Self {
        Tag::new(Class::ContextSpecific, constructed, number)
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Context-specific tag number, ignoring the constructed bit.
    pub fn context_number(&self) -> Option<u32> {
        (self.class == Class::ContextSpecific).then_some(self.number)
    }

    fn encode(&self) -> Vec<u8> {
        let first = self.class.bits() | if self.constructed { 0x20 } else { 0x00 };
        if self.number < 0x1f {
            return vec![first | self.number as u8];
        }
        let mut out = vec![first | 0x1f];
        out.extend(base128(self.number as u64));
        out
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.class {
            Class::Universal => match *self {
                Tag::BOOLEAN => write!(f, "BOOLEAN"),
                Tag::INTEGER => write!(f, "INTEGER"),
                Tag::BIT_STRING => write!(f, "BIT STRING"),
                Tag::OCTET_STRING => write!(f, "OCTET STRING"),
                Tag::NULL => write!(f, "NULL"),
                Tag::OBJECT_IDENTIFIER => write!(f, "OBJECT IDENTIFIER"),
                Tag::SEQUENCE => write!(f, "SEQUENCE"),
                Tag::SET => write!(f, "SET"),
                _ => write!(f, "UNIVERSAL {}", self.number),
            },
            Class::Application => write!(f, "[APPLICATION {}]", self.number),
            Class::ContextSpecific => write!(f, "[{}]", self.number),
            Class::Private => write!(f, "[PRIVATE {}]", self.number),
        }
    }
}

/// One decoded value borrowing its content from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    tag: Tag,
    content: &'a [u8],
}

impl<'a> Tlv<'a> {
    pub fn new(tag: Tag, content: &'a [u8]) -> Self {
        Tlv { tag, content }
    }

    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Tlv<'a>> {
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, content) =
            nom::bytes::complete::take::<usize, &[u8], NomError>(length).parse(input)?;
        Ok((input, Tlv { tag, content }))
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn content(&self) -> &'a [u8] {
        self.content
    }

    /// Returns `self` when the tag matches, `UnexpectedTag` otherwise.
    pub fn expect(self, tag: Tag) -> Result<Self, Error> {
        if self.tag == tag {
            Ok(self)
        } else {
            Err(Error::UnexpectedTag {
                expected: tag,
                actual: self.tag,
            })
        }
    }

    /// Iterates the values packed in this value's content.
    pub fn children(&self) -> Children<'a> {
        Children {
            remaining: self.content,
        }
    }

    pub fn to_der(&self) -> Vec<u8> {
        encode(self.tag, self.content)
    }
}

/// Iterator over consecutive values of a constructed encoding.
///
/// Yields one error and then stops when the content is malformed.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    remaining: &'a [u8],
}

impl<'a> Children<'a> {
    pub fn new(content: &'a [u8]) -> Self {
        Children { remaining: content }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Result<Tlv<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        match read(self.remaining) {
            Ok((tlv, rest)) => {
                self.remaining = rest;
                Some(Ok(tlv))
            }
            Err(e) => {
                self.remaining = &[];
                Some(Err(e))
            }
        }
    }
}

/// Reads one value, returning it with the bytes that follow it.
pub fn read(input: &[u8]) -> Result<(Tlv<'_>, &[u8]), Error> {
    let (rest, tlv) = Tlv::parse(input)?;
    Ok((tlv, rest))
}

/// Reads one value that must span the whole input.
pub fn read_all(input: &[u8]) -> Result<Tlv<'_>, Error> {
    let (tlv, rest) = read(input)?;
    if !rest.is_empty() {
        return Err(Error::TrailingData(rest.len()));
    }
    Ok(tlv)
}

/// Encodes `content` under `tag` with a minimal length prefix.
pub fn encode(tag: Tag, content: &[u8]) -> Vec<u8> {
    let mut out = tag.encode();
    out.extend(encode_length(content.len()));
    out.extend_from_slice(content);
    out
}

impl<'a> DecodableFrom<&'a [u8]> for Tlv<'a> {}

impl<'a> Decoder<&'a [u8], Tlv<'a>> for &'a [u8] {
    type Error = Error;

    fn decode(&self) -> Result<Tlv<'a>, Self::Error> {
        read_all(*self)
    }
}

impl<'a> EncodableTo<Tlv<'a>> for Vec<u8> {}

impl<'a> Encoder<Tlv<'a>, Vec<u8>> for Tlv<'a> {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.to_der())
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (mut input, first) = nom::number::complete::be_u8::<&[u8], NomError>(input)?;
    let class = Class::from(first);
    let constructed = first & 0x20 == 0x20;
    let low = first & 0x1f;
    if low != 0x1f {
        return Ok((input, Tag::new(class, constructed, low as u32)));
    }
    // high tag number form: base-128 octets, last one without the 0x80 bit
    let mut number: u32 = 0;
    loop {
        let (rest, b) = nom::number::complete::be_u8::<&[u8], NomError>(input)?;
        input = rest;
        if number > (u32::MAX >> 7) {
            return Err(nom::Err::Error(NomError::new(input, ErrorKind::TooLarge)));
        }
        number = (number << 7) | (b & 0x7f) as u32;
        if b & 0x80 == 0 {
            return Ok((input, Tag::new(class, constructed, number)));
        }
    }
}

fn parse_length(input: &[u8]) -> IResult<&[u8], usize> {
    let (input, n) = nom::number::complete::be_u8::<&[u8], NomError>(input)?;
    if n & 0x80 == 0 {
        // short form: 0-127
        return Ok((input, n as usize));
    }
    // long form: low 7 bits give the number of length octets
    let count = (n & 0x7f) as usize;
    if count == 0 {
        // indefinite length is BER only
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::LengthValue)));
    }
    if count > size_of::<usize>() {
        return Err(nom::Err::Error(NomError::new(input, ErrorKind::TooLarge)));
    }
    let (input, bs) = nom::bytes::complete::take::<usize, &[u8], NomError>(count).parse(input)?;
    let length = bs.iter().fold(0usize, |n, &b| (n << 8) | b as usize);
    Ok((input, length))
}

fn encode_length(length: usize) -> Vec<u8> {
    if length < 0x80 {
        return vec![length as u8];
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let mut out = vec![0x80 | (bytes.len() - skip) as u8];
    out.extend_from_slice(&bytes[skip..]);
    out
}

fn base128(mut value: u64) -> Vec<u8> {
    let mut out = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        out.push(0x80 | (value & 0x7f) as u8);
        value >>= 7;
    }
    out.reverse();
    out
}
