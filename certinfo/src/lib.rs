//! # certinfo
//!
//! Conversion traits shared by the certinfo crates.
//!
//! Every layer of the inspector turns one representation into the next:
//! ```text
//! PEM text → Pem → DER bytes → Tlv → Certificate → Extension lines
//! ```
//!
//! Each arrow is a [`decoder::Decoder`] implementation on the source type.
//! The reverse direction (certificate bytes back to PEM armor, key usage
//! flags back to a BIT STRING) goes through [`encoder::Encoder`].
//!
//! ```ignore
//! use certinfo::decoder::Decoder;
//! use pem::Pem;
//! use x509::Certificate;
//!
//! let pem: Pem = text.parse()?;
//! let der: Vec<u8> = pem.decode()?;
//! let certificate: Certificate = der.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
