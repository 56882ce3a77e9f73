//! Decoding side of the conversion pipeline.
//!
//! A conversion from `T` to `D` needs two impls:
//!
//! 1. `DecodableFrom<T> for D`, a marker allowing the pair;
//! 2. `Decoder<T, D> for T`, the conversion itself.
//!
//! The marker keeps the set of legal conversions explicit, so a call like
//! `tlv.decode()` only type-checks for targets that opted in.
//!
//! ```no_run
//! use certinfo::decoder::{DecodableFrom, Decoder};
//!
//! struct Raw(Vec<u8>);
//! struct Label(String);
//!
//! impl DecodableFrom<Raw> for Label {}
//!
//! impl Decoder<Raw, Label> for Raw {
//!     type Error = std::string::FromUtf8Error;
//!
//!     fn decode(&self) -> Result<Label, Self::Error> {
//!         String::from_utf8(self.0.clone()).map(Label)
//!     }
//! }
//! ```

/// Converts `self` (of type `T`) into `D`.
///
/// Implemented on the source type. Callers usually pick the target with a
/// type annotation:
///
/// ```ignore
/// let usage: KeyUsage = tlv.decode()?;
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// Error returned when the source cannot be converted.
    type Error;

    /// Decodes `self` into `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker: `Self` can be decoded from `T`.
pub trait DecodableFrom<T> {}
