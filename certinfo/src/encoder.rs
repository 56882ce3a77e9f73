//! Encoding side of the conversion pipeline, mirroring [`crate::decoder`].

/// Converts `self` (of type `T`) into `E`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// Error returned when the value cannot be encoded.
    type Error;

    /// Encodes `self` into `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker: `Self` can be produced by encoding a `T`.
pub trait EncodableTo<T> {}
