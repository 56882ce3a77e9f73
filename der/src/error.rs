use thiserror::Error;

use crate::Tag;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed encoding: {0:?}")]
    MalformedEncoding(nom::error::ErrorKind),
    #[error("malformed encoding: truncated input ({0:?})")]
    Truncated(nom::Needed),
    #[error("malformed encoding: {0} trailing bytes")]
    TrailingData(usize),
    #[error("expected {expected}, got {actual}")]
    UnexpectedTag { expected: Tag, actual: Tag },
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => Error::Truncated(needed),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::MalformedEncoding(e.code),
        }
    }
}
