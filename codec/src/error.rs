//! Codec error types

use thiserror::Error;

/// Encode-side failures. Decoding is total and has no error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("{layout}: value for field `{field}` exceeds {width} bits")]
    FieldOverflow {
        layout: &'static str,
        field: &'static str,
        width: u32,
    },

    #[error("{layout}: expected {expected} field values, got {got}")]
    FieldCount {
        layout: &'static str,
        expected: usize,
        got: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;
