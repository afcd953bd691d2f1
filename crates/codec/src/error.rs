use thiserror::Error;

/// Encode-time failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unsupported value kind for encoding")]
    UnsupportedValue,
}

/// Decode-time failures. All are fatal for the payload being decoded;
/// no partial value is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes remain than a declared length requires.
    #[error("unexpected end of input")]
    EndOfInput,
    /// The tag byte encodes an unsupported or reserved type.
    #[error("unsupported or reserved tag byte 0x{0:02x}")]
    InvalidTag(u8),
    #[error("text string is not valid utf-8")]
    InvalidUtf8,
    /// An integer argument does not fit the value model.
    #[error("integer value out of range")]
    IntegerOverflow,
    #[error("invalid json payload")]
    InvalidJson,
}
