//! The [`Codec`] seam and the format registry.

use crate::cbor::CborCodec;
use crate::error::{DecodeError, EncodeError};
use crate::json::JsonCodec;
use crate::value::Value;

/// A paired encoder/decoder for one serialization format.
pub trait Codec {
    /// Display label, e.g. `"CBOR"`.
    fn name(&self) -> &'static str;
    fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError>;
    fn decode(&mut self, bytes: &[u8]) -> Result<Value, DecodeError>;
}

/// The serialization formats under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Cbor,
}

impl Format {
    /// Looks a format up by its lowercase wire name.
    pub fn from_name(name: &str) -> Option<Format> {
        match name {
            "json" => Some(Format::Json),
            "cbor" => Some(Format::Cbor),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Cbor => "CBOR",
        }
    }

    /// Constructs a fresh codec for this format.
    pub fn new_codec(self) -> Box<dyn Codec> {
        match self {
            Format::Json => Box::new(JsonCodec::new()),
            Format::Cbor => Box::new(CborCodec::new()),
        }
    }
}
