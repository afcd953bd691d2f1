//! `CborCodec` — combined encoder/decoder pair.

use super::decoder::CborDecoder;
use super::encoder::CborEncoder;
use crate::codec::Codec;
use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

/// Binary CBOR codec. Reuses one encoder buffer across calls.
#[derive(Default)]
pub struct CborCodec {
    encoder: CborEncoder,
}

impl CborCodec {
    pub fn new() -> Self {
        Self {
            encoder: CborEncoder::new(),
        }
    }
}

impl Codec for CborCodec {
    fn name(&self) -> &'static str {
        "CBOR"
    }

    fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.encoder.encode(value)
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<Value, DecodeError> {
        CborDecoder::decode(bytes)
    }
}
