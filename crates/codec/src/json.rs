//! Text JSON codec with base64 wrapping for binary data.
//!
//! JSON cannot carry raw bytes, so `Value::Bytes` transcodes through a
//! `data:application/octet-stream;base64,` data URI string on encode and is
//! restored on decode. The wrapping lives entirely on this side; the CBOR
//! codec never sees it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value as JsonValue;

use crate::codec::Codec;
use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

const BIN_URI_START: &str = "data:application/octet-stream;base64,";

/// Text JSON codec over the shared [`Value`] model.
///
/// Object key order survives the round trip (`serde_json` with
/// `preserve_order`). Non-finite floats are not representable in JSON text
/// and fail with [`EncodeError::UnsupportedValue`].
#[derive(Debug, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let wrapped = wrap_binary(value)?;
        serde_json::to_vec(&wrapped).map_err(|_| EncodeError::UnsupportedValue)
    }

    fn decode(&mut self, bytes: &[u8]) -> Result<Value, DecodeError> {
        let parsed: JsonValue =
            serde_json::from_slice(bytes).map_err(|_| DecodeError::InvalidJson)?;
        unwrap_binary(parsed)
    }
}

/// Converts a [`Value`] tree into `serde_json::Value`, encoding binary
/// blobs as data URI strings (wrap step before JSON serialization).
pub fn wrap_binary(value: &Value) -> Result<JsonValue, EncodeError> {
    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Integer(i) => serde_json::json!(i),
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(EncodeError::UnsupportedValue);
            }
            serde_json::json!(f)
        }
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::Bytes(bytes) => {
            JsonValue::String(format!("{}{}", BIN_URI_START, BASE64.encode(bytes)))
        }
        Value::Array(items) => JsonValue::Array(
            items
                .iter()
                .map(wrap_binary)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(pairs) => {
            let mut map = serde_json::Map::with_capacity(pairs.len());
            for (key, val) in pairs {
                map.insert(key.clone(), wrap_binary(val)?);
            }
            JsonValue::Object(map)
        }
    })
}

/// Converts a `serde_json::Value` tree back into [`Value`], restoring data
/// URI strings to binary blobs (unwrap step after JSON parsing).
pub fn unwrap_binary(value: JsonValue) -> Result<Value, DecodeError> {
    Ok(match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                return Err(DecodeError::IntegerOverflow);
            }
        }
        JsonValue::String(s) => match s.strip_prefix(BIN_URI_START) {
            // A malformed data URI is left as a plain string.
            Some(b64) => match BASE64.decode(b64) {
                Ok(bytes) => Value::Bytes(bytes),
                Err(_) => Value::Str(s),
            },
            None => Value::Str(s),
        },
        JsonValue::Array(items) => Value::Array(
            items
                .into_iter()
                .map(unwrap_binary)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        JsonValue::Object(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (key, val) in map {
                pairs.push((key, unwrap_binary(val)?));
            }
            Value::Object(pairs)
        }
    })
}
