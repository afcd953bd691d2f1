//! `CborEncoder` — encodes [`Value`] trees into CBOR bytes.

use super::constants::{
    is_f32_roundtrip, FLOAT_F32, FLOAT_F64, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NEGATIVE,
    MAJOR_TEXT, MAJOR_UNSIGNED, SIMPLE_FALSE, SIMPLE_NULL, SIMPLE_TRUE,
};
use crate::error::EncodeError;
use crate::value::Value;

/// CBOR encoder writing into an owned, reusable output buffer.
///
/// Headers always use the smallest length class that fits the argument:
/// 0–23 packed into the tag byte, then 1/2/4/8 trailing big-endian bytes.
/// Text lengths are measured in encoded UTF-8 bytes, not characters. Map
/// entries are written in insertion order. Output is deterministic: the
/// same value always produces identical bytes.
#[derive(Default)]
pub struct CborEncoder {
    out: Vec<u8>,
}

impl CborEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    /// Encodes one value into a fresh byte buffer.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.out.clear();
        self.write_any(value)?;
        Ok(std::mem::take(&mut self.out))
    }

    fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.out.push(SIMPLE_NULL),
            Value::Bool(b) => self.out.push(if *b { SIMPLE_TRUE } else { SIMPLE_FALSE }),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float(f) => self.write_float(*f),
            Value::Bytes(bytes) => {
                self.write_header(MAJOR_BYTES, bytes.len() as u64);
                self.out.extend_from_slice(bytes);
            }
            Value::Str(s) => self.write_str(s),
            Value::Array(items) => {
                self.write_header(MAJOR_ARRAY, items.len() as u64);
                for item in items {
                    self.write_any(item)?;
                }
            }
            Value::Object(pairs) => {
                self.write_header(MAJOR_MAP, pairs.len() as u64);
                for (key, val) in pairs {
                    self.write_str(key);
                    self.write_any(val)?;
                }
            }
        }
        Ok(())
    }

    /// Writes a tag byte plus spill bytes for the given major type and
    /// argument (an integer value, a length, or an entry count).
    fn write_header(&mut self, major: u8, n: u64) {
        let major_bits = major << 5;
        if n <= 23 {
            self.out.push(major_bits | n as u8);
        } else if n <= 0xff {
            self.out.push(major_bits | 24);
            self.out.push(n as u8);
        } else if n <= 0xffff {
            self.out.push(major_bits | 25);
            self.out.extend_from_slice(&(n as u16).to_be_bytes());
        } else if n <= 0xffff_ffff {
            self.out.push(major_bits | 26);
            self.out.extend_from_slice(&(n as u32).to_be_bytes());
        } else {
            self.out.push(major_bits | 27);
            self.out.extend_from_slice(&n.to_be_bytes());
        }
    }

    fn write_integer(&mut self, n: i64) {
        if n >= 0 {
            self.write_header(MAJOR_UNSIGNED, n as u64);
        } else {
            let encoded = (-1i128 - n as i128) as u64;
            self.write_header(MAJOR_NEGATIVE, encoded);
        }
    }

    /// Uses f32 when the value round-trips losslessly, otherwise f64.
    fn write_float(&mut self, f: f64) {
        if is_f32_roundtrip(f) {
            self.out.push(FLOAT_F32);
            self.out.extend_from_slice(&(f as f32).to_be_bytes());
        } else {
            self.out.push(FLOAT_F64);
            self.out.extend_from_slice(&f.to_be_bytes());
        }
    }

    fn write_str(&mut self, s: &str) {
        let utf8 = s.as_bytes();
        self.write_header(MAJOR_TEXT, utf8.len() as u64);
        self.out.extend_from_slice(utf8);
    }
}
