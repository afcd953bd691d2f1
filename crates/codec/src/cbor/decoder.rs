//! `CborDecoder` — single forward pass over CBOR bytes, no backtracking.

use super::constants::{
    FLOAT_F32, FLOAT_F64, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NEGATIVE, MAJOR_TEXT,
    MAJOR_UNSIGNED, SIMPLE_FALSE, SIMPLE_NULL, SIMPLE_TRUE,
};
use crate::error::DecodeError;
use crate::value::Value;

/// Forward-only CBOR reader over a borrowed byte slice.
///
/// The byte sequence is fully self-delimiting, so decoding is one pass:
/// read a tag byte, dispatch on its major bits, extract the embedded or
/// spilled argument, consume exactly the declared payload. Truncated input
/// fails with [`DecodeError::EndOfInput`]; reserved tags (CBOR tags,
/// indefinite lengths, unknown simple values) with
/// [`DecodeError::InvalidTag`].
pub struct CborDecoder<'a> {
    buf: &'a [u8],
    x: usize,
}

impl<'a> CborDecoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, x: 0 }
    }

    /// Decodes one complete value from the front of the buffer. Trailing
    /// bytes beyond the first value are ignored.
    pub fn decode(buf: &[u8]) -> Result<Value, DecodeError> {
        let mut decoder = CborDecoder::new(buf);
        decoder.read_any()
    }

    /// Decodes one value and reports how many bytes it spanned.
    pub fn decode_with_consumed(buf: &[u8]) -> Result<(Value, usize), DecodeError> {
        let mut decoder = CborDecoder::new(buf);
        let value = decoder.read_any()?;
        Ok((value, decoder.x))
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.buf.get(self.x).ok_or(DecodeError::EndOfInput)?;
        self.x += 1;
        Ok(byte)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.x.checked_add(n).ok_or(DecodeError::EndOfInput)?;
        if end > self.buf.len() {
            return Err(DecodeError::EndOfInput);
        }
        let bytes = &self.buf[self.x..end];
        self.x = end;
        Ok(bytes)
    }

    /// Reads the header argument: embedded in the tag byte for 0–23, from
    /// 1/2/4/8 trailing big-endian bytes for ai 24–27. ai 28–31 (reserved
    /// and indefinite-length markers) is rejected.
    fn read_arg(&mut self, tag: u8) -> Result<u64, DecodeError> {
        let ai = tag & 0x1f;
        match ai {
            0..=23 => Ok(ai as u64),
            24 => Ok(self.u8()? as u64),
            25 => {
                let b = self.take(2)?;
                Ok(u16::from_be_bytes([b[0], b[1]]) as u64)
            }
            26 => {
                let b = self.take(4)?;
                Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64)
            }
            27 => {
                let b = self.take(8)?;
                Ok(u64::from_be_bytes([
                    b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
                ]))
            }
            _ => Err(DecodeError::InvalidTag(tag)),
        }
    }

    fn read_len(&mut self, tag: u8) -> Result<usize, DecodeError> {
        let n = self.read_arg(tag)?;
        usize::try_from(n).map_err(|_| DecodeError::EndOfInput)
    }

    fn read_any(&mut self) -> Result<Value, DecodeError> {
        let tag = self.u8()?;
        match tag >> 5 {
            MAJOR_UNSIGNED => {
                let n = self.read_arg(tag)?;
                let n = i64::try_from(n).map_err(|_| DecodeError::IntegerOverflow)?;
                Ok(Value::Integer(n))
            }
            MAJOR_NEGATIVE => {
                let n = self.read_arg(tag)?;
                let n = i64::try_from(n).map_err(|_| DecodeError::IntegerOverflow)?;
                Ok(Value::Integer(-1 - n))
            }
            MAJOR_BYTES => {
                let len = self.read_len(tag)?;
                Ok(Value::Bytes(self.take(len)?.to_vec()))
            }
            MAJOR_TEXT => {
                let len = self.read_len(tag)?;
                let bytes = self.take(len)?;
                let s = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
                Ok(Value::Str(s.to_owned()))
            }
            MAJOR_ARRAY => {
                let count = self.read_len(tag)?;
                // Each element takes at least one byte; cap the preallocation
                // so a corrupt count cannot trigger a huge reservation.
                let mut items = Vec::with_capacity(count.min(self.remaining()));
                for _ in 0..count {
                    items.push(self.read_any()?);
                }
                Ok(Value::Array(items))
            }
            MAJOR_MAP => {
                let count = self.read_len(tag)?;
                let mut pairs = Vec::with_capacity(count.min(self.remaining()));
                for _ in 0..count {
                    let key = self.read_key()?;
                    let val = self.read_any()?;
                    pairs.push((key, val));
                }
                Ok(Value::Object(pairs))
            }
            _ => match tag {
                SIMPLE_FALSE => Ok(Value::Bool(false)),
                SIMPLE_TRUE => Ok(Value::Bool(true)),
                SIMPLE_NULL => Ok(Value::Null),
                FLOAT_F32 => {
                    let b = self.take(4)?;
                    Ok(Value::Float(
                        f32::from_be_bytes([b[0], b[1], b[2], b[3]]) as f64
                    ))
                }
                FLOAT_F64 => {
                    let b = self.take(8)?;
                    Ok(Value::Float(f64::from_be_bytes([
                        b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
                    ])))
                }
                _ => Err(DecodeError::InvalidTag(tag)),
            },
        }
    }

    /// Map keys must be text strings.
    fn read_key(&mut self) -> Result<String, DecodeError> {
        let tag = self.u8()?;
        if tag >> 5 != MAJOR_TEXT {
            return Err(DecodeError::InvalidTag(tag));
        }
        let len = self.read_len(tag)?;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8)
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.x
    }
}
