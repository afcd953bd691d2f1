//! Serialization codecs for the pack-bench workspace.
//!
//! Two codecs over one shared [`Value`] model:
//! - [`CborCodec`] — compact self-describing binary tag/length encoding;
//! - [`JsonCodec`] — UTF-8 JSON text, with binary payloads carried through
//!   base64 data URIs.

mod codec;
mod error;
mod value;

pub mod cbor;
pub mod json;

pub use cbor::{CborCodec, CborDecoder, CborEncoder};
pub use codec::{Codec, Format};
pub use error::{DecodeError, EncodeError};
pub use json::JsonCodec;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn obj(pairs: Vec<(&str, Value)>) -> Value {
        Value::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        )
    }

    // ---------------------------------------------------------------- CBOR

    #[test]
    fn cbor_roundtrip_matrix() {
        let cases = vec![
            Value::Null,
            Value::Bool(true),
            Value::Bool(false),
            Value::Integer(0),
            Value::Integer(123),
            Value::Integer(-1),
            Value::Integer(i64::MAX),
            Value::Integer(i64::MIN),
            Value::Float(1.5),
            Value::Str("hello".into()),
            Value::Str("€€€".into()),
            Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
            Value::Array(vec![Value::Integer(1), Value::Null, Value::Str("x".into())]),
            obj(vec![
                ("a", Value::Integer(1)),
                ("b", Value::Array(vec![Value::Bool(true), Value::Null])),
                ("c", obj(vec![("nested", Value::Bytes(vec![1, 2, 3]))])),
            ]),
        ];
        let mut codec = CborCodec::new();
        for case in cases {
            let bytes = codec.encode(&case).expect("encode");
            let back = codec.decode(&bytes).expect("decode");
            assert_eq!(back, case, "roundtrip failed for {case:?}");
        }
    }

    #[test]
    fn cbor_encode_is_deterministic() {
        let value = obj(vec![
            ("name", Value::Str("pie".into())),
            ("data", Value::Bytes(vec![7; 300])),
        ]);
        let mut codec = CborCodec::new();
        let first = codec.encode(&value).expect("encode");
        let second = codec.encode(&value).expect("encode");
        assert_eq!(first, second);
    }

    #[test]
    fn cbor_integer_tag_bytes() {
        let mut enc = CborEncoder::new();
        let cases: Vec<(i64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (23, vec![0x17]),
            (24, vec![0x18, 24]),
            (500, vec![0x19, 0x01, 0xf4]),
            (-1, vec![0x20]),
            (-24, vec![0x37]),
            (-25, vec![0x38, 24]),
            (-500, vec![0x39, 0x01, 0xf3]),
        ];
        for (n, expected) in cases {
            let bytes = enc.encode(&Value::Integer(n)).expect("encode");
            assert_eq!(bytes, expected, "integer {n}");
        }
    }

    #[test]
    fn cbor_text_header_uses_byte_length() {
        // Three 3-byte codepoints: 9 encoded bytes, so the length still
        // packs into the tag byte.
        let mut enc = CborEncoder::new();
        let bytes = enc.encode(&Value::Str("€€€".into())).expect("encode");
        assert_eq!(bytes[0], 0x60 | 9);
        assert_eq!(bytes.len(), 10);
    }

    #[test]
    fn cbor_bytes_header_boundaries() {
        // (payload length, header length) at each compact/spill boundary.
        let cases = [
            (0usize, 1usize),
            (23, 1),
            (24, 2),
            (255, 2),
            (256, 3),
            (65535, 3),
            (65536, 5),
        ];
        let mut enc = CborEncoder::new();
        for (len, hdr) in cases {
            let bytes = enc.encode(&Value::Bytes(vec![0xab; len])).expect("encode");
            assert_eq!(bytes.len(), hdr + len, "payload length {len}");
            assert_eq!(bytes[0] >> 5, 2, "bytes major for length {len}");
        }
    }

    #[test]
    fn cbor_truncated_prefix_fails() {
        let value = obj(vec![
            ("name", Value::Str("x".into())),
            ("data", Value::Bytes((0u8..=99).collect())),
        ]);
        let mut codec = CborCodec::new();
        let bytes = codec.encode(&value).expect("encode");
        for cut in 1..bytes.len() {
            let result = codec.decode(&bytes[..cut]);
            assert_eq!(
                result,
                Err(DecodeError::EndOfInput),
                "prefix of {cut} bytes must fail"
            );
        }
    }

    #[test]
    fn cbor_rejects_reserved_tags() {
        let mut codec = CborCodec::new();
        // CBOR tag major, indefinite lengths, reserved ai, undefined.
        for tag in [0xc1u8, 0x5f, 0x7f, 0x9f, 0xbf, 0x1c, 0xfc, 0xf7, 0xff] {
            assert_eq!(
                codec.decode(&[tag]),
                Err(DecodeError::InvalidTag(tag)),
                "tag byte 0x{tag:02x}"
            );
        }
    }

    #[test]
    fn cbor_map_key_order_preserved() {
        let value = obj(vec![
            ("z", Value::Integer(1)),
            ("a", Value::Integer(2)),
            ("m", Value::Integer(3)),
        ]);
        let mut codec = CborCodec::new();
        let bytes = codec.encode(&value).expect("encode");
        let back = codec.decode(&bytes).expect("decode");
        match back {
            Value::Object(pairs) => {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["z", "a", "m"]);
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn cbor_map_key_must_be_text() {
        // Map with an integer key: {1: 2}
        let mut codec = CborCodec::new();
        assert_eq!(
            codec.decode(&[0xa1, 0x01, 0x02]),
            Err(DecodeError::InvalidTag(0x01))
        );
    }

    #[test]
    fn cbor_integer_overflow() {
        // Unsigned 2^63 does not fit i64.
        let mut codec = CborCodec::new();
        let too_big = [0x1b, 0x80, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(codec.decode(&too_big), Err(DecodeError::IntegerOverflow));
        // Negative -(2^63)-1 does not fit either.
        let too_small = [0x3b, 0x80, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(codec.decode(&too_small), Err(DecodeError::IntegerOverflow));
    }

    #[test]
    fn cbor_float_width_selection() {
        let mut codec = CborCodec::new();
        // 1.5 round-trips through f32: 5-byte encoding.
        let bytes = codec.encode(&Value::Float(1.5)).expect("encode");
        assert_eq!(bytes[0], 0xfa);
        assert_eq!(bytes.len(), 5);
        assert_eq!(codec.decode(&bytes).expect("decode"), Value::Float(1.5));
        // A value needing full f64 precision: 9-byte encoding.
        let pi = std::f64::consts::PI;
        let bytes = codec.encode(&Value::Float(pi)).expect("encode");
        assert_eq!(bytes[0], 0xfb);
        assert_eq!(bytes.len(), 9);
        assert_eq!(codec.decode(&bytes).expect("decode"), Value::Float(pi));
    }

    #[test]
    fn cbor_decode_with_consumed_ignores_trailing() {
        let mut enc = CborEncoder::new();
        let mut bytes = enc.encode(&Value::Integer(500)).expect("encode");
        let span = bytes.len();
        bytes.extend_from_slice(&[0xde, 0xad]);
        let (value, consumed) = CborDecoder::decode_with_consumed(&bytes).expect("decode");
        assert_eq!(value, Value::Integer(500));
        assert_eq!(consumed, span);
    }

    // ---------------------------------------------------------------- JSON

    #[test]
    fn json_roundtrip_with_binary() {
        let value = obj(vec![
            ("key", Value::Str("val".into())),
            ("bin", Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef])),
        ]);
        let mut codec = JsonCodec::new();
        let bytes = codec.encode(&value).expect("encode");
        let text = std::str::from_utf8(&bytes).expect("utf-8 output");
        assert!(text.contains("data:application/octet-stream;base64,"));
        let back = codec.decode(&bytes).expect("decode");
        assert_eq!(back, value);
    }

    #[test]
    fn json_preserves_key_order() {
        let value = obj(vec![
            ("z", Value::Integer(1)),
            ("a", Value::Integer(2)),
        ]);
        let mut codec = JsonCodec::new();
        let bytes = codec.encode(&value).expect("encode");
        assert_eq!(bytes, br#"{"z":1,"a":2}"#);
        assert_eq!(codec.decode(&bytes).expect("decode"), value);
    }

    #[test]
    fn json_rejects_non_finite_float() {
        let mut codec = JsonCodec::new();
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                codec.encode(&Value::Float(f)),
                Err(EncodeError::UnsupportedValue)
            );
        }
    }

    #[test]
    fn json_invalid_payload() {
        let mut codec = JsonCodec::new();
        assert_eq!(codec.decode(b"{not json"), Err(DecodeError::InvalidJson));
    }

    #[test]
    fn json_malformed_data_uri_stays_a_string() {
        let s = "data:application/octet-stream;base64,???".to_owned();
        let mut codec = JsonCodec::new();
        let bytes = codec.encode(&Value::Str(s.clone())).expect("encode");
        assert_eq!(codec.decode(&bytes).expect("decode"), Value::Str(s));
    }

    // ---------------------------------------------------------------- Format

    #[test]
    fn format_registry_lookup() {
        assert_eq!(Format::from_name("json"), Some(Format::Json));
        assert_eq!(Format::from_name("cbor"), Some(Format::Cbor));
        assert_eq!(Format::from_name("msgpack"), None);
        assert_eq!(Format::Cbor.label(), "CBOR");
        assert_eq!(Format::Json.new_codec().name(), "JSON");
    }

    // ---------------------------------------------------------------- E2E

    #[test]
    fn benchmark_record_end_to_end() {
        let mut payload = vec![0u8; 100];
        rand::thread_rng().fill_bytes(&mut payload);
        let record = obj(vec![
            ("name", Value::Str("x".into())),
            ("jpeg_data", Value::Bytes(payload.clone())),
        ]);

        let mut cbor = CborCodec::new();
        let bytes = cbor.encode(&record).expect("encode");
        // 1 map tag, "name" (1+4), "x" (1+1), "jpeg_data" (1+9),
        // bytes header (1 tag + 1 spill byte for length 100) + 100 payload.
        assert_eq!(bytes.len(), 1 + 5 + 2 + 10 + 2 + 100);

        let back = cbor.decode(&bytes).expect("decode");
        assert_eq!(back.get("jpeg_data"), Some(&Value::Bytes(payload)));

        // The text codec pays the base64 tax; binary output must be smaller.
        let mut json = JsonCodec::new();
        let json_bytes = json.encode(&record).expect("encode");
        assert!(bytes.len() < json_bytes.len());
    }
}
