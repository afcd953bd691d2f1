//! Binary CBOR codec: self-describing tag/length encoding of [`crate::Value`].

mod codec;
mod constants;
mod decoder;
mod encoder;

pub use codec::CborCodec;
pub use decoder::CborDecoder;
pub use encoder::CborEncoder;
