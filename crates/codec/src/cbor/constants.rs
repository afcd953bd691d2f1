// Major types. Tag byte = (major << 5) | additional info.
pub const MAJOR_UNSIGNED: u8 = 0;
pub const MAJOR_NEGATIVE: u8 = 1;
pub const MAJOR_BYTES: u8 = 2;
pub const MAJOR_TEXT: u8 = 3;
pub const MAJOR_ARRAY: u8 = 4;
pub const MAJOR_MAP: u8 = 5;

// Major 7 simple/float tag bytes.
pub const SIMPLE_FALSE: u8 = 0xf4;
pub const SIMPLE_TRUE: u8 = 0xf5;
pub const SIMPLE_NULL: u8 = 0xf6;
pub const FLOAT_F32: u8 = 0xfa;
pub const FLOAT_F64: u8 = 0xfb;

pub fn is_f32_roundtrip(value: f64) -> bool {
    (value as f32) as f64 == value
}
