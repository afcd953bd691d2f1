//! [`Value`] — the structured value type shared by both codecs.

/// A general structured value: the common model every codec encodes from and
/// decodes into.
///
/// Objects are ordered key-value pair lists. Encoding order is insertion
/// order — stable, never sorted — and round-trips preserve it exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null / CBOR null
    Null,
    /// Boolean value
    Bool(bool),
    /// Signed integer (fits in i64)
    Integer(i64),
    /// Floating-point number
    Float(f64),
    /// Binary data
    Bytes(Vec<u8>),
    /// String
    Str(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (ordered key-value pairs)
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Looks up a key in an object value. Returns `None` for non-objects
    /// and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}
