// model = "claude-opus-4-5"
// created = "2026-02-03"
// modified = "2026-02-04"
// driver = "Isaac Clayton"

//! Self-delimiting typed values.
//!
//! A value column stores one raw type for its whole lifetime, fixed when
//! the owning object is built. Two raw types exist:
//!
//! - `VarInt`: a single signed varint.
//! - `ByteArray`: a varint length followed by that many literal bytes.
//!
//! Both are self-delimiting, so a column can be walked without any
//! out-of-band index.

use super::varint;

/// The raw type of a value column. Every value in a column shares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawType {
    /// Values are signed varints.
    VarInt,
    /// Values are varint-length-prefixed byte strings.
    ByteArray,
}

/// A single decoded value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer, stored as a varint.
    Int(i64),
    /// A byte string, stored with a varint length prefix.
    Bytes(Vec<u8>),
}

impl Value {
    /// An integer value.
    pub fn int(v: i64) -> Value {
        return Value::Int(v);
    }

    /// A single character, stored by its code point.
    pub fn rune(r: char) -> Value {
        return Value::Int(r as i64);
    }

    /// A byte string value.
    pub fn bytes(data: &[u8]) -> Value {
        return Value::Bytes(data.to_vec());
    }

    /// A string value, stored as its UTF-8 bytes.
    pub fn string(s: &str) -> Value {
        return Value::Bytes(s.as_bytes().to_vec());
    }

    /// The raw type this value encodes as.
    pub fn raw_type(&self) -> RawType {
        return match self {
            Value::Int(_) => RawType::VarInt,
            Value::Bytes(_) => RawType::ByteArray,
        };
    }

    /// The number of bytes this value occupies when encoded.
    pub fn encoded_len(&self) -> usize {
        return match self {
            Value::Int(v) => varint::encoded_len(*v),
            Value::Bytes(data) => varint::encoded_len(data.len() as i64) + data.len(),
        };
    }

    /// Write this value into `target`, which must hold at least
    /// [`Value::encoded_len`] bytes.
    pub fn write_to(&self, target: &mut [u8]) {
        match self {
            Value::Int(v) => {
                varint::encode(*v, target);
            }
            Value::Bytes(data) => {
                let n = varint::encode(data.len() as i64, target);
                target[n..n + data.len()].copy_from_slice(data);
            }
        }
    }

    /// Decode one value of `raw_type` from the front of `buffer`,
    /// returning it along with its encoded length.
    pub fn read(raw_type: RawType, buffer: &[u8]) -> Option<(Value, usize)> {
        match raw_type {
            RawType::VarInt => {
                let (v, n) = varint::decode(buffer)?;
                return Some((Value::Int(v), n));
            }
            RawType::ByteArray => {
                let (length, n) = varint::decode(buffer)?;
                if length < 0 {
                    return None;
                }
                let end = n + length as usize;
                if end > buffer.len() {
                    return None;
                }
                return Some((Value::Bytes(buffer[n..end].to_vec()), end));
            }
        }
    }

    /// The integer payload. Panics on a byte-string value.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(v) => return *v,
            Value::Bytes(_) => panic!("value is a byte string, not an integer"),
        }
    }

    /// The byte payload. Panics on an integer value.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Bytes(data) => return data,
            Value::Int(_) => panic!("value is an integer, not a byte string"),
        }
    }
}
