// model = "claude-opus-4-5"
// created = "2026-02-04"
// modified = "2026-02-04"
// driver = "Isaac Clayton"

//! Plain encoding: a flat sequence of self-delimiting values.
//!
//! No compression, just one [`Value`] after another, all of the column's
//! single raw type. Reaching index k means decoding the k values before
//! it, so this column is the slow one to address; it exists for the value
//! payloads, which rarely compress anyway.

use crate::error::Error;

use super::buffer;
use super::value::RawType;
use super::value::Value;

/// A plain column of values sharing one raw type.
#[derive(Clone, Debug)]
pub struct Plain {
    raw_type: RawType,
    buffer: Vec<u8>,
}

/// Cursor state for iterating a [`Plain`].
#[derive(Clone, Debug)]
pub struct PlainToken {
    pos: usize,
    /// Logical index of the current element.
    pub index: i64,
    /// Decoded value of the current element.
    pub value: Value,
}

impl Default for PlainToken {
    fn default() -> Self {
        return PlainToken {
            pos: 0,
            index: 0,
            value: Value::Int(0),
        };
    }
}

impl Plain {
    /// An empty column of the given raw type.
    pub fn new(raw_type: RawType) -> Plain {
        return Plain {
            raw_type,
            buffer: Vec::new(),
        };
    }

    /// A column over an existing encoded buffer.
    pub fn from_bytes(raw_type: RawType, buffer: Vec<u8>) -> Plain {
        return Plain { raw_type, buffer };
    }

    /// The column's raw type.
    #[inline(always)]
    pub fn raw_type(&self) -> RawType {
        return self.raw_type;
    }

    /// The encoded size in bytes.
    #[inline(always)]
    pub fn size(&self) -> usize {
        return self.buffer.len();
    }

    /// Insert `value` at logical index `index`.
    ///
    /// Panics if the value's raw type does not match the column's; the
    /// owning object fixes the raw type at construction.
    pub fn insert_at(&mut self, index: i64, value: &Value) -> Result<(), Error> {
        assert!(
            value.raw_type() == self.raw_type,
            "value raw type does not match column"
        );
        if index < 0 {
            return Err(Error::OutOfRange);
        }

        let mut i: i64 = 0;
        let mut pos: usize = 0;
        while pos < self.buffer.len() {
            if i == index {
                break;
            }

            let (_, length) =
                Value::read(self.raw_type, &self.buffer[pos..]).ok_or(Error::OutOfRange)?;
            i += 1;
            pos += length;
        }

        if i == index {
            buffer::shift(&mut self.buffer, pos, value.encoded_len());
            value.write_to(&mut self.buffer[pos..]);
            return Ok(());
        }

        return Err(Error::OutOfRange);
    }

    /// The value at logical index `index`. Linear in `index`.
    pub fn get(&self, index: i64) -> Result<Value, Error> {
        if index < 0 {
            return Err(Error::OutOfRange);
        }

        let mut token = PlainToken::default();
        for _ in 0..=index {
            token = self.next(token).ok_or(Error::OutOfRange)?;
        }
        return Ok(token.value);
    }

    /// Advance `token` to the next element, or `None` at end of stream.
    pub fn next(&self, token: PlainToken) -> Option<PlainToken> {
        if token.pos >= self.buffer.len() {
            return None;
        }

        let (value, length) = Value::read(self.raw_type, &self.buffer[token.pos..])?;
        let index = if token.pos == 0 { 0 } else { token.index + 1 };

        return Some(PlainToken {
            pos: token.pos + length,
            index,
            value,
        });
    }

    /// Split into two independent columns at logical index `index`.
    pub fn split_at(&self, index: i64) -> Result<(Plain, Plain), Error> {
        if index < 0 {
            return Err(Error::OutOfRange);
        }

        let mut i: i64 = 0;
        let mut pos: usize = 0;
        while pos < self.buffer.len() {
            if i == index {
                break;
            }

            let (_, length) =
                Value::read(self.raw_type, &self.buffer[pos..]).ok_or(Error::OutOfRange)?;
            i += 1;
            pos += length;
        }

        if i == index {
            let left = Plain::from_bytes(self.raw_type, self.buffer[..pos].to_vec());
            let right = Plain::from_bytes(self.raw_type, self.buffer[pos..].to_vec());
            return Ok((left, right));
        }

        return Err(Error::OutOfRange);
    }

    /// Total number of logical elements.
    pub fn row_count(&self) -> i64 {
        let mut count: i64 = 0;
        let mut token = PlainToken::default();
        while let Some(next) = self.next(token) {
            token = next;
            count += 1;
        }
        return count;
    }

    /// Decode every element. Intended for tests and debugging.
    pub fn values(&self) -> Vec<Value> {
        let mut values = Vec::new();
        let mut token = PlainToken::default();
        while let Some(next) = self.next(token) {
            token = next;
            values.push(token.value.clone());
        }
        return values;
    }
}
