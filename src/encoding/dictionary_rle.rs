// model = "claude-opus-4-5"
// created = "2026-02-04"
// modified = "2026-02-05"
// driver = "Isaac Clayton"

//! Dictionary-RLE: interned byte strings behind a run-length index column.
//!
//! Actor identifiers repeat constantly (most edits in a document come from
//! a handful of participants), so the column stores each distinct byte
//! string once in a [`Dictionary`] and run-length encodes the indices.
//!
//! Interning scans the dictionary buffer, which is correct but linear; an
//! `FxHashMap` memo in front of it remembers prior answers. The memo is
//! purely a cache over the buffer, never a source of truth, so a column
//! built from raw bytes starts with a cold memo and stays correct.

use rustc_hash::FxHashMap;

use crate::error::Error;

use super::dictionary::Dictionary;
use super::rle::Rle;
use super::rle::RleToken;

/// A column of byte strings, dictionary-interned and run-length encoded.
#[derive(Clone, Debug, Default)]
pub struct DictionaryRle {
    dict: Dictionary,
    data: Rle,
    memo: FxHashMap<Vec<u8>, i64>,
}

/// Cursor state for iterating a [`DictionaryRle`]. The first advance
/// decodes the dictionary into the token so later rows are one map-free
/// index away.
#[derive(Clone, Debug, Default)]
pub struct DictionaryRleToken {
    entries: Vec<Vec<u8>>,
    data: RleToken,
    /// Decoded bytes of the current element.
    pub value: Vec<u8>,
}

impl DictionaryRleToken {
    /// Logical index of the current element.
    #[inline(always)]
    pub fn index(&self) -> i64 {
        return self.data.index;
    }
}

impl DictionaryRle {
    /// An empty column.
    pub fn new() -> DictionaryRle {
        return DictionaryRle {
            dict: Dictionary::new(),
            data: Rle::new(),
            memo: FxHashMap::default(),
        };
    }

    /// A column over existing dictionary and index buffers.
    pub fn from_bytes(dict: Vec<u8>, data: Vec<u8>) -> DictionaryRle {
        return DictionaryRle {
            dict: Dictionary::from_bytes(dict),
            data: Rle::from_bytes(data),
            memo: FxHashMap::default(),
        };
    }

    /// The combined size of both buffers in bytes.
    #[inline(always)]
    pub fn size(&self) -> usize {
        return self.dict.size() + self.data.size();
    }

    /// Total number of logical elements.
    #[inline(always)]
    pub fn row_count(&self) -> i64 {
        return self.data.row_count();
    }

    /// Intern `value`, returning its dictionary index.
    fn find_or_insert(&mut self, value: &[u8]) -> i64 {
        if let Some(&index) = self.memo.get(value) {
            return index;
        }

        let index = self.dict.lookup(value);
        self.memo.insert(value.to_vec(), index);
        return index;
    }

    /// Insert `value` at logical index `index`, interning it if new.
    pub fn insert_at(&mut self, index: i64, value: &[u8]) -> Result<(), Error> {
        let dict_index = self.find_or_insert(value);
        return self.data.insert_at(index, dict_index);
    }

    /// The dictionary index of `value`, without inserting.
    pub fn lookup(&self, value: &[u8]) -> Result<i64, Error> {
        if let Some(&index) = self.memo.get(value) {
            return Ok(index);
        }
        return self.dict.find(value).ok_or(Error::NotFound);
    }

    /// The bytes at logical index `index`.
    pub fn get(&self, index: i64) -> Result<&[u8], Error> {
        let dict_index = self.data.get(index)?;
        return self.dict.get(dict_index);
    }

    /// Advance `token` to the next element, or `None` at end of stream.
    pub fn next(&self, mut token: DictionaryRleToken) -> Option<DictionaryRleToken> {
        let data = self.data.next(token.data)?;

        if token.entries.is_empty() {
            token.entries = self.dict.entries();
        }

        let value = token.entries.get(data.value as usize)?.clone();
        return Some(DictionaryRleToken {
            entries: token.entries,
            data,
            value,
        });
    }

    /// Split into two independent columns. Both sides deep-clone the
    /// dictionary and split only the index column, so indices stay stable
    /// and neither side borrows from the other.
    pub fn split_at(&self, index: i64) -> Result<(DictionaryRle, DictionaryRle), Error> {
        let (left_data, right_data) = self.data.split_at(index)?;

        let left = DictionaryRle {
            dict: self.dict.clone(),
            data: left_data,
            memo: self.memo.clone(),
        };
        let right = DictionaryRle {
            dict: self.dict.clone(),
            data: right_data,
            memo: self.memo.clone(),
        };
        return Ok((left, right));
    }

    /// Decode every element. Intended for tests and debugging.
    pub fn values(&self) -> Vec<Vec<u8>> {
        let mut values = Vec::new();
        let mut token = DictionaryRleToken::default();
        while let Some(next) = self.next(token) {
            values.push(next.value.clone());
            token = next;
        }
        return values;
    }
}
