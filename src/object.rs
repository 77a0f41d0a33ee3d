// model = "claude-opus-4-5"
// created = "2026-02-05"
// modified = "2026-02-06"
// driver = "Isaac Clayton"

//! An object: the unit a caller manipulates.
//!
//! An object is an ordered list of pages plus one Bloom filter per page,
//! each filter summarizing the operation identities its page holds. An
//! insertion resolves its reference to a `(page, row)` position, lands at
//! `row + 1`, records the new identity in the page's filter, and splits
//! the page in half once it reaches the configured maximum.
//!
//! Reference resolution, fastest first:
//!
//! 1. The previous insert's identity, cached with its exact position.
//!    Sequential typing hits this path almost every time.
//! 2. The last page, when its filter says the reference may be there.
//! 3. Every page in order, skipping filter-negative pages. A positive
//!    filter with no matching row is a false positive; the scan continues.
//!
//! Filters never report false negatives, so a reference missing from every
//! filter-positive page is missing from the object.

use crate::bloom::bloom_key;
use crate::bloom::BloomFilter;
use crate::error::Error;

use crate::encoding::RawType;
use crate::encoding::Value;
use crate::op::Id;
use crate::op::Op;
use crate::page::IdToken;
use crate::page::Page;
use crate::page::PageValueToken;

/// Tuning knobs for an [`Object`]. All fields must be positive.
#[derive(Clone, Copy, Debug)]
pub struct ObjectOptions {
    /// Rows per page before it splits in half.
    pub max_page_size: i64,
    /// Bits in each page's Bloom filter.
    pub bloom_m: usize,
    /// Hash probes per Bloom filter key.
    pub bloom_k: u32,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        return ObjectOptions {
            max_page_size: 200,
            bloom_m: 15000,
            bloom_k: 8,
        };
    }
}

/// The position of the most recent insert, for the sequential fast path.
#[derive(Clone, Debug)]
struct LastInsert {
    id: Id,
    page_index: usize,
    row_index: i64,
}

/// A growing log of operations in bounded columnar pages.
pub struct Object {
    options: ObjectOptions,
    raw_type: RawType,
    pages: Vec<Page>,
    filters: Vec<BloomFilter>,
    last_insert: Option<LastInsert>,
}

/// Cursor over an object's materialized row sequence, crossing page
/// boundaries transparently.
#[derive(Clone, Debug, Default)]
pub struct ValueToken {
    page_index: usize,
    page: PageValueToken,
}

impl ValueToken {
    /// The current row's operation type.
    #[inline(always)]
    pub fn op_type(&self) -> i64 {
        return self.page.op_type();
    }

    /// The current row's payload.
    #[inline(always)]
    pub fn value(&self) -> &Value {
        return self.page.value();
    }
}

impl Object {
    /// An empty object with default options, holding values of `raw_type`.
    pub fn new(raw_type: RawType) -> Object {
        return Object::with_options(raw_type, ObjectOptions::default());
    }

    /// An empty object with explicit options.
    pub fn with_options(raw_type: RawType, options: ObjectOptions) -> Object {
        assert!(options.max_page_size > 0, "max_page_size must be positive");
        assert!(options.bloom_m > 0, "bloom_m must be positive");
        assert!(options.bloom_k > 0, "bloom_k must be positive");

        return Object {
            options,
            raw_type,
            pages: vec![Page::new(raw_type)],
            filters: vec![BloomFilter::new(options.bloom_m, options.bloom_k)],
            last_insert: None,
        };
    }

    /// The raw type of every value in this object.
    #[inline(always)]
    pub fn raw_type(&self) -> RawType {
        return self.raw_type;
    }

    /// Total rows across all pages.
    pub fn row_count(&self) -> i64 {
        return self.pages.iter().map(|page| page.row_count()).sum();
    }

    /// Total bytes across all column buffers of all pages.
    pub fn size(&self) -> usize {
        return self.pages.iter().map(|page| page.size()).sum();
    }

    /// The number of pages.
    pub fn page_count(&self) -> usize {
        return self.pages.len();
    }

    /// Resolve `reference` to the page and row holding it. The root
    /// identity resolves to row -1 of the first page, so the insert at
    /// `row + 1` lands at the very beginning.
    fn find_reference(&self, reference: &Id) -> Result<(usize, i64), Error> {
        if reference.is_root() {
            return Ok((0, -1));
        }

        if let Some(last) = &self.last_insert {
            if last.id == *reference {
                return Ok((last.page_index, last.row_index));
            }
        }

        let key = bloom_key(reference.counter, &reference.actor);

        // recent inserts usually reference recent rows, so probe the last
        // page before scanning from the front
        let last_page = self.pages.len() - 1;
        if self.filters[last_page].test(&key) {
            match self.pages[last_page].find_index(reference.counter, &reference.actor) {
                Ok(row) => return Ok((last_page, row)),
                Err(Error::NotFound) => {}
                Err(err) => return Err(err),
            }
        }

        for page_index in 0..last_page {
            if !self.filters[page_index].test(&key) {
                continue;
            }
            match self.pages[page_index].find_index(reference.counter, &reference.actor) {
                Ok(row) => return Ok((page_index, row)),
                Err(Error::NotFound) => continue,
                Err(err) => return Err(err),
            }
        }

        return Err(Error::NotFound);
    }

    /// Insert `op` immediately after the row its reference names,
    /// returning the global row offset where it landed.
    pub fn insert(&mut self, op: Op) -> Result<i64, Error> {
        let (page_index, row_index) = self.find_reference(&op.reference)?;

        self.pages[page_index].insert_at(row_index + 1, &op)?;
        self.filters[page_index].add(&bloom_key(op.id.counter, &op.id.actor));

        let mut offset = row_index + 1;
        for page in &self.pages[..page_index] {
            offset += page.row_count();
        }

        self.last_insert = Some(LastInsert {
            id: op.id,
            page_index,
            row_index: row_index + 1,
        });

        if self.pages[page_index].row_count() >= self.options.max_page_size {
            self.split_page(page_index)?;
        }

        return Ok(offset);
    }

    /// Replace the page at `page_index` with its two halves, rebuilding a
    /// filter for each. Splitting reorders nothing, but it moves rows
    /// between pages, so the insert cache dies with it.
    fn split_page(&mut self, page_index: usize) -> Result<(), Error> {
        let split_index = self.options.max_page_size / 2;
        let (left, right) = self.pages[page_index].split_at(split_index)?;

        let left_filter = self.rebuild_filter(&left);
        let right_filter = self.rebuild_filter(&right);

        self.pages[page_index] = left;
        self.filters[page_index] = left_filter;
        self.pages.insert(page_index + 1, right);
        self.filters.insert(page_index + 1, right_filter);

        self.last_insert = None;
        return Ok(());
    }

    /// A fresh filter covering every identity in `page`.
    fn rebuild_filter(&self, page: &Page) -> BloomFilter {
        let mut filter = BloomFilter::new(self.options.bloom_m, self.options.bloom_k);
        let mut token = IdToken::default();
        while let Some(next) = page.next_id(token) {
            filter.add(&bloom_key(next.counter(), next.actor()));
            token = next;
        }
        return filter;
    }

    /// Advance `token` through the object's rows in document order, or
    /// `None` once the last page is exhausted. Any mutation of the object
    /// invalidates outstanding tokens.
    pub fn next_value(&self, token: ValueToken) -> Option<ValueToken> {
        let mut page_index = token.page_index;
        let mut page_token = token.page;

        while page_index < self.pages.len() {
            match self.pages[page_index].next_value(page_token) {
                Some(page) => return Some(ValueToken { page_index, page }),
                None => {
                    page_index += 1;
                    page_token = PageValueToken::default();
                }
            }
        }

        return None;
    }

    /// Decode every row's payload in document order. Intended for tests
    /// and debugging.
    pub fn values(&self) -> Vec<Value> {
        let mut values = Vec::new();
        let mut token = ValueToken::default();
        while let Some(next) = self.next_value(token) {
            values.push(next.value().clone());
            token = next;
        }
        return values;
    }
}
