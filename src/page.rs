// model = "claude-opus-4-5"
// created = "2026-02-04"
// modified = "2026-02-06"
// driver = "Isaac Clayton"

//! A page: six parallel compressed columns over one set of rows.
//!
//! Each row is one operation, spread across the columns by field:
//!
//! | column      | encoding       | holds                |
//! |-------------|----------------|----------------------|
//! | counter     | delta          | id counter           |
//! | actor       | dictionary-RLE | id actor bytes       |
//! | ref counter | delta          | reference counter    |
//! | ref actor   | dictionary-RLE | reference actor      |
//! | op type     | RLE            | insert or delete     |
//! | value       | plain          | payload              |
//!
//! The single invariant that matters: all six columns always hold exactly
//! `row_count` elements, and the k-th element of each belongs to the same
//! row. Every mutation applies to all six or to none, which is why the
//! row index is bounds-checked once up front; past that check none of the
//! column inserts can fail on a well-formed page.

use crate::error::Error;

use crate::encoding::Delta;
use crate::encoding::DeltaToken;
use crate::encoding::DictionaryRle;
use crate::encoding::DictionaryRleToken;
use crate::encoding::Plain;
use crate::encoding::PlainToken;
use crate::encoding::RawType;
use crate::encoding::Rle;
use crate::encoding::RleToken;
use crate::encoding::Value;
use crate::op::Op;

/// A bounded container of operation rows in six synchronized columns.
#[derive(Clone, Debug)]
pub struct Page {
    counter: Delta,
    actor: DictionaryRle,
    ref_counter: Delta,
    ref_actor: DictionaryRle,
    op_type: Rle,
    value: Plain,
    row_count: i64,
}

/// Cursor over the two identity columns in lockstep.
#[derive(Clone, Debug, Default)]
pub struct IdToken {
    counter: DeltaToken,
    actor: DictionaryRleToken,
}

impl IdToken {
    /// The current row's identity counter.
    #[inline(always)]
    pub fn counter(&self) -> i64 {
        return self.counter.value;
    }

    /// The current row's identity actor bytes.
    #[inline(always)]
    pub fn actor(&self) -> &[u8] {
        return &self.actor.value;
    }
}

/// Cursor over the op-type and value columns in lockstep.
#[derive(Clone, Debug, Default)]
pub struct PageValueToken {
    op_type: RleToken,
    value: PlainToken,
}

impl PageValueToken {
    /// The current row's operation type.
    #[inline(always)]
    pub fn op_type(&self) -> i64 {
        return self.op_type.value;
    }

    /// The current row's payload.
    #[inline(always)]
    pub fn value(&self) -> &Value {
        return &self.value.value;
    }
}

impl Page {
    /// An empty page whose value column holds `raw_type`.
    pub fn new(raw_type: RawType) -> Page {
        return Page {
            counter: Delta::new(),
            actor: DictionaryRle::new(),
            ref_counter: Delta::new(),
            ref_actor: DictionaryRle::new(),
            op_type: Rle::new(),
            value: Plain::new(raw_type),
            row_count: 0,
        };
    }

    /// The number of rows.
    #[inline(always)]
    pub fn row_count(&self) -> i64 {
        return self.row_count;
    }

    /// Total bytes across all six column buffers.
    pub fn size(&self) -> usize {
        return self.counter.size()
            + self.actor.size()
            + self.ref_counter.size()
            + self.ref_actor.size()
            + self.op_type.size()
            + self.value.size();
    }

    /// The raw type of the value column.
    #[inline(always)]
    pub fn raw_type(&self) -> RawType {
        return self.value.raw_type();
    }

    /// The op-type column, for visible-index translation by overlays.
    pub fn op_types(&self) -> &Rle {
        return &self.op_type;
    }

    /// Insert `op` as the row at `index`, shifting later rows down.
    pub fn insert_at(&mut self, index: i64, op: &Op) -> Result<(), Error> {
        if index < 0 || index > self.row_count {
            return Err(Error::OutOfRange);
        }

        self.counter.insert_at(index, op.id.counter)?;
        self.actor.insert_at(index, &op.id.actor)?;
        self.ref_counter.insert_at(index, op.reference.counter)?;
        self.ref_actor.insert_at(index, &op.reference.actor)?;
        self.op_type.insert_at(index, op.op_type)?;
        self.value.insert_at(index, &op.value)?;

        self.row_count += 1;
        return Ok(());
    }

    /// The row index whose identity is `(counter, actor)`, scanning in
    /// row order.
    pub fn find_index(&self, counter: i64, actor: &[u8]) -> Result<i64, Error> {
        let mut i: i64 = 0;
        let mut token = IdToken::default();
        while let Some(next) = self.next_id(token) {
            token = next;

            if token.counter() == counter && token.actor() == actor {
                return Ok(i);
            }

            i += 1;
        }
        return Err(Error::NotFound);
    }

    /// Advance through the identity columns, or `None` at end of stream.
    pub fn next_id(&self, token: IdToken) -> Option<IdToken> {
        let counter = self.counter.next(token.counter);
        let actor = self.actor.next(token.actor);

        match (counter, actor) {
            (Some(counter), Some(actor)) => return Some(IdToken { counter, actor }),
            (None, None) => return None,
            _ => {
                debug_assert!(false, "identity columns diverged");
                return None;
            }
        }
    }

    /// Advance through the op-type and value columns, or `None` at end of
    /// stream.
    pub fn next_value(&self, token: PageValueToken) -> Option<PageValueToken> {
        let op_type = self.op_type.next(token.op_type);
        let value = self.value.next(token.value);

        match (op_type, value) {
            (Some(op_type), Some(value)) => return Some(PageValueToken { op_type, value }),
            (None, None) => return None,
            _ => {
                debug_assert!(false, "value columns diverged");
                return None;
            }
        }
    }

    /// Split into two pages: rows `[0, index)` and `[index, row_count)`.
    /// Column synchrony holds on both sides by construction.
    pub fn split_at(&self, index: i64) -> Result<(Page, Page), Error> {
        if index < 0 || index > self.row_count {
            return Err(Error::OutOfRange);
        }

        let (counter_l, counter_r) = self.counter.split_at(index)?;
        let (actor_l, actor_r) = self.actor.split_at(index)?;
        let (ref_counter_l, ref_counter_r) = self.ref_counter.split_at(index)?;
        let (ref_actor_l, ref_actor_r) = self.ref_actor.split_at(index)?;
        let (op_type_l, op_type_r) = self.op_type.split_at(index)?;
        let (value_l, value_r) = self.value.split_at(index)?;

        let left = Page {
            counter: counter_l,
            actor: actor_l,
            ref_counter: ref_counter_l,
            ref_actor: ref_actor_l,
            op_type: op_type_l,
            value: value_l,
            row_count: index,
        };
        let right = Page {
            counter: counter_r,
            actor: actor_r,
            ref_counter: ref_counter_r,
            ref_actor: ref_actor_r,
            op_type: op_type_r,
            value: value_r,
            row_count: self.row_count - index,
        };
        return Ok((left, right));
    }
}
