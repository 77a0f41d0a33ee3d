// model = "claude-opus-4-5"
// created = "2026-02-04"
// modified = "2026-02-05"
// driver = "Isaac Clayton"

//! Delta encoding: run-length over first differences.
//!
//! The underlying [`Rle`] stores successive differences, so the k-th
//! decoded value is the sum of the first k+1 stored deltas. Monotonic
//! counters become long runs of small deltas, which is the whole point.
//!
//! Insertion must leave every subsequent decoded value unchanged: the
//! stored delta covering the insertion point is replaced by the step up to
//! the new value, and a compensating delta for the old step is inserted
//! right after it. The first stored delta is special: it is the absolute
//! first value.

use crate::error::Error;

use super::rle::Rle;
use super::rle::RleToken;

/// A delta-encoded column of `i64` values.
#[derive(Clone, Debug, Default)]
pub struct Delta {
    rle: Rle,
    num_rows: i64,
}

/// Cursor state for iterating a [`Delta`]. The running sum lives in the
/// token, so iteration never re-reads earlier bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeltaToken {
    rle: RleToken,
    /// Decoded value of the current element.
    pub value: i64,
}

impl DeltaToken {
    /// Logical index of the current element.
    #[inline(always)]
    pub fn index(&self) -> i64 {
        return self.rle.index;
    }
}

impl Delta {
    /// An empty column.
    pub fn new() -> Delta {
        return Delta {
            rle: Rle::new(),
            num_rows: 0,
        };
    }

    /// A column over an existing encoded buffer.
    pub fn from_bytes(buffer: Vec<u8>) -> Delta {
        let rle = Rle::from_bytes(buffer);
        let num_rows = rle.row_count();
        return Delta { rle, num_rows };
    }

    /// The encoded size in bytes.
    #[inline(always)]
    pub fn size(&self) -> usize {
        return self.rle.size();
    }

    /// Total number of logical elements.
    #[inline(always)]
    pub fn row_count(&self) -> i64 {
        return self.num_rows;
    }

    /// Advance `token` to the next element, or `None` at end of stream.
    pub fn next(&self, token: DeltaToken) -> Option<DeltaToken> {
        let rle = self.rle.next(token.rle)?;
        return Some(DeltaToken {
            rle,
            value: token.value + rle.value,
        });
    }

    /// The decoded value at `index`. Linear in `index`.
    pub fn get(&self, index: i64) -> Result<i64, Error> {
        if index < 0 {
            return Err(Error::OutOfRange);
        }

        let mut token = DeltaToken::default();
        for _ in 0..=index {
            token = self.next(token).ok_or(Error::OutOfRange)?;
        }
        return Ok(token.value);
    }

    /// Insert `value` at logical index `index`, preserving every other
    /// decoded value.
    pub fn insert_at(&mut self, index: i64, value: i64) -> Result<(), Error> {
        if index < 0 || index > self.num_rows {
            return Err(Error::OutOfRange);
        }

        // First ever element: the stored delta is the absolute value.
        if self.num_rows == 0 {
            self.rle.insert_at(0, value)?;
            self.num_rows += 1;
            return Ok(());
        }

        // New head: the new value becomes the absolute first delta, and
        // the old head turns into a relative step from it.
        if index == 0 {
            let first = self.rle.get(0)?;
            self.rle.delete_at(0)?;
            self.rle.insert_at(0, value)?;
            self.rle.insert_at(1, first - value)?;
            self.num_rows += 1;
            return Ok(());
        }

        let mut last_value: i64 = 0;
        let mut token = DeltaToken::default();
        let mut i: i64 = 0;
        while let Some(next) = self.next(token) {
            token = next;

            if i == index {
                // replace this element's delta with the step up to the new
                // value, then compensate so this element decodes unchanged
                self.rle.delete_at(i)?;
                self.rle.insert_at(i, value - last_value)?;
                self.rle.insert_at(i + 1, token.value - value)?;
                self.num_rows += 1;
                return Ok(());
            }

            last_value = token.value;
            i += 1;
        }

        // Append: bounds were checked, so index == num_rows == i.
        self.rle.insert_at(i, value - last_value)?;
        self.num_rows += 1;
        return Ok(());
    }

    /// Split into two independent columns. The right side's first stored
    /// delta is rewritten to its absolute decoded value, which had been
    /// relative to the left side's last element.
    pub fn split_at(&self, index: i64) -> Result<(Delta, Delta), Error> {
        if index < 0 || index > self.num_rows {
            return Err(Error::OutOfRange);
        }

        let first_of_right = if index > 0 && index < self.num_rows {
            Some(self.get(index)?)
        } else {
            None
        };

        let (left_rle, right_rle) = self.rle.split_at(index)?;
        let left = Delta {
            rle: left_rle,
            num_rows: index,
        };
        let mut right = Delta {
            rle: right_rle,
            num_rows: self.num_rows - index,
        };

        // At index zero the right side is the whole column and its first
        // delta is already absolute.
        if let Some(v) = first_of_right {
            right.rle.delete_at(0)?;
            right.rle.insert_at(0, v)?;
        }

        return Ok((left, right));
    }

    /// Decode every element. Intended for tests and debugging.
    pub fn values(&self) -> Vec<i64> {
        let mut values = Vec::new();
        let mut token = DeltaToken::default();
        while let Some(next) = self.next(token) {
            token = next;
            values.push(token.value);
        }
        return values;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_values(values: &[i64]) -> Delta {
        let mut delta = Delta::new();
        for (i, &v) in values.iter().enumerate() {
            delta.insert_at(i as i64, v).expect("insert failed");
        }
        return delta;
    }

    #[test]
    fn sequential_inserts_roundtrip() {
        let delta = from_values(&[1, 2, 3, 5, 7, 9]);
        assert_eq!(delta.values(), vec![1, 2, 3, 5, 7, 9]);
        assert_eq!(delta.row_count(), 6);
    }

    #[test]
    fn monotonic_counters_stay_compact() {
        let values: Vec<i64> = (1..=100).collect();
        let delta = from_values(&values);
        // one block for the absolute head, one for the run of ones
        assert!(delta.size() <= 5);
        assert_eq!(delta.values(), values);
    }

    #[test]
    fn insert_at_head_preserves_tail() {
        let mut delta = from_values(&[5, 10, 20]);
        delta.insert_at(0, 2).unwrap();
        assert_eq!(delta.values(), vec![2, 5, 10, 20]);
    }

    #[test]
    fn insert_in_middle_preserves_neighbors() {
        let mut delta = from_values(&[1, 3]);
        delta.insert_at(1, 2).unwrap();
        assert_eq!(delta.values(), vec![1, 2, 3]);
    }

    #[test]
    fn insert_at_end_of_long_run() {
        // same bytes as the RLE case, read as deltas: 1, 2, ..., 61
        let mut delta = Delta::from_bytes(vec![0x7a, 0x02]);
        assert_eq!(delta.row_count(), 61);

        delta.insert_at(60, 61).unwrap();

        let values = delta.values();
        assert_eq!(values.len(), 62);
        assert_eq!(&values[58..], &[59, 60, 61, 61]);
    }

    #[test]
    fn negative_deltas_decode() {
        let delta = from_values(&[10, 4, 8, -3]);
        assert_eq!(delta.values(), vec![10, 4, 8, -3]);
    }

    #[test]
    fn out_of_range_inserts_fail() {
        let mut delta = from_values(&[1]);
        assert_eq!(delta.insert_at(-1, 0), Err(Error::OutOfRange));
        assert_eq!(delta.insert_at(2, 0), Err(Error::OutOfRange));
    }

    #[test]
    fn get_walks_to_index() {
        let delta = from_values(&[1, 2, 3, 5]);
        assert_eq!(delta.get(0), Ok(1));
        assert_eq!(delta.get(3), Ok(5));
        assert_eq!(delta.get(4), Err(Error::OutOfRange));
        assert_eq!(delta.get(-1), Err(Error::OutOfRange));
    }

    #[test]
    fn split_on_boundary_rewrites_head() {
        let delta = from_values(&[1, 2, 3, 5, 7, 9]);
        let (left, right) = delta.split_at(3).unwrap();
        assert_eq!(left.values(), vec![1, 2, 3]);
        assert_eq!(right.values(), vec![5, 7, 9]);
        assert_eq!(left.row_count(), 3);
        assert_eq!(right.row_count(), 3);
    }

    #[test]
    fn split_inside_run() {
        let delta = from_values(&[1, 2, 3, 5, 7, 9]);
        let (left, right) = delta.split_at(2).unwrap();
        assert_eq!(left.values(), vec![1, 2]);
        assert_eq!(right.values(), vec![3, 5, 7, 9]);
    }

    #[test]
    fn split_at_ends() {
        let delta = from_values(&[1, 2, 3]);

        let (left, right) = delta.split_at(0).unwrap();
        assert_eq!(left.values(), Vec::<i64>::new());
        assert_eq!(right.values(), vec![1, 2, 3]);

        let (left, right) = delta.split_at(3).unwrap();
        assert_eq!(left.values(), vec![1, 2, 3]);
        assert_eq!(right.values(), Vec::<i64>::new());
    }

    #[test]
    fn token_indices_count_up() {
        let delta = from_values(&[4, 4, 4]);
        let mut token = DeltaToken::default();
        let mut indices = Vec::new();
        while let Some(next) = delta.next(token) {
            token = next;
            indices.push(token.index());
        }
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
