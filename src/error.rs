// model = "claude-opus-4-5"
// created = "2026-02-03"
// modified = "2026-02-03"
// driver = "Isaac Clayton"

//! Error types shared by every layer of the engine.
//!
//! Columns, pages, and objects all fail in exactly two ways, and the error
//! surfaces unchanged through the stack. Nothing is recovered locally below
//! the object layer; the one exception is that the object treats a
//! `NotFound` from a filter-positive page as a Bloom false positive and
//! keeps scanning.

/// An error from a column, page, or object operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An index or offset was negative or past the end of the data.
    OutOfRange,
    /// An identity lookup exhausted every candidate page.
    NotFound,
}
