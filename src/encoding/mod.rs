// model = "claude-opus-4-5"
// created = "2026-02-03"
// modified = "2026-02-05"
// driver = "Isaac Clayton"

//! Compressed column encodings over raw byte buffers.
//!
//! Everything a page stores lives in one of these five shapes:
//!
//! - [`Rle`]: run-length blocks of signed integers.
//! - [`Delta`]: RLE over first differences, for near-monotonic counters.
//! - [`Plain`]: self-delimiting typed values, uncompressed.
//! - [`Dictionary`]: unique byte strings with stable ordinal indices.
//! - [`DictionaryRle`]: RLE of dictionary indices, for repeating strings.
//!
//! All of them support insertion at a logical index by splicing bytes in
//! place, splitting into two independent halves, and lazy iteration
//! through caller-held tokens. Tokens are invalidated by any mutation of
//! the column they came from.

pub mod buffer;
pub mod delta;
pub mod dictionary;
pub mod dictionary_rle;
pub mod plain;
pub mod rle;
pub mod value;
pub mod varint;

pub use delta::Delta;
pub use delta::DeltaToken;
pub use dictionary::Dictionary;
pub use dictionary_rle::DictionaryRle;
pub use dictionary_rle::DictionaryRleToken;
pub use plain::Plain;
pub use plain::PlainToken;
pub use rle::Rle;
pub use rle::RleToken;
pub use value::RawType;
pub use value::Value;
