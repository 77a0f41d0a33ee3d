// model = "claude-opus-4-5"
// created = "2026-02-03"
// modified = "2026-02-06"
// driver = "Isaac Clayton"

//! Quire - columnar storage for sequence CRDT operation logs.
//!
//! Every edit in a collaborative document becomes an immutable operation
//! with a unique identity and a reference to the identity it follows.
//! Quire stores the growing log of such operations in pages of six
//! parallel compressed columns, routes each insertion to the page holding
//! its reference with per-page Bloom filters, and splits pages as they
//! fill.
//!
//! # Quick Start
//!
//! ```
//! use quire::encoding::{RawType, Value};
//! use quire::object::Object;
//! use quire::op::{Id, Op};
//!
//! // A document whose values are code points
//! let mut doc = Object::new(RawType::VarInt);
//!
//! // Type "hi": each op references the one before it
//! let first = Op::insert(Id::new(1, b"me"), Id::root(), Value::rune('h'));
//! let second = Op::insert(Id::new(2, b"me"), Id::new(1, b"me"), Value::rune('i'));
//! doc.insert(first).unwrap();
//! doc.insert(second).unwrap();
//!
//! assert_eq!(doc.row_count(), 2);
//! ```

pub mod bloom;
pub mod encoding;
pub mod error;
pub mod object;
pub mod op;
pub mod page;

pub use encoding::RawType;
pub use encoding::Value;
pub use error::Error;
pub use object::Object;
pub use object::ObjectOptions;
pub use object::ValueToken;
pub use op::Id;
pub use op::Op;
pub use op::OP_DELETE;
pub use op::OP_INSERT;
pub use page::Page;
