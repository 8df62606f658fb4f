//! Ordered associative skip list with O(1) min/max access.
//!
//! This crate provides a probabilistic ordered container over unique
//! numeric values, each tagged with a string identifier and an optional
//! auxiliary payload. Expected O(log n) search, insert, and delete with no
//! rebalancing, plus O(1) access to both extremes and O(1)-amortized
//! removal of either, so the same structure serves as an ordered map and
//! as a min/max heap substitute.
//!
//! # Design Philosophy
//!
//! Hand-linked node structures in Rust trade ergonomics for `unsafe`
//! pointer juggling. This crate keeps the links and drops the pointers:
//!
//! ```text
//! Arena            - owns nodes, provides stable indices
//! SkipList         - coordinates indices, owns its arena
//! prev/next/above/below - plain indices with a reserved "none" sentinel
//! ```
//!
//! Benefits:
//! - **Stable indices**: removing a node never invalidates the others
//! - **O(1) rewiring**: splicing a row is index assignment, no ownership moves
//! - **Weak cache handle**: the find cache is an index, explicitly
//!   invalidated on delete, so it can never extend a node's lifetime
//! - **Deterministic**: promotion randomness is an injected [`RngCore`],
//!   seed it and every tower shape is reproducible
//!
//! [`RngCore`]: rand_core::RngCore
//!
//! # Quick Start
//!
//! ```
//! use towerlist::SkipList;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let rng = SmallRng::seed_from_u64(12345);
//! let mut list: SkipList<i64, &str, SmallRng> = SkipList::new(rng);
//!
//! list.insert("a", 30);
//! list.insert("b", 10);
//! list.insert_with("c", 20, "payload");
//!
//! // Ordered map face
//! assert_eq!(list.find(20).unwrap().aux, Some("payload"));
//! assert_eq!(list.to_vec(false).iter().map(|r| r.value).collect::<Vec<_>>(),
//!            vec![10, 20, 30]);
//!
//! // Heap face
//! assert_eq!(list.remove_min().unwrap().value, 10);
//! assert_eq!(list.remove_max().unwrap().value, 30);
//! ```
//!
//! # Semantics
//!
//! Values are unique: inserting an already-present value is a silent
//! no-op, as is an empty identifier or a NaN value. Lookups and removals
//! report absence as `None`, never as a panic. Payloads are deep-copied in
//! on insert and deep-copied out in every [`Record`], so caller-held and
//! stored data never alias.
//!
//! # Operations
//!
//! | Operation | Cost | Notes |
//! |-----------|------|-------|
//! | `insert` / `insert_with` | O(log n) expected | no-op on duplicate/invalid |
//! | `find` | O(log n) expected | O(1) on repeat query (cache) |
//! | `delete` | O(n) | deliberate plain row-0 scan, off the cache path |
//! | `remove_min` / `remove_max` | O(1) target + tower unlink | heap-style drain |
//! | `min` / `max` | O(1) | empty list reports the type's MIN/MAX |
//! | `to_vec` / `iter` | O(n) | double-ended, ascending by value |
//! | `levels` | O(log n) typical | rows never shrink until `clear` |
//!
//! # Promotion Model
//!
//! Each insertion climbs one row at a time while `rng.next_u32() & (ratio
//! - 1) == 0`, with `ratio` configured at construction (default 2, the
//! fair coin; 4 gives a Redis-style sparser tower). Rows are created
//! lazily on first promotion past the current top and persist until
//! [`SkipList::clear`].

#![warn(missing_docs)]

pub mod arena;
pub mod link;
pub mod numeric;
pub mod skiplist;

pub use arena::Arena;
pub use link::Link;
pub use numeric::Numeric;
pub use skiplist::{Iter, Record, SkipList};
