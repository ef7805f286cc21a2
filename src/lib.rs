//! A deduplicating, persistable string pool.
//!
//! [`Interner`] stores every distinct string exactly once in an append-only
//! byte arena and hands out its arena offset as a stable [`StrId`] handle.
//! Lookup by content goes through an open-addressing index which is fully
//! derived from the arena: growing it rebuilds it from the arena records, and
//! the serialized format stores only the arena bytes plus a capacity.

mod arena;
mod interner;
mod persist;
mod table;

pub use interner::{Interner, StrId};
