//! A deduplicating string pool handing out stable offset handles.

use crate::arena::Arena;
use crate::table::Table;

/// Handle to an interned string: the arena byte offset of its canonical copy.
///
/// Handles are stable for the lifetime of the [`Interner`] and across
/// `save`/`load` round trips. Equal handles from the same interner mean equal
/// strings.
#[derive(Clone, Copy, Eq, PartialEq, Hash, bytemuck::Pod, bytemuck::Zeroable, Debug)]
#[repr(transparent)]
pub struct StrId(pub(crate) u32);

impl StrId {
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

/// The hash used by the index: djb2 over the payload bytes, terminator
/// excluded, evaluated with wraparound and narrowed to `u32`. Collisions
/// introduced by the narrowing are resolved by probing, not avoided.
pub(crate) fn str_hash(bytes: &[u8]) -> u32 {
    let mut hash: u64 = 5381;
    for &b in bytes {
        hash = hash.wrapping_mul(33).wrapping_add(b as u64);
    }
    hash as u32
}

/// A write-once/read-many string pool.
///
/// Interning a string stores it in an append-only arena the first time and
/// returns the same [`StrId`] for every later call with equal content. There
/// is no way to remove a string; the structure is built incrementally through
/// [`intern`](Interner::intern) or restored wholesale through
/// [`load`](Interner::load).
///
/// Not safe for concurrent mutation; `&mut self` on the mutating operations
/// enforces a single writer.
pub struct Interner {
    pub(crate) arena: Arena,
    pub(crate) index: Table,
}

impl Default for Interner {
    fn default() -> Self {
        Interner::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            arena: Arena::new(),
            index: Table::new(),
        }
    }

    /// Interns a string, returning its handle.
    ///
    /// Returns the existing handle if equal content was interned before,
    /// otherwise appends the string to the arena and indexes the new record.
    ///
    /// # Panics
    ///
    /// If `s` contains a nul byte, which would corrupt record boundaries.
    pub fn intern(&mut self, s: &str) -> StrId {
        let bytes = s.as_bytes();
        let hash = str_hash(bytes);
        if let Some(offset) = self.index.find(&self.arena, bytes, hash) {
            return StrId(offset);
        }
        self.index.ensure_capacity(&self.arena);
        let offset = self.arena.append(bytes);
        self.index.insert_no_rehash(hash, offset);
        StrId(offset)
    }

    /// The handle of `s`, if it has been interned.
    pub fn lookup(&self, s: &str) -> Option<StrId> {
        let bytes = s.as_bytes();
        self.index.find(&self.arena, bytes, str_hash(bytes)).map(StrId)
    }

    pub fn contains(&self, s: &str) -> bool {
        self.lookup(s).is_some()
    }

    /// The string a handle refers to.
    ///
    /// `id` must have been returned by [`intern`](Interner::intern) or
    /// [`lookup`](Interner::lookup) on this interner, or refer to a record
    /// restored by [`load`](Interner::load). The borrow is tied to `&self`,
    /// so it cannot outlive a mutation of the pool.
    pub fn resolve(&self, id: StrId) -> &str {
        let payload = self.arena.view(id.0);
        // Records are only ever written from `&str`, and `load` re-validates
        // every restored record.
        unsafe { std::str::from_utf8_unchecked(payload) }
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.index.load()
    }

    pub fn is_empty(&self) -> bool {
        self.index.load() == 0
    }

    /// Slot count of the hash index. Zero until the first insertion.
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Iterates over all interned strings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StrId, &str)> {
        self.arena.records().map(|(offset, payload)| {
            (StrId(offset), unsafe {
                std::str::from_utf8_unchecked(payload)
            })
        })
    }
}
