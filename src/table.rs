//! The open-addressing index over the arena.

use crate::arena::Arena;
use crate::interner::str_hash;

/// Marks an unoccupied slot. The probe loop detects a miss by reaching an
/// empty slot, so the sentinel doubles as the internal "not found" value.
const EMPTY: u32 = u32::MAX;

/// Open-addressing hash index mapping record hashes to arena offsets.
///
/// The table holds no information that is not recoverable from the arena:
/// growing it throws every slot away and reinserts each arena record under a
/// recomputed hash. That keeps the index pure derived state, which is what
/// lets serialization store nothing but the arena and a capacity.
///
/// There is no deletion and therefore no tombstones; stopping a probe at the
/// first empty slot is always correct.
pub struct Table {
    slots: Vec<u32>,
    load: usize,
}

impl Table {
    pub fn new() -> Self {
        Table {
            slots: Vec::new(),
            load: 0,
        }
    }

    /// Number of slots. Zero until the first insertion.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots, equal to the number of arena records.
    pub fn load(&self) -> usize {
        self.load
    }

    /// Looks up the arena offset of the record byte-equal to `bytes`.
    ///
    /// Probes linearly from `hash % capacity` with wraparound and stops at
    /// the first empty slot. A capacity of zero is an immediate miss.
    pub fn find(&self, arena: &Arena, bytes: &[u8], hash: u32) -> Option<u32> {
        if self.slots.is_empty() {
            return None;
        }
        let mut p = hash as usize % self.slots.len();
        while self.slots[p] != EMPTY {
            if arena.view(self.slots[p]) == bytes {
                return Some(self.slots[p]);
            }
            p += 1;
            if p == self.slots.len() {
                p = 0;
            }
        }
        None
    }

    /// Grows until one more insertion keeps `load * 2 <= capacity`.
    ///
    /// Each round multiplies the capacity by two and adds three, which grows
    /// from zero and keeps capacities odd. Must be called before every
    /// [`insert_no_rehash`](Table::insert_no_rehash) outside of a rebuild.
    pub fn ensure_capacity(&mut self, arena: &Arena) {
        while (self.load + 1) * 2 > self.slots.len() {
            let capacity = self.slots.len() * 2 + 3;
            self.rebuild(arena, capacity);
        }
    }

    /// Discards all slots and reinserts every arena record into a table of
    /// `capacity` empty slots.
    pub fn rebuild(&mut self, arena: &Arena, capacity: usize) {
        self.slots.clear();
        self.slots.resize(capacity, EMPTY);
        self.load = 0;
        for (offset, payload) in arena.records() {
            self.insert_no_rehash(str_hash(payload), offset);
        }
    }

    /// Occupies the first empty slot on the probe path from `hash`.
    ///
    /// The caller must have grown the table first; probing relies on an
    /// empty slot being reachable.
    pub fn insert_no_rehash(&mut self, hash: u32, offset: u32) {
        self.load += 1;
        let mut p = hash as usize % self.slots.len();
        while self.slots[p] != EMPTY {
            p += 1;
            if p == self.slots.len() {
                p = 0;
            }
        }
        self.slots[p] = offset;
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.load = 0;
    }
}
