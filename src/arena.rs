//! The append-only byte store backing the interner.

/// An append-only buffer of nul-terminated string records.
///
/// Record payloads never contain a nul byte, so record boundaries can always
/// be recovered by scanning for terminators. Offsets returned by
/// [`append`](Arena::append) are stable for the lifetime of the arena: the
/// buffer only ever grows and records are never moved or removed.
pub struct Arena {
    data: Vec<u8>,
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Arena { data: Vec::new() }
    }

    /// Appends a record, returning the offset of its first byte.
    ///
    /// Writes the payload plus a single terminator byte. The returned offset
    /// equals the arena length just before the write.
    pub fn append(&mut self, bytes: &[u8]) -> u32 {
        assert!(
            !bytes.contains(&0),
            "interned strings cannot contain nul bytes"
        );
        assert!(
            self.data.len() + bytes.len() + 1 < u32::MAX as usize,
            "too many interned bytes"
        );
        let offset = self.data.len() as u32;
        self.data.extend_from_slice(bytes);
        self.data.push(0);
        offset
    }

    /// The payload of the record starting at `offset`, terminator excluded.
    ///
    /// The returned slice is invalidated by the next [`append`](Arena::append)
    /// since the buffer may reallocate; callers holding a record across
    /// mutation must re-derive it from the offset.
    pub fn view(&self, offset: u32) -> &[u8] {
        let rest = &self.data[offset as usize..];
        let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Iterates over every record as `(offset, payload)` in append order.
    pub fn records(&self) -> Records<'_> {
        Records {
            arena: self,
            pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Replaces the arena contents wholesale. Used by deserialization.
    pub fn replace(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Iterator over the records of an [`Arena`], recovered by terminator
/// scanning.
pub struct Records<'a> {
    arena: &'a Arena,
    pos: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = (u32, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.arena.data.len() {
            return None;
        }
        let offset = self.pos as u32;
        let payload = self.arena.view(offset);
        self.pos += payload.len() + 1;
        Some((offset, payload))
    }
}

#[cfg(test)]
mod test {
    use super::Arena;

    #[test]
    fn append_returns_previous_length() {
        let mut arena = Arena::new();
        assert_eq!(arena.append(b"a"), 0);
        assert_eq!(arena.append(b"bb"), 2);
        assert_eq!(arena.append(b"ccc"), 5);
        assert_eq!(arena.len(), 9);
        assert_eq!(arena.as_bytes(), b"a\0bb\0ccc\0");
    }

    #[test]
    fn view_stops_at_terminator() {
        let mut arena = Arena::new();
        let a = arena.append(b"foo");
        let b = arena.append(b"barbaz");
        assert_eq!(arena.view(a), b"foo");
        assert_eq!(arena.view(b), b"barbaz");
    }

    #[test]
    fn records_walks_every_record() {
        let mut arena = Arena::new();
        let offsets = [arena.append(b"x"), arena.append(b"yy"), arena.append(b"")];
        let records: Vec<_> = arena.records().collect();
        assert_eq!(
            records,
            vec![
                (offsets[0], b"x" as &[u8]),
                (offsets[1], b"yy"),
                (offsets[2], b""),
            ]
        );
    }

    #[test]
    fn empty_arena_has_no_records() {
        let arena = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.records().count(), 0);
    }
}
