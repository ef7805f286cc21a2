//! Persistence for [`Interner`].
//!
//! Layout: a 32-bit arena byte length, the raw arena bytes (terminators
//! included), and the 32-bit index capacity. Integers are native endian and
//! the stream carries no magic number or version, so it is only portable
//! between identical platforms. Slot contents are never stored:
//! [`load`](Interner::load) re-derives the whole index by replaying the
//! restored arena, the same routine index growth uses.

use std::io::{self, Read, Write};

use crate::interner::Interner;

impl Interner {
    /// Writes the pool to `w`.
    pub fn save<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&(self.arena.len() as i32).to_ne_bytes())?;
        w.write_all(self.arena.as_bytes())?;
        w.write_all(&(self.index.capacity() as i32).to_ne_bytes())?;
        Ok(())
    }

    /// Restores the pool from `r`, discarding any existing contents.
    ///
    /// On error the pool is left empty, never half-populated. Short reads
    /// fail with [`io::ErrorKind::UnexpectedEof`]; a negative size, an arena
    /// that does not end on a record terminator, or a record that is not
    /// valid UTF-8 fail with [`io::ErrorKind::InvalidData`].
    pub fn load<R: Read>(&mut self, r: &mut R) -> io::Result<()> {
        self.arena.clear();
        self.index.clear();

        let len = read_i32(r)?;
        if len < 0 {
            return Err(invalid("negative arena length"));
        }
        let mut data = vec![0u8; len as usize];
        r.read_exact(&mut data)?;
        if data.last().map_or(false, |&b| b != 0) {
            return Err(invalid("arena does not end on a record terminator"));
        }
        let capacity = read_i32(r)?;
        if capacity < 0 {
            return Err(invalid("negative index capacity"));
        }

        self.arena.replace(data);
        let mut records = 0usize;
        for (_, payload) in self.arena.records() {
            if std::str::from_utf8(payload).is_err() {
                self.arena.clear();
                return Err(invalid("record is not valid utf-8"));
            }
            records += 1;
        }

        // A table without a free slot makes probing spin forever; only a
        // corrupt stream can declare such a capacity, so bump it through the
        // usual growth formula instead.
        let mut capacity = capacity as usize;
        while records > 0 && capacity <= records {
            capacity = capacity * 2 + 3;
        }
        self.index.rebuild(&self.arena, capacity);
        Ok(())
    }
}

fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_ne_bytes(buf))
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
