use std::collections::TryReserveError;

use thiserror::Error;

/// The allocator could not satisfy a reservation request.
///
/// Returned by the fallible growth paths; the string is untouched when this
/// error surfaces, so callers may free memory and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not reserve capacity: {0}")]
pub struct CapacityError(#[from] TryReserveError);

/// A heap buffer whose last byte is always a nul terminator.
///
/// The vector is never empty: a fresh buffer holds exactly `[0]`. All
/// mutation goes through methods that re-establish the terminator, so
/// `content()` and the raw `data` view stay coherent.
#[derive(Debug, Clone)]
pub(crate) struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Smallest allocation a non-empty buffer makes. Short strings all land
    /// in an allocation of this size, so append churn on small content does
    /// not reallocate.
    pub(crate) const MIN_CAPACITY: usize = 24;

    pub(crate) fn new() -> Buffer {
        Buffer::with_capacity(Self::MIN_CAPACITY)
    }

    /// A buffer whose allocation can hold `total` bytes including the
    /// terminator without growing.
    pub(crate) fn with_capacity(total: usize) -> Buffer {
        let mut data = Vec::with_capacity(total.max(Self::MIN_CAPACITY));
        data.push(0);
        Buffer { data }
    }

    /// Content bytes, terminator excluded.
    #[inline]
    pub(crate) fn content(&self) -> &[u8] {
        &self.data[..self.data.len() - 1]
    }

    /// Content bytes plus the trailing nul.
    #[inline]
    pub(crate) fn content_with_nul(&self) -> &[u8] {
        &self.data
    }

    /// Content length in bytes, terminator excluded.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len() - 1
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Applies the growth schedule until the allocation covers `target`
    /// total bytes. Each round multiplies by 5/2 and adds 8, so repeated
    /// appends amortize to O(1) per byte.
    fn grown_capacity(&self, target: usize) -> usize {
        let mut cap = self.data.capacity().max(Self::MIN_CAPACITY);
        while cap < target {
            cap = cap * 5 / 2 + 8;
        }
        cap
    }

    /// Ensures the allocation can hold `target` total bytes (terminator
    /// included). On failure the buffer is unchanged.
    pub(crate) fn ensure_capacity(&mut self, target: usize) -> Result<(), CapacityError> {
        if target <= self.data.capacity() {
            return Ok(());
        }
        let cap = self.grown_capacity(target);
        self.data.try_reserve_exact(cap - self.data.len())?;
        Ok(())
    }

    /// Appends `bytes` before the terminator, growing if needed. On failure
    /// nothing is appended.
    pub(crate) fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        self.ensure_capacity(self.data.len() + bytes.len())?;
        self.data.pop();
        self.data.extend_from_slice(bytes);
        self.data.push(0);
        Ok(())
    }

    /// Cuts the content down to `content_len` bytes and re-terminates.
    /// Capacity is untouched.
    pub(crate) fn truncate_to(&mut self, content_len: usize) {
        debug_assert!(content_len < self.data.len());
        self.data.truncate(content_len);
        self.data.push(0);
    }

    pub(crate) fn clear(&mut self) {
        self.truncate_to(0);
    }

    /// Gives unused capacity back to the allocator; content is preserved.
    pub(crate) fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Drops the allocation entirely and resets to a fresh buffer.
    pub(crate) fn release(&mut self) {
        *self = Buffer::new();
    }
}

impl Default for Buffer {
    fn default() -> Buffer {
        Buffer::new()
    }
}

#[test]
fn fresh_buffer_is_terminated() {
    let buf = Buffer::new();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.content(), b"");
    assert_eq!(buf.content_with_nul(), b"\0");
}

#[test]
fn growth_schedule_is_5_halves_plus_8() {
    let buf = Buffer::new();
    // one round from the floor
    assert_eq!(buf.grown_capacity(25), 24 * 5 / 2 + 8);
    // already covered: no rounds
    assert_eq!(buf.grown_capacity(10), 24);
    // several rounds compound
    let mut cap = 24;
    while cap < 10_000 {
        cap = cap * 5 / 2 + 8;
    }
    assert_eq!(buf.grown_capacity(10_000), cap);
}

#[test]
fn append_keeps_terminator_invariant() {
    let mut buf = Buffer::new();
    buf.append_bytes(b"hello").unwrap();
    assert_eq!(buf.content(), b"hello");
    assert_eq!(buf.content_with_nul(), b"hello\0");
    buf.append_bytes(b", world").unwrap();
    assert_eq!(buf.content(), b"hello, world");
    assert_eq!(*buf.content_with_nul().last().unwrap(), 0);
}

#[test]
fn truncate_reterminates() {
    let mut buf = Buffer::new();
    buf.append_bytes(b"hello, world").unwrap();
    buf.truncate_to(5);
    assert_eq!(buf.content(), b"hello");
    assert_eq!(buf.content_with_nul(), b"hello\0");
    buf.clear();
    assert_eq!(buf.content_with_nul(), b"\0");
}

#[test]
fn release_forgets_the_allocation() {
    let mut buf = Buffer::with_capacity(4096);
    buf.append_bytes(b"payload").unwrap();
    buf.release();
    assert_eq!(buf.len(), 0);
    assert!(buf.capacity() < 4096);
    assert!(buf.capacity() >= Buffer::MIN_CAPACITY);
}
