use bstr::ByteSlice;
use thiserror::Error;

use crate::buffer::{Buffer, CapacityError};
use crate::decoding::{code_point_count, decode_prev};
use crate::encoding::encode_one;
use crate::iter::{CodePoints, CodePointsRev};

/// A code point was rejected by [`Utf8String::push`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    /// `U+0000` cannot be stored; the trailing nul is the terminator.
    #[error("U+0000 cannot be pushed onto a nul-terminated string")]
    NulCodePoint,

    /// The value is beyond `U+10FFFF` and has no UTF-8 encoding.
    #[error("{0:#X} is not a valid code point")]
    InvalidCodePoint(u32),

    /// The allocator refused the space the push needed.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// A growable, nul-terminated UTF-8 string.
///
/// The backing storage always carries a trailing `0` byte past the content,
/// so [`as_bytes_with_nul`](Utf8String::as_bytes_with_nul) is a valid
/// C-style string view at any time. Content bytes are *not* revalidated on
/// every operation; [`from_bytes`](Utf8String::from_bytes) and the `From`
/// conversions accept arbitrary bytes, and the decoding operations report
/// or stop at malformed sequences rather than panicking.
///
/// ```
/// use utf8string::Utf8String;
///
/// let mut s = Utf8String::from("Hello, world");
/// s.push(u32::from('!'))?;
/// assert_eq!(s.size(), 13);
/// assert_eq!(s.count(), 13);
/// assert_eq!(s.pop(), Some(u32::from('!')));
/// assert_eq!(s, "Hello, world");
/// # Ok::<(), utf8string::PushError>(())
/// ```
#[derive(Clone)]
pub struct Utf8String {
    pub(crate) buf: Buffer,
}

impl Utf8String {
    /// Smallest allocation the string makes once it allocates at all.
    /// Content up to `SSO_CAPACITY - 1` bytes never triggers a second
    /// allocation.
    pub const SSO_CAPACITY: usize = Buffer::MIN_CAPACITY;

    /// An empty string. Allocates only the terminator byte.
    #[must_use]
    pub fn new() -> Utf8String {
        Utf8String { buf: Buffer::new() }
    }

    /// An empty string whose allocation can hold `content_len` content
    /// bytes (plus the terminator) without growing.
    #[must_use]
    pub fn with_capacity(content_len: usize) -> Utf8String {
        Utf8String {
            buf: Buffer::with_capacity(content_len + 1),
        }
    }

    /// Adopts `bytes` as content without validating them.
    ///
    /// Malformed sequences are tolerated at rest; the decoding operations
    /// surface them when reached.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Utf8String {
        let mut buf = Buffer::with_capacity(bytes.len() + 1);
        // capacity was just sized for this append
        let _ = buf.append_bytes(bytes);
        Utf8String { buf }
    }

    /// Content length in bytes, terminator excluded.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    /// True when the string holds no content bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// Content bytes the current allocation can hold without growing,
    /// terminator excluded.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity().saturating_sub(1)
    }

    /// Number of code points in the valid prefix of the content.
    ///
    /// Walks the bytes, so this is O(n). On well-formed content it counts
    /// the whole string; on malformed content it stops at the first bad
    /// sequence.
    #[must_use]
    pub fn count(&self) -> usize {
        code_point_count(self.as_bytes())
    }

    /// Content bytes, terminator excluded.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.content()
    }

    /// Content bytes including the trailing nul.
    #[inline]
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.buf.content_with_nul()
    }

    /// The `idx`-th code point, or `None` when `idx` is past the last code
    /// point or the walk hits a malformed sequence first. O(idx).
    #[must_use]
    pub fn at(&self, idx: usize) -> Option<u32> {
        self.code_points().nth(idx)
    }

    /// The byte at offset `idx`, terminator excluded.
    #[must_use]
    pub fn octet_at(&self, idx: usize) -> Option<u8> {
        self.as_bytes().get(idx).copied()
    }

    /// Appends one code point, re-terminating afterward.
    ///
    /// `U+0000` and values beyond `U+10FFFF` are rejected; on any error the
    /// string is unchanged.
    pub fn push(&mut self, cp: u32) -> Result<(), PushError> {
        if cp == 0 {
            return Err(PushError::NulCodePoint);
        }
        let mut enc = [0u8; 4];
        let len = encode_one(cp, &mut enc).ok_or(PushError::InvalidCodePoint(cp))?;
        self.buf.append_bytes(&enc[..len])?;
        Ok(())
    }

    /// Removes and returns the last code point, or `None` when the string
    /// is empty or its tail is malformed. The string is unchanged on
    /// `None`.
    pub fn pop(&mut self) -> Option<u32> {
        let (cp, start) = decode_prev(self.as_bytes(), self.size())?.ok()?;
        self.buf.truncate_to(start);
        Some(cp)
    }

    /// Appends raw bytes without validating them.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), CapacityError> {
        self.buf.append_bytes(bytes)
    }

    /// Appends the content of another string.
    pub fn append(&mut self, other: &Utf8String) -> Result<(), CapacityError> {
        self.buf.append_bytes(other.as_bytes())
    }

    /// Appends a `&str`.
    pub fn append_str(&mut self, s: &str) -> Result<(), CapacityError> {
        self.buf.append_bytes(s.as_bytes())
    }

    /// Grows the allocation so `additional` more content bytes fit without
    /// reallocating. Follows the same growth schedule as the appends.
    pub fn reserve(&mut self, additional: usize) -> Result<(), CapacityError> {
        self.buf.ensure_capacity(self.buf.len() + 1 + additional)
    }

    /// Returns unused capacity to the allocator.
    pub fn shrink_to_fit(&mut self) {
        self.buf.shrink_to_fit();
    }

    /// Empties the string, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Empties the string and drops the allocation.
    pub fn release(&mut self) {
        self.buf.release();
    }

    /// A forward iterator over the code points of the content.
    #[must_use]
    pub fn code_points(&self) -> CodePoints<'_> {
        CodePoints::new(self.as_bytes())
    }

    /// A backward iterator over the code points of the content.
    #[must_use]
    pub fn code_points_rev(&self) -> CodePointsRev<'_> {
        CodePointsRev::new(self.as_bytes())
    }

    /// Finds the first occurrence of `needle` in the content and returns a
    /// forward iterator positioned at it.
    ///
    /// The search is over raw bytes. An empty needle matches at the end; a
    /// hit or a miss both yield an iterator whose
    /// [`is_at_end`](CodePoints::is_at_end) distinguishes them only when
    /// the match is not at the very end, so compare
    /// [`byte_offset`](CodePoints::byte_offset) against
    /// [`size`](Utf8String::size) when that matters.
    ///
    /// ```
    /// use utf8string::Utf8String;
    ///
    /// let s = Utf8String::from("Hello, world!");
    /// let mut it = s.find("world");
    /// assert_eq!(it.byte_offset(), 7);
    /// assert_eq!(it.next(), Some(u32::from('w')));
    ///
    /// assert!(s.find("worlds").is_at_end()); // no match
    /// ```
    pub fn find<N: AsRef<[u8]>>(&self, needle: N) -> CodePoints<'_> {
        let bytes = self.as_bytes();
        let needle = needle.as_ref();
        if needle.is_empty() {
            return CodePoints::at(bytes, bytes.len());
        }
        match bytes.find(needle) {
            Some(pos) => CodePoints::at(bytes, pos),
            None => CodePoints::at(bytes, bytes.len()),
        }
    }
}
