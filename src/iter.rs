use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::decoding::{decode_one, decode_prev};

/// A forward iterator over the code points of a byte range.
///
/// Decoding stops at the first malformed sequence; the iterator then parks
/// at that position and keeps returning `None`. [`byte_offset`] exposes the
/// current position, so a caller can tell a clean end from an early stop by
/// comparing it against the range length.
///
/// Comparing iterators over different ranges with `<`/`>` yields no answer
/// (the [`PartialOrd`] impl returns `None`); equality additionally requires
/// the same position.
///
/// [`byte_offset`]: CodePoints::byte_offset
#[derive(Debug, Clone, Copy)]
pub struct CodePoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> CodePoints<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> CodePoints<'a> {
        CodePoints { bytes, pos: 0 }
    }

    pub(crate) fn at(bytes: &'a [u8], pos: usize) -> CodePoints<'a> {
        debug_assert!(pos <= bytes.len());
        CodePoints { bytes, pos }
    }

    /// Byte offset of the next code point to decode.
    #[inline]
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.pos
    }

    /// True once the iterator has consumed the whole range.
    #[inline]
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    /// Decodes the next code point without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<u32> {
        decode_one(self.bytes, self.pos).ok().map(|(cp, _)| cp)
    }

    /// Steps one code point backward and returns it, or `None` at the start
    /// of the range (or when the bytes behind the cursor are malformed).
    pub fn retreat(&mut self) -> Option<u32> {
        let (cp, start) = decode_prev(self.bytes, self.pos)?.ok()?;
        self.pos = start;
        Some(cp)
    }
}

impl Iterator for CodePoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.pos == self.bytes.len() {
            return None;
        }
        let (cp, next) = decode_one(self.bytes, self.pos).ok()?;
        self.pos = next;
        Some(cp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.pos;
        // a code point spans 1 to 4 bytes
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl FusedIterator for CodePoints<'_> {}

impl PartialEq for CodePoints<'_> {
    fn eq(&self, other: &CodePoints<'_>) -> bool {
        same_range(self.bytes, other.bytes) && self.pos == other.pos
    }
}

impl PartialOrd for CodePoints<'_> {
    fn partial_cmp(&self, other: &CodePoints<'_>) -> Option<Ordering> {
        same_range(self.bytes, other.bytes).then(|| self.pos.cmp(&other.pos))
    }
}

/// A backward iterator over the code points of a byte range.
///
/// Starts past the end and walks toward the start, so `next()` yields the
/// code points in reverse order. Ordering between two of these iterators
/// follows iteration progress: the one closer to the range start has
/// yielded more and compares greater.
#[derive(Debug, Clone, Copy)]
pub struct CodePointsRev<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> CodePointsRev<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> CodePointsRev<'a> {
        CodePointsRev { bytes, pos: bytes.len() }
    }

    /// Byte offset just past the next code point to yield.
    #[inline]
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.pos
    }

    /// True once the iterator has walked back to the start of the range.
    #[inline]
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos == 0
    }

    /// Decodes the code point this iterator would yield next, without
    /// moving.
    #[must_use]
    pub fn peek(&self) -> Option<u32> {
        decode_prev(self.bytes, self.pos)?.ok().map(|(cp, _)| cp)
    }

    /// Steps one code point toward the end (undoing a `next()`) and returns
    /// the code point stepped over, or `None` at the end of the range.
    pub fn retreat(&mut self) -> Option<u32> {
        if self.pos == self.bytes.len() {
            return None;
        }
        let (cp, next) = decode_one(self.bytes, self.pos).ok()?;
        self.pos = next;
        Some(cp)
    }
}

impl Iterator for CodePointsRev<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let (cp, start) = decode_prev(self.bytes, self.pos)?.ok()?;
        self.pos = start;
        Some(cp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pos.div_ceil(4), Some(self.pos))
    }
}

impl FusedIterator for CodePointsRev<'_> {}

impl PartialEq for CodePointsRev<'_> {
    fn eq(&self, other: &CodePointsRev<'_>) -> bool {
        same_range(self.bytes, other.bytes) && self.pos == other.pos
    }
}

impl PartialOrd for CodePointsRev<'_> {
    fn partial_cmp(&self, other: &CodePointsRev<'_>) -> Option<Ordering> {
        // progress order: a smaller offset means more yielded
        same_range(self.bytes, other.bytes).then(|| other.pos.cmp(&self.pos))
    }
}

fn same_range(a: &[u8], b: &[u8]) -> bool {
    std::ptr::eq(a.as_ptr(), b.as_ptr()) && a.len() == b.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_walks_mixed_widths() {
        let bytes = "a\u{645}\u{20AC}\u{1F600}".as_bytes();
        let mut it = CodePoints::new(bytes);
        assert_eq!(it.next(), Some(u32::from('a')));
        assert_eq!(it.byte_offset(), 1);
        assert_eq!(it.next(), Some(0x645));
        assert_eq!(it.byte_offset(), 3);
        assert_eq!(it.next(), Some(0x20AC));
        assert_eq!(it.next(), Some(0x1F600));
        assert!(it.is_at_end());
        assert_eq!(it.next(), None);
    }

    #[test]
    fn forward_parks_on_malformed_input() {
        let bytes = b"ab\xFFcd";
        let mut it = CodePoints::new(bytes);
        assert_eq!(it.next(), Some(u32::from('a')));
        assert_eq!(it.next(), Some(u32::from('b')));
        assert_eq!(it.next(), None);
        assert_eq!(it.byte_offset(), 2);
        assert!(!it.is_at_end());
    }

    #[test]
    fn retreat_undoes_next() {
        let bytes = "hé".as_bytes();
        let mut it = CodePoints::new(bytes);
        assert_eq!(it.next(), Some(u32::from('h')));
        assert_eq!(it.next(), Some(u32::from('é')));
        assert_eq!(it.retreat(), Some(u32::from('é')));
        assert_eq!(it.retreat(), Some(u32::from('h')));
        assert_eq!(it.retreat(), None);
        assert_eq!(it.byte_offset(), 0);
    }

    #[test]
    fn reverse_yields_code_points_backward() {
        let bytes = "a\u{645}z".as_bytes();
        let collected: Vec<u32> = CodePointsRev::new(bytes).collect();
        assert_eq!(collected, vec![u32::from('z'), 0x645, u32::from('a')]);
    }

    #[test]
    fn ordering_follows_progress() {
        let bytes = b"hello";
        let mut ahead = CodePoints::new(bytes);
        let behind = CodePoints::new(bytes);
        ahead.next();
        assert!(behind < ahead);

        let mut rev_ahead = CodePointsRev::new(bytes);
        let rev_behind = CodePointsRev::new(bytes);
        rev_ahead.next();
        // the reverse iterator that has yielded more compares greater even
        // though its byte offset is smaller
        assert!(rev_behind < rev_ahead);
    }

    #[test]
    fn iterators_over_different_ranges_do_not_order() {
        let a = CodePoints::new(b"abc");
        let b = CodePoints::new(b"xyz");
        assert_eq!(PartialOrd::partial_cmp(&a, &b), None);
        assert_ne!(a, b);
    }
}
