use thiserror::Error;

use crate::encoding::{is_code_point_valid, is_overlong};

/// Mask of the value bits of a continuation byte.
pub(crate) const CONT_MASK: u8 = 0b0011_1111u8;
/// Value of the tag bits (tag mask is !CONT_MASK) of a continuation byte.
pub(crate) const TAG_CONT_U8: u8 = 0b1000_0000u8;

/// The UTF-8 encoded byte-order mark, `U+FEFF`.
pub(crate) const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Why a byte range failed to decode as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// The range ends before the sequence announced by the lead byte is
    /// complete. More bytes could make the sequence valid.
    #[error("range ends before the sequence is complete")]
    NotEnoughRoom,

    /// The byte does not match any UTF-8 lead-byte pattern.
    #[error("invalid lead byte")]
    InvalidLead,

    /// A byte inside the sequence is not a continuation byte (`10xxxxxx`).
    #[error("expected a continuation byte")]
    IncompleteSequence,

    /// The code point was encoded with more bytes than its minimal form.
    #[error("overlong encoding")]
    OverlongSequence,

    /// The decoded value is larger than `U+10FFFF`.
    #[error("code point beyond U+10FFFF")]
    InvalidCodePoint,
}

/// An error produced while decoding a byte range as UTF-8.
///
/// `position` is the byte offset of the offending sequence's first byte;
/// everything before it decoded cleanly. On error no input is consumed, so
/// a caller may skip or repair the offending bytes and resume.
///
/// ```
/// use utf8string::{decode_one, DecodeErrorKind};
///
/// // `C0 80` is an overlong encoding of U+0000 and must be rejected.
/// let err = decode_one(b"ab\xC0\x80", 2).unwrap_err();
/// assert_eq!(err.position(), 2);
/// assert_eq!(err.kind(), DecodeErrorKind::OverlongSequence);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid UTF-8 at byte {position}: {kind}")]
pub struct DecodeError {
    position: usize,
    kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(position: usize, kind: DecodeErrorKind) -> DecodeError {
        DecodeError { position, kind }
    }

    /// Byte offset of the first byte of the sequence that failed to decode.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// What went wrong at [`position`](DecodeError::position).
    #[inline]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }
}

/// Returns true for a continuation byte (`10xxxxxx`).
#[inline]
pub(crate) fn is_trail(byte: u8) -> bool {
    byte & !CONT_MASK == TAG_CONT_U8
}

/// Length in bytes of the sequence announced by `lead`, or `None` if `lead`
/// matches no UTF-8 lead-byte pattern.
#[inline]
pub(crate) fn sequence_length(lead: u8) -> Option<usize> {
    if lead < 0x80 {
        Some(1)
    } else if lead >> 5 == 0b110 {
        Some(2)
    } else if lead >> 4 == 0b1110 {
        Some(3)
    } else if lead >> 3 == 0b1_1110 {
        Some(4)
    } else {
        None
    }
}

/// Decodes the code point starting at `pos` within `bytes`.
///
/// On success returns the code point and the position one past the consumed
/// sequence. On failure nothing is consumed; the error identifies the
/// failing position and the reason.
///
/// Overlong encodings and values beyond [`CODE_POINT_MAX`](crate::CODE_POINT_MAX)
/// are rejected. Surrogate values are not; see the crate docs.
pub fn decode_one(bytes: &[u8], pos: usize) -> Result<(u32, usize), DecodeError> {
    let Some(&lead) = bytes.get(pos) else {
        return Err(DecodeError::new(pos, DecodeErrorKind::NotEnoughRoom));
    };
    let len = sequence_length(lead)
        .ok_or_else(|| DecodeError::new(pos, DecodeErrorKind::InvalidLead))?;

    let mut cp = match len {
        1 => u32::from(lead),
        2 => u32::from(lead & 0b0001_1111),
        3 => u32::from(lead & 0b0000_1111),
        _ => u32::from(lead & 0b0000_0111),
    };

    for i in 1..len {
        match bytes.get(pos + i) {
            None => return Err(DecodeError::new(pos, DecodeErrorKind::NotEnoughRoom)),
            Some(&b) if !is_trail(b) => {
                return Err(DecodeError::new(pos, DecodeErrorKind::IncompleteSequence));
            }
            Some(&b) => cp = (cp << 6) | u32::from(b & CONT_MASK),
        }
    }

    if !is_code_point_valid(cp) {
        return Err(DecodeError::new(pos, DecodeErrorKind::InvalidCodePoint));
    }
    if is_overlong(cp, len) {
        return Err(DecodeError::new(pos, DecodeErrorKind::OverlongSequence));
    }

    Ok((cp, pos + len))
}

/// Decodes the code point that ends just before `pos` within `bytes`.
///
/// Scans backward over continuation bytes until a lead byte is found, then
/// decodes forward from there. The two failure modes are kept distinct:
///
/// * `None` — `pos` is the start of the range, or every byte back to the
///   start is a continuation byte (no boundary exists).
/// * `Some(Err(_))` — a lead byte was found but the sequence is malformed.
///
/// A `pos` past the end of the range reports `NotEnoughRoom` at `pos`,
/// mirroring what [`decode_one`] does there.
///
/// On success returns the code point and the byte offset its sequence
/// starts at.
pub fn decode_prev(bytes: &[u8], pos: usize) -> Option<Result<(u32, usize), DecodeError>> {
    if pos > bytes.len() {
        return Some(Err(DecodeError::new(pos, DecodeErrorKind::NotEnoughRoom)));
    }
    if pos == 0 {
        return None;
    }

    let mut start = pos;
    loop {
        start -= 1;
        if !is_trail(bytes[start]) {
            break;
        }
        if start == 0 {
            // ran into the range start without finding a lead byte
            return None;
        }
    }

    Some(match decode_one(bytes, start) {
        Ok((cp, next)) if next == pos => Ok((cp, start)),
        // the sequence ends early: the bytes at [next, pos) are stray
        // continuations with no lead of their own
        Ok((_, next)) => Err(DecodeError::new(next, DecodeErrorKind::InvalidLead)),
        Err(err) => Err(err),
    })
}

/// Walks the whole range and returns the position of the first byte that is
/// not part of a valid sequence, or `None` when the range is fully valid.
pub fn find_invalid(bytes: &[u8]) -> Option<usize> {
    let mut pos = 0;
    while pos < bytes.len() {
        match decode_one(bytes, pos) {
            Ok((_, next)) => pos = next,
            Err(err) => return Some(err.position()),
        }
    }
    None
}

/// Validates the whole range as UTF-8.
pub fn validate(bytes: &[u8]) -> Result<(), DecodeError> {
    let mut pos = 0;
    while pos < bytes.len() {
        let (_, next) = decode_one(bytes, pos)?;
        pos = next;
    }
    Ok(())
}

/// Counts the code points in the valid prefix of `bytes`.
///
/// Counting stops at the first invalid sequence, so on well-formed input
/// this is the code point count of the whole range.
pub fn code_point_count(bytes: &[u8]) -> usize {
    let mut pos = 0;
    let mut count = 0;
    while pos < bytes.len() {
        match decode_one(bytes, pos) {
            Ok((_, next)) => {
                pos = next;
                count += 1;
            }
            Err(_) => break,
        }
    }
    count
}

/// Returns true if the range starts with the UTF-8 byte-order mark.
///
/// Purely a prefix test; callers that want to skip the mark advance past
/// its three bytes themselves.
pub fn starts_with_bom(bytes: &[u8]) -> bool {
    bytes.starts_with(&BOM)
}

#[test]
fn lead_byte_lengths() {
    assert_eq!(sequence_length(b'a'), Some(1));
    assert_eq!(sequence_length(0xC3), Some(2));
    assert_eq!(sequence_length(0xE2), Some(3));
    assert_eq!(sequence_length(0xF0), Some(4));
    // continuation bytes and 5-byte patterns are not leads
    assert_eq!(sequence_length(0x80), None);
    assert_eq!(sequence_length(0xBF), None);
    assert_eq!(sequence_length(0xF8), None);
    assert_eq!(sequence_length(0xFF), None);
}

#[test]
fn decode_does_not_consume_on_error() {
    let bytes = b"ok\xE2\x82"; // truncated 3-byte sequence
    let err = decode_one(bytes, 2).unwrap_err();
    assert_eq!(err.position(), 2);
    assert_eq!(err.kind(), DecodeErrorKind::NotEnoughRoom);
    // the valid prefix is still reachable
    assert_eq!(decode_one(bytes, 0), Ok((u32::from(b'o'), 1)));
}

#[test]
fn decode_prev_splits_boundary_from_error() {
    // boundary: nothing precedes position 0
    assert_eq!(decode_prev(b"abc", 0), None);
    // all-continuation prefix: no boundary exists
    assert_eq!(decode_prev(b"\x80\x80", 2), None);
    // malformed: a lead byte whose sequence runs off the end
    let res = decode_prev(b"a\xC3", 2).expect("found a lead byte");
    assert_eq!(res.unwrap_err().kind(), DecodeErrorKind::NotEnoughRoom);
    // malformed: stray continuations between the lead and the position
    let res = decode_prev(b"a\x80\x80", 3).expect("found a lead byte");
    let err = res.unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::InvalidLead);
    assert_eq!(err.position(), 1);
}

#[test]
fn decode_prev_past_the_end_is_an_error_not_a_panic() {
    let res = decode_prev(b"abc", 4).expect("out of range is not a boundary");
    let err = res.unwrap_err();
    assert_eq!(err.kind(), DecodeErrorKind::NotEnoughRoom);
    assert_eq!(err.position(), 4);
    assert_eq!(decode_prev(b"", 1).unwrap().unwrap_err().position(), 1);
}

#[test]
fn bom_is_a_prefix_test() {
    assert!(starts_with_bom(b"\xEF\xBB\xBFhello"));
    assert!(!starts_with_bom(b"\xEF\xBBhello"));
    assert!(!starts_with_bom(b"hello"));
    assert!(!starts_with_bom(b""));
}
