use crate::decoding::{CONT_MASK, TAG_CONT_U8};
use crate::CODE_POINT_MAX;

/// Returns true if `cp` is at most [`CODE_POINT_MAX`](crate::CODE_POINT_MAX).
///
/// Surrogate values pass this test; only the scalar-value ceiling is
/// enforced. See the crate docs on strictness.
#[inline]
#[must_use]
pub fn is_code_point_valid(cp: u32) -> bool {
    cp <= CODE_POINT_MAX
}

/// Number of bytes the minimal UTF-8 encoding of `cp` occupies.
///
/// Returns 4 for values beyond `U+10FFFF` as well; pair with
/// [`is_code_point_valid`] when the input is untrusted.
#[inline]
#[must_use]
pub fn encoded_len(cp: u32) -> usize {
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else if cp < 0x1_0000 {
        3
    } else {
        4
    }
}

/// Returns true if `cp` was encoded with more bytes than its minimal form
/// requires.
#[inline]
pub(crate) fn is_overlong(cp: u32, len: usize) -> bool {
    len > encoded_len(cp)
}

/// Encodes `cp` into `buf` and returns the number of bytes written, or
/// `None` if `cp` is beyond `U+10FFFF`.
///
/// ```
/// use utf8string::encode_one;
///
/// let mut buf = [0u8; 4];
/// assert_eq!(encode_one(0x645, &mut buf), Some(2)); // ARABIC LETTER MEEM
/// assert_eq!(&buf[..2], b"\xD9\x85");
/// assert_eq!(encode_one(0x11_0000, &mut buf), None);
/// ```
pub fn encode_one(cp: u32, buf: &mut [u8; 4]) -> Option<usize> {
    if !is_code_point_valid(cp) {
        return None;
    }
    let len = encoded_len(cp);
    match len {
        1 => {
            buf[0] = cp as u8;
        }
        2 => {
            buf[0] = (cp >> 6) as u8 | 0b1100_0000;
            buf[1] = (cp as u8 & CONT_MASK) | TAG_CONT_U8;
        }
        3 => {
            buf[0] = (cp >> 12) as u8 | 0b1110_0000;
            buf[1] = ((cp >> 6) as u8 & CONT_MASK) | TAG_CONT_U8;
            buf[2] = (cp as u8 & CONT_MASK) | TAG_CONT_U8;
        }
        _ => {
            buf[0] = (cp >> 18) as u8 | 0b1111_0000;
            buf[1] = ((cp >> 12) as u8 & CONT_MASK) | TAG_CONT_U8;
            buf[2] = ((cp >> 6) as u8 & CONT_MASK) | TAG_CONT_U8;
            buf[3] = (cp as u8 & CONT_MASK) | TAG_CONT_U8;
        }
    }
    Some(len)
}

#[test]
fn encoded_len_boundaries() {
    assert_eq!(encoded_len(0x7F), 1);
    assert_eq!(encoded_len(0x80), 2);
    assert_eq!(encoded_len(0x7FF), 2);
    assert_eq!(encoded_len(0x800), 3);
    assert_eq!(encoded_len(0xFFFF), 3);
    assert_eq!(encoded_len(0x1_0000), 4);
    assert_eq!(encoded_len(0x10_FFFF), 4);
}

#[test]
fn encode_matches_char_encode_utf8() {
    let mut buf = [0u8; 4];
    for &c in &['a', '\u{7F}', '\u{80}', '\u{645}', '\u{7FF}', '\u{800}', '\u{FFFD}', '\u{1F600}', '\u{10FFFF}'] {
        let len = encode_one(c as u32, &mut buf).unwrap();
        assert_eq!(&buf[..len], c.encode_utf8(&mut [0u8; 4]).as_bytes());
    }
}

#[test]
fn encode_rejects_out_of_range() {
    let mut buf = [0u8; 4];
    assert_eq!(encode_one(CODE_POINT_MAX + 1, &mut buf), None);
    assert_eq!(encode_one(u32::MAX, &mut buf), None);
}
