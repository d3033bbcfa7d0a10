#![warn(missing_docs)]
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A validating UTF-8 string type: a growable, nul-terminated byte buffer
//! paired with a strict decoder/encoder for Unicode code points.
//!
//! The crate is built for embedders that want a drop-in string type with
//! correctness guarantees stronger than a raw byte buffer — malformed
//! sequences are never silently accepted by the codec — without pulling in
//! a full internationalization stack.
//!
//! ```
//! use utf8string::Utf8String;
//!
//! let mut s = Utf8String::from("Hello, world");
//! s.push('!' as u32).unwrap();
//!
//! assert_eq!(s.size(), 13);   // bytes, excluding the terminator
//! assert_eq!(s.count(), 13);  // decoded code points
//! assert_eq!(s, "Hello, world!");
//!
//! // The storage is always nul-terminated for byte-oriented interop.
//! assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
//!
//! // Code point iteration, forward and reverse.
//! let forward: Vec<u32> = s.code_points().collect();
//! let mut backward: Vec<u32> = s.code_points_rev().collect();
//! backward.reverse();
//! assert_eq!(forward, backward);
//!
//! assert_eq!(s.pop(), Some('!' as u32));
//! assert_eq!(s, "Hello, world");
//! ```
//!
//! ### Strictness
//!
//! Decoding rejects overlong encodings, truncated sequences, stray
//! continuation bytes, unrecognized lead bytes, and values beyond
//! U+10FFFF, each with a distinct [`DecodeErrorKind`]. Decoding a bad
//! sequence is an expected, recoverable outcome — the codec never panics
//! on malformed input. Surrogate code points (U+D800..=U+DFFF) are *not*
//! rejected; the codec round-trips every value up to [`CODE_POINT_MAX`],
//! faithful to byte-oriented interop uses.
//!
//! ### Ownership model
//!
//! [`Utf8String`] is a single-owner value type. Iterators borrow the
//! string, so any mutation while an iterator is live is a compile error
//! rather than a dangling read.

mod buffer;
mod decoding;
mod encoding;
mod iter;
mod string;
mod string_impls;

#[cfg(test)]
mod tests;

pub use crate::buffer::CapacityError;
pub use crate::decoding::{
    code_point_count, decode_one, decode_prev, find_invalid, starts_with_bom, validate,
    DecodeError, DecodeErrorKind,
};
pub use crate::encoding::{encode_one, encoded_len, is_code_point_valid};
pub use crate::iter::{CodePoints, CodePointsRev};
pub use crate::string::{PushError, Utf8String};

/// The largest valid Unicode code point, `U+10FFFF`.
pub const CODE_POINT_MAX: u32 = 0x0010_FFFF;
