use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign};

use crate::string::Utf8String;

impl Default for Utf8String {
    fn default() -> Utf8String {
        Utf8String::new()
    }
}

impl From<&str> for Utf8String {
    fn from(s: &str) -> Utf8String {
        Utf8String::from_bytes(s.as_bytes())
    }
}

impl From<&[u8]> for Utf8String {
    fn from(bytes: &[u8]) -> Utf8String {
        Utf8String::from_bytes(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for Utf8String {
    fn from(bytes: &[u8; N]) -> Utf8String {
        Utf8String::from_bytes(bytes)
    }
}

impl From<String> for Utf8String {
    fn from(s: String) -> Utf8String {
        Utf8String::from_bytes(s.as_bytes())
    }
}

impl From<Vec<u8>> for Utf8String {
    fn from(bytes: Vec<u8>) -> Utf8String {
        Utf8String::from_bytes(&bytes)
    }
}

impl From<char> for Utf8String {
    fn from(c: char) -> Utf8String {
        Utf8String::from_bytes(c.encode_utf8(&mut [0u8; 4]).as_bytes())
    }
}

impl AsRef<[u8]> for Utf8String {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Utf8String {
    fn eq(&self, other: &Utf8String) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
impl Eq for Utf8String {}

impl PartialEq<[u8]> for Utf8String {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}
impl PartialEq<Utf8String> for [u8] {
    fn eq(&self, other: &Utf8String) -> bool {
        self == other.as_bytes()
    }
}
impl PartialEq<&[u8]> for Utf8String {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}
impl PartialEq<str> for Utf8String {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
impl PartialEq<Utf8String> for str {
    fn eq(&self, other: &Utf8String) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
impl PartialEq<&str> for Utf8String {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
impl PartialEq<Utf8String> for &str {
    fn eq(&self, other: &Utf8String) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Ord for Utf8String {
    /// Lexicographic over the content bytes, terminator excluded.
    fn cmp(&self, other: &Utf8String) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}
impl PartialOrd for Utf8String {
    fn partial_cmp(&self, other: &Utf8String) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Utf8String {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Display for Utf8String {
    /// Writes the content, substituting `U+FFFD` for malformed sequences.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match String::from_utf8_lossy(self.as_bytes()) {
            Cow::Borrowed(s) => f.write_str(s),
            Cow::Owned(s) => f.write_str(&s),
        }
    }
}

impl fmt::Debug for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Utf8String(b\"")?;
        for &b in self.as_bytes() {
            if b == b'"' || b == b'\\' {
                write!(f, "\\{}", b as char)?;
            } else if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02X}")?;
            }
        }
        write!(f, "\")")
    }
}

/// Panics when the allocator refuses the append; use
/// [`append_str`](Utf8String::append_str) for the fallible form.
impl AddAssign<&str> for Utf8String {
    fn add_assign(&mut self, rhs: &str) {
        if let Err(err) = self.append_str(rhs) {
            panic!("append failed: {err}");
        }
    }
}

/// Panics when the allocator refuses the append; use
/// [`append`](Utf8String::append) for the fallible form.
impl AddAssign<&Utf8String> for Utf8String {
    fn add_assign(&mut self, rhs: &Utf8String) {
        if let Err(err) = self.append(rhs) {
            panic!("append failed: {err}");
        }
    }
}

impl Add<&str> for Utf8String {
    type Output = Utf8String;

    fn add(mut self, rhs: &str) -> Utf8String {
        self += rhs;
        self
    }
}

impl Add<&Utf8String> for Utf8String {
    type Output = Utf8String;

    fn add(mut self, rhs: &Utf8String) -> Utf8String {
        self += rhs;
        self
    }
}

/// Collects `char`s, which are scalar values and therefore always pushable
/// unless they are `U+0000` or the allocator fails; those cases panic, so
/// filter nuls out first when collecting untrusted input.
impl Extend<char> for Utf8String {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for c in iter {
            if let Err(err) = self.push(u32::from(c)) {
                panic!("extend failed: {err}");
            }
        }
    }
}

impl FromIterator<char> for Utf8String {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Utf8String {
        let mut s = Utf8String::new();
        s.extend(iter);
        s
    }
}
