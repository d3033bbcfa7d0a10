use crate::*;

const HELLO_WORLD: &str = "Hello, world!";
const HELLO_WORLD_LENGTH: usize = 13;
const BYE_WORLD: &str = "Goodbye, world.";

const HELLO_WORLD_AR: &str = "مرحباً بالعالم!";
const HELLO_WORLD_AR_LENGTH: usize = 28;
const HELLO_WORLD_AR_COUNT: usize = 15;
const BYE_WORLD_AR: &str = "وداعاً أيها العالم.";
const BYE_WORLD_AR_LENGTH: usize = 35;
const BYE_WORLD_AR_COUNT: usize = 19;

const HELLO_WORLD_LONG_AR: &str =
    "مرحباً بالعالم!, مرحباً بالعالم!, مرحباً بالعالم!, مرحباً بالعالم!, مرحباً بالعالم!, مرحباً بالعالم!.";
const HELLO_WORLD_LONG_AR_LENGTH: usize = 179;
const HELLO_WORLD_LONG_AR_COUNT: usize = 101;

mod construction {
    use super::*;

    #[test]
    fn ascii_content() {
        let string = Utf8String::from(HELLO_WORLD);
        assert_eq!(string.size(), HELLO_WORLD_LENGTH);
        assert_eq!(string.count(), HELLO_WORLD_LENGTH);
        assert!(!string.is_empty());
        assert_eq!(string, HELLO_WORLD);
        assert_ne!(string, BYE_WORLD);
        assert_eq!(string, Utf8String::from(HELLO_WORLD));
        assert_ne!(string, Utf8String::from(BYE_WORLD));
    }

    #[test]
    fn multibyte_content() {
        let string = Utf8String::from(HELLO_WORLD_AR);
        assert_eq!(string.size(), HELLO_WORLD_AR_LENGTH);
        assert_eq!(string.count(), HELLO_WORLD_AR_COUNT);
        assert_eq!(string, HELLO_WORLD_AR);
        assert_ne!(string, BYE_WORLD_AR);

        let bye = Utf8String::from(BYE_WORLD_AR);
        assert_eq!(bye.size(), BYE_WORLD_AR_LENGTH);
        assert_eq!(bye.count(), BYE_WORLD_AR_COUNT);
    }

    #[test]
    fn empty_string() {
        let string = Utf8String::new();
        assert_eq!(string.size(), 0);
        assert_eq!(string.count(), 0);
        assert!(string.is_empty());
        assert_eq!(string.as_bytes(), b"");
        assert_eq!(string.as_bytes_with_nul(), b"\0");
        assert_eq!(string.capacity(), Utf8String::SSO_CAPACITY - 1);
    }

    #[test]
    fn short_strings_share_the_minimum_allocation() {
        let string = Utf8String::from(HELLO_WORLD);
        assert_eq!(string.capacity(), Utf8String::SSO_CAPACITY - 1);

        let long = Utf8String::from(HELLO_WORLD_LONG_AR);
        assert!(long.capacity() >= HELLO_WORLD_LONG_AR_LENGTH);
    }

    #[test]
    fn terminator_is_always_present() {
        for content in ["", "a", HELLO_WORLD, HELLO_WORLD_AR] {
            let string = Utf8String::from(content);
            let raw = string.as_bytes_with_nul();
            assert_eq!(raw.len(), string.size() + 1);
            assert_eq!(*raw.last().unwrap(), 0);
        }
    }
}

mod push_pop {
    use super::*;

    #[test]
    fn push_ascii_then_multibyte() {
        let mut string = Utf8String::new();
        string.push(u32::from('h')).unwrap();
        assert_eq!(string.size(), 1);
        assert_eq!(string.count(), 1);

        // ARABIC LETTER MEEM is two bytes but one code point
        string.push(0x645).unwrap();
        assert_eq!(string.size(), 3);
        assert_eq!(string.count(), 2);
        assert_eq!(string.as_bytes(), b"h\xD9\x85");
        assert_eq!(*string.as_bytes_with_nul().last().unwrap(), 0);
    }

    #[test]
    fn pop_returns_the_last_code_point() {
        let mut string = Utf8String::from(HELLO_WORLD);
        assert_eq!(string.pop(), Some(u32::from('!')));
        assert_eq!(string, "Hello, world");
        assert_eq!(string.size(), HELLO_WORLD_LENGTH - 1);
    }

    #[test]
    fn pop_multibyte_removes_the_whole_sequence() {
        let mut string = Utf8String::from("ab\u{645}");
        assert_eq!(string.pop(), Some(0x645));
        assert_eq!(string, "ab");
        assert_eq!(string.pop(), Some(u32::from('b')));
        assert_eq!(string.pop(), Some(u32::from('a')));
        assert_eq!(string.pop(), None);
        assert!(string.is_empty());
    }

    #[test]
    fn pop_everything_from_multibyte_content() {
        let mut string = Utf8String::from(HELLO_WORLD_AR);
        let mut popped = 0;
        while string.pop().is_some() {
            popped += 1;
        }
        assert_eq!(popped, HELLO_WORLD_AR_COUNT);
        assert!(string.is_empty());
        assert_eq!(string.as_bytes_with_nul(), b"\0");
    }
}

mod growth {
    use super::*;

    #[test]
    fn append_grows_past_the_minimum_allocation() {
        let mut string = Utf8String::from(HELLO_WORLD);
        let initial = string.capacity();
        string.append_str(HELLO_WORLD).unwrap();
        string.append_str(HELLO_WORLD).unwrap();
        assert_eq!(string.size(), 3 * HELLO_WORLD_LENGTH);
        assert!(string.capacity() > initial);
        assert_eq!(*string.as_bytes_with_nul().last().unwrap(), 0);
    }

    #[test]
    fn concatenation_matches_the_reference() {
        let mut string = Utf8String::new();
        for _ in 0..5 {
            string.append_str(HELLO_WORLD_AR).unwrap();
            string.append_str(", ").unwrap();
        }
        string.append_str(HELLO_WORLD_AR).unwrap();
        string.append_str(".").unwrap();
        assert_eq!(string, HELLO_WORLD_LONG_AR);
        assert_eq!(string.size(), HELLO_WORLD_LONG_AR_LENGTH);
        assert_eq!(string.count(), HELLO_WORLD_LONG_AR_COUNT);
    }

    #[test]
    fn clear_retains_capacity() {
        let mut string = Utf8String::from(HELLO_WORLD_LONG_AR);
        let cap = string.capacity();
        string.clear();
        assert!(string.is_empty());
        assert_eq!(string.capacity(), cap);
        string.append_str(HELLO_WORLD).unwrap();
        assert_eq!(string, HELLO_WORLD);
    }
}

mod indexing {
    use super::*;

    #[test]
    fn at_walks_code_points() {
        let string = Utf8String::from(HELLO_WORLD_AR);
        let expected: Vec<u32> = HELLO_WORLD_AR.chars().map(u32::from).collect();
        for (i, &cp) in expected.iter().enumerate() {
            assert_eq!(string.at(i), Some(cp));
        }
        assert_eq!(string.at(HELLO_WORLD_AR_COUNT), None);
    }

    #[test]
    fn octet_at_walks_bytes() {
        let string = Utf8String::from(HELLO_WORLD);
        assert_eq!(string.octet_at(0), Some(b'H'));
        assert_eq!(string.octet_at(12), Some(b'!'));
        // the terminator is not addressable
        assert_eq!(string.octet_at(13), None);
    }
}

mod iteration {
    use super::*;

    #[test]
    fn forward_matches_chars() {
        let string = Utf8String::from(HELLO_WORLD_LONG_AR);
        let ours: Vec<u32> = string.code_points().collect();
        let reference: Vec<u32> = HELLO_WORLD_LONG_AR.chars().map(u32::from).collect();
        assert_eq!(ours, reference);
        assert_eq!(ours.len(), HELLO_WORLD_LONG_AR_COUNT);
    }

    #[test]
    fn reverse_matches_reversed_chars() {
        let string = Utf8String::from(HELLO_WORLD_LONG_AR);
        let ours: Vec<u32> = string.code_points_rev().collect();
        let reference: Vec<u32> = HELLO_WORLD_LONG_AR.chars().rev().map(u32::from).collect();
        assert_eq!(ours, reference);
    }

    #[test]
    fn forward_and_reverse_meet() {
        let string = Utf8String::from(HELLO_WORLD_AR);
        let forward: Vec<u32> = string.code_points().collect();
        let mut backward: Vec<u32> = string.code_points_rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn reverse_iterator_ordering_is_by_progress() {
        let string = Utf8String::from(HELLO_WORLD_LONG_AR);
        let begin = string.code_points_rev();
        let mut it = begin;
        assert!(it.next().is_some());
        assert!(begin < it);
        assert!(it > begin);
        assert!(begin <= begin);
        assert!(it >= begin);
        assert_ne!(begin, it);

        let mut end = begin;
        while end.next().is_some() {}
        assert!(end.is_at_end());
        assert!(begin < end);
        assert!(it < end);
    }

    #[test]
    fn forward_iterator_relational_operators() {
        let string = Utf8String::from(HELLO_WORLD);
        let begin = string.code_points();
        let mut it = begin;
        it.next();
        assert!(begin < it);
        assert!(it <= it);
        assert_eq!(it.byte_offset(), 1);
    }
}

mod find {
    use super::*;

    #[test]
    fn match_at_the_beginning() {
        let string = Utf8String::from(HELLO_WORLD);
        let it = string.find("Hello");
        assert_eq!(it.byte_offset(), 0);
        assert_eq!(it, string.code_points());
    }

    #[test]
    fn match_in_the_middle() {
        let string = Utf8String::from(HELLO_WORLD);
        let mut it = string.find("llo, wor");
        assert_eq!(it.byte_offset(), 2);
        for expected in ['l', 'l', 'o', ',', ' ', 'w', 'o', 'r'] {
            assert_eq!(it.next(), Some(u32::from(expected)));
        }
    }

    #[test]
    fn match_at_the_end() {
        let string = Utf8String::from(HELLO_WORLD);
        let mut it = string.find("orld!");
        assert_eq!(it.byte_offset(), HELLO_WORLD_LENGTH - 5);
        let tail: Vec<u32> = it.by_ref().collect();
        assert_eq!(tail, "orld!".chars().map(u32::from).collect::<Vec<u32>>());
        assert!(it.is_at_end());
    }

    #[test]
    fn no_match_yields_the_end() {
        let string = Utf8String::from(HELLO_WORLD);
        let it = string.find("ld.");
        assert!(it.is_at_end());
        assert_eq!(it.byte_offset(), string.size());
    }

    #[test]
    fn empty_needle_yields_the_end() {
        let string = Utf8String::from(HELLO_WORLD);
        assert!(string.find("").is_at_end());
        assert!(Utf8String::new().find("").is_at_end());
    }

    #[test]
    fn multibyte_needle() {
        let string = Utf8String::from(HELLO_WORLD_AR);
        let needle = "بالعالم";
        let it = string.find(needle);
        assert_eq!(it.byte_offset(), HELLO_WORLD_AR.find(needle).unwrap());
        assert!(!it.is_at_end());
    }
}

mod decode_errors {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::bare_continuation(b"\x80", DecodeErrorKind::InvalidLead)]
    #[case::five_byte_pattern(b"\xF8\x80\x80\x80\x80", DecodeErrorKind::InvalidLead)]
    #[case::truncated_two_byte(b"\xC3", DecodeErrorKind::NotEnoughRoom)]
    #[case::truncated_four_byte(b"\xF0\x9F\x98", DecodeErrorKind::NotEnoughRoom)]
    #[case::broken_continuation(b"\xE2\x82a", DecodeErrorKind::IncompleteSequence)]
    #[case::overlong_nul(b"\xC0\x80", DecodeErrorKind::OverlongSequence)]
    #[case::overlong_ascii(b"\xE0\x81\x81", DecodeErrorKind::OverlongSequence)]
    #[case::beyond_max(b"\xF4\x90\x80\x80", DecodeErrorKind::InvalidCodePoint)]
    fn rejected(#[case] bytes: &[u8], #[case] kind: DecodeErrorKind) {
        let err = decode_one(bytes, 0).unwrap_err();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.position(), 0);
        assert_eq!(find_invalid(bytes), Some(0));
        assert!(validate(bytes).is_err());
    }

    #[test]
    fn error_position_is_the_sequence_start() {
        let bytes = b"ab\xE2\x82";
        let err = validate(bytes).unwrap_err();
        assert_eq!(err.position(), 2);
        assert_eq!(err.kind(), DecodeErrorKind::NotEnoughRoom);
        assert_eq!(find_invalid(bytes), Some(2));
    }

    #[test]
    fn surrogates_pass() {
        // CESU-8 style surrogate halves are not rejected
        assert!(validate(b"\xED\xA0\xBD").is_ok());
        assert_eq!(decode_one(b"\xED\xA0\xBD", 0), Ok((0xD83D, 3)));
    }

    #[test]
    fn valid_input_validates() {
        assert!(validate(HELLO_WORLD_LONG_AR.as_bytes()).is_ok());
        assert_eq!(find_invalid(HELLO_WORLD_AR.as_bytes()), None);
        assert_eq!(
            code_point_count(HELLO_WORLD_AR.as_bytes()),
            HELLO_WORLD_AR_COUNT
        );
    }

    #[test]
    fn count_stops_at_the_first_bad_sequence() {
        assert_eq!(code_point_count(b"ab\xFFcd"), 2);
    }

    #[test]
    fn bom_detection() {
        assert!(starts_with_bom(b"\xEF\xBB\xBFcontent"));
        assert!(!starts_with_bom(HELLO_WORLD.as_bytes()));
    }
}

mod properties {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[quickcheck]
    fn encode_decode_round_trip(c: char) -> bool {
        let mut buf = [0u8; 4];
        let len = encode_one(u32::from(c), &mut buf).unwrap();
        decode_one(&buf[..len], 0) == Ok((u32::from(c), len))
    }

    #[quickcheck]
    fn count_matches_chars(s: String) -> bool {
        let string = Utf8String::from(s.as_str());
        string.count() == s.chars().count()
            && string.count() == string.code_points().count()
    }

    #[quickcheck]
    fn push_then_pop_is_identity(s: String, c: char) -> bool {
        if c == '\0' {
            return true;
        }
        let mut string = Utf8String::from(s.as_str());
        string.push(u32::from(c)).unwrap();
        string.pop() == Some(u32::from(c)) && string == s.as_str()
    }

    #[quickcheck]
    fn reverse_is_forward_reversed(s: String) -> bool {
        let string = Utf8String::from(s.as_str());
        let mut forward: Vec<u32> = string.code_points().collect();
        forward.reverse();
        forward == string.code_points_rev().collect::<Vec<u32>>()
    }

    #[quickcheck]
    fn find_agrees_with_str(haystack: String, needle: String) -> bool {
        let string = Utf8String::from(haystack.as_str());
        let it = string.find(needle.as_str());
        match haystack.find(&needle) {
            Some(pos) if !needle.is_empty() => it.byte_offset() == pos,
            _ => it.is_at_end(),
        }
    }

    #[quickcheck]
    fn size_is_the_sum_of_encoded_lengths(s: String) -> bool {
        let string = Utf8String::from(s.as_str());
        let re_encoded: usize = string.code_points().map(encoded_len).sum();
        re_encoded == string.size()
    }

    #[quickcheck]
    fn append_empty_is_identity(s: String) -> bool {
        let mut string = Utf8String::from(s.as_str());
        string.append_str("").unwrap();
        string.append(&Utf8String::new()).unwrap();
        string == s.as_str()
    }

    #[quickcheck]
    fn validate_accepts_all_rust_strings(s: String) -> bool {
        validate(s.as_bytes()).is_ok()
    }
}
