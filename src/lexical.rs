//! Character classes and numeric limits shared by the parser and serializer.

/// Largest integer representable in a field value (15 digits).
pub const MAX_INTEGER: i64 = 999_999_999_999_999;

/// Smallest integer representable in a field value.
pub const MIN_INTEGER: i64 = -MAX_INTEGER;

/// Maximum length of a dictionary or parameter key.
pub const MAX_KEY_LEN: usize = 255;

/// Maximum number of fractional digits the parser accepts in a decimal.
pub const MAX_DECIMAL_FRACTION_DIGITS: usize = 6;

/// Optional whitespace: SP or HTAB.
#[inline]
pub const fn is_ows(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[inline]
pub const fn is_token_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

#[inline]
pub const fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':' | b'%' | b'*' | b'/')
}

#[inline]
pub const fn is_key_start(b: u8) -> bool {
    b.is_ascii_lowercase()
}

#[inline]
pub const fn is_key_char(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'_' | b'-' | b'*')
}

/// Printable ASCII, `0x20..=0x7E`.
#[inline]
pub const fn is_string_char(b: u8) -> bool {
    matches!(b, 0x20..=0x7e)
}

/// Characters that may appear between the `*` delimiters of a byte sequence.
#[inline]
pub const fn is_base64_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

/// Returns `true` if the whole of `s` matches the token character class.
pub fn is_valid_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => is_token_start(first) && rest.iter().all(|&b| is_token_char(b)),
        None => false,
    }
}

/// Returns `true` if the whole of `s` matches the key character class.
pub fn is_valid_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() > MAX_KEY_LEN {
        return false;
    }
    match bytes.split_first() {
        Some((&first, rest)) => is_key_start(first) && rest.iter().all(|&b| is_key_char(b)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_class() {
        assert!(is_valid_token("a"));
        assert!(is_valid_token("Foo/bar:baz%2A*.x_y-z"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("1abc"));
        assert!(!is_valid_token("*abc"));
        assert!(!is_valid_token("a b"));
        assert!(!is_valid_token("a!"));
    }

    #[test]
    fn test_key_class() {
        assert!(is_valid_key("a"));
        assert!(is_valid_key("a1_-*"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("A"));
        assert!(!is_valid_key("_a"));
        assert!(!is_valid_key("aB"));
        assert!(is_valid_key(&"a".repeat(255)));
        assert!(!is_valid_key(&"a".repeat(256)));
    }

    #[test]
    fn test_string_class() {
        assert!(is_string_char(b' '));
        assert!(is_string_char(b'~'));
        assert!(!is_string_char(0x1f));
        assert!(!is_string_char(0x7f));
    }
}
