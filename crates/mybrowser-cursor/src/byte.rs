/// Bytes treated as whitespace by both grammars.
pub const WHITESPACE: &[u8] = b" \t\n\r";

/// ASCII letter.
pub fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// ASCII decimal digit.
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// ASCII letter or digit.
pub fn is_alphanumeric(b: u8) -> bool {
    is_letter(b) || is_digit(b)
}

/// Member of [`WHITESPACE`].
pub fn is_space(b: u8) -> bool {
    WHITESPACE.contains(&b)
}
