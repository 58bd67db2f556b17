use crate::byte::{is_alphanumeric, is_letter, is_space};
use crate::{CursorError, Location};

/// Byte cursor over an immutable source buffer.
///
/// The text never changes; only the offset moves. The offset always lies in
/// `[0, len]` and `len` means end of input. Every scan is bounded by the
/// buffer length, so malformed input produces an error instead of reading
/// past the end.
///
/// Backtracking is caller-driven: take an offset with [`Cursor::save`] before
/// an optional production and hand it back to [`Cursor::restore`] if the
/// production fails.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// The full input text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether the offset has reached end of input.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Remember the current offset for a later [`Cursor::restore`].
    pub fn save(&self) -> usize {
        self.pos
    }

    /// Move back (or forward) to a previously saved offset.
    ///
    /// Offsets past the end are clamped to end of input.
    pub fn restore(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
    }

    // --- Lookahead and consumption ---

    /// The byte at the current offset, or `0` at end of input.
    pub fn peek(&self) -> u8 {
        self.bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// The full character at the current offset, for diagnostics.
    pub fn peek_char(&self) -> Option<char> {
        self.source.get(self.pos..)?.chars().next()
    }

    /// Consume and return the byte at the current offset.
    pub fn read(&mut self) -> Result<u8, CursorError> {
        match self.bytes().get(self.pos).copied() {
            Some(b) => {
                self.pos += 1;
                Ok(b)
            }
            None => Err(CursorError::UnexpectedEnd {
                at: self.location(self.pos),
            }),
        }
    }

    /// Consume `literal` if the upcoming bytes equal it exactly.
    ///
    /// Nothing is consumed when the match fails.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.bytes()[self.pos..].starts_with(literal.as_bytes()) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Skip a maximal run of whitespace (space, tab, newline, carriage return).
    pub fn skip_whitespace(&mut self) {
        while !self.is_eof() && is_space(self.peek()) {
            self.pos += 1;
        }
    }

    // --- Scanners ---

    /// Scan an identifier: one ASCII letter followed by ASCII letters or digits.
    pub fn scan_identifier(&mut self) -> Result<&'a str, CursorError> {
        if !is_letter(self.peek()) {
            return Err(CursorError::NotAnIdentifier {
                at: self.location(self.pos),
            });
        }

        let start = self.pos;
        self.pos += 1;
        while !self.is_eof() && is_alphanumeric(self.peek()) {
            self.pos += 1;
        }

        Ok(&self.source[start..self.pos])
    }

    /// Scan every byte up to, but not including, the next `stop`.
    ///
    /// Fails with [`CursorError::UnterminatedScan`] if `stop` does not occur
    /// before end of input; the offset is left unchanged in that case.
    /// `stop` must be ASCII.
    pub fn scan_until_byte(&mut self, stop: u8) -> Result<&'a str, CursorError> {
        debug_assert!(stop.is_ascii(), "stop byte must be ASCII");

        let start = self.pos;
        match self.bytes()[start..].iter().position(|&b| b == stop) {
            Some(len) => {
                self.pos = start + len;
                Ok(&self.source[start..self.pos])
            }
            None => Err(CursorError::UnterminatedScan {
                stop: char::from(stop),
                at: self.location(start),
            }),
        }
    }

    /// Scan every byte up to the first member of `stops`, or to end of input.
    ///
    /// End of input counts as an implicit stop, so this never fails and may
    /// return an empty slice. `stops` must be ASCII.
    pub fn scan_until_any(&mut self, stops: &[u8]) -> &'a str {
        debug_assert!(stops.is_ascii(), "stop bytes must be ASCII");

        let start = self.pos;
        let len = self.bytes()[start..]
            .iter()
            .position(|b| stops.contains(b))
            .unwrap_or(self.source.len() - start);
        self.pos = start + len;
        &self.source[start..self.pos]
    }

    // --- Helpers ---

    /// Compute the line and column of a byte offset.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.source.len());
        let before = &self.bytes()[..offset];
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        let column = match before.iter().rposition(|&b| b == b'\n') {
            Some(newline) => offset - newline,
            None => offset + 1,
        };
        Location::new(offset, line, column)
    }

    /// Location of the current offset.
    pub fn here(&self) -> Location {
        self.location(self.pos)
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Lookahead
    // =========================================================================

    #[test]
    fn test_peek_does_not_advance() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), b'a');
        assert_eq!(cursor.peek(), b'a');
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_peek_at_end_is_sentinel() {
        let cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), 0);
    }

    #[test]
    fn test_is_eof_tracks_offset() {
        let mut cursor = Cursor::new("a");
        assert!(!cursor.is_eof());
        cursor.read().unwrap();
        assert!(cursor.is_eof());
        cursor.restore(0);
        assert!(!cursor.is_eof());
    }

    #[test]
    fn test_read_advances() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.read().unwrap(), b'a');
        assert_eq!(cursor.read().unwrap(), b'b');
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_read_past_end_fails() {
        let mut cursor = Cursor::new("a");
        cursor.read().unwrap();
        let err = cursor.read().unwrap_err();
        assert!(matches!(err, CursorError::UnexpectedEnd { at } if at.offset == 1));
        assert_eq!(cursor.pos(), 1);
    }

    // =========================================================================
    // Literals and whitespace
    // =========================================================================

    #[test]
    fn test_match_literal_consumes_on_success() {
        let mut cursor = Cursor::new("</a>");
        assert!(cursor.match_literal("</"));
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn test_match_literal_never_partially_consumes() {
        let mut cursor = Cursor::new("<a>");
        assert!(!cursor.match_literal("</"));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_match_literal_longer_than_input() {
        let mut cursor = Cursor::new("<");
        assert!(!cursor.match_literal("</"));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(" \t\r\n x");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), b'x');
    }

    #[test]
    fn test_skip_whitespace_to_end() {
        let mut cursor = Cursor::new("   ");
        cursor.skip_whitespace();
        assert!(cursor.is_eof());
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    #[test]
    fn test_identifier_letters_and_digits() {
        let mut cursor = Cursor::new("h1 class");
        assert_eq!(cursor.scan_identifier().unwrap(), "h1");
        assert_eq!(cursor.peek(), b' ');
    }

    #[test]
    fn test_identifier_stops_at_punctuation() {
        let mut cursor = Cursor::new("color:red");
        assert_eq!(cursor.scan_identifier().unwrap(), "color");
        assert_eq!(cursor.peek(), b':');
    }

    #[test]
    fn test_identifier_must_start_with_letter() {
        let mut cursor = Cursor::new("1abc");
        let err = cursor.scan_identifier().unwrap_err();
        assert!(matches!(err, CursorError::NotAnIdentifier { .. }));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_identifier_at_end() {
        let mut cursor = Cursor::new("");
        assert!(cursor.scan_identifier().is_err());
    }

    // =========================================================================
    // Bounded scans
    // =========================================================================

    #[test]
    fn test_scan_until_byte() {
        let mut cursor = Cursor::new("0 10px;rest");
        assert_eq!(cursor.scan_until_byte(b';').unwrap(), "0 10px");
        assert_eq!(cursor.peek(), b';');
    }

    #[test]
    fn test_scan_until_byte_empty() {
        let mut cursor = Cursor::new("\"");
        assert_eq!(cursor.scan_until_byte(b'"').unwrap(), "");
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_scan_until_byte_unterminated() {
        let mut cursor = Cursor::new("abc\ndef");
        cursor.read().unwrap();
        let err = cursor.scan_until_byte(b';').unwrap_err();
        assert_eq!(
            err,
            CursorError::UnterminatedScan {
                stop: ';',
                at: Location::new(1, 1, 2),
            }
        );
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn test_scan_until_any() {
        let mut cursor = Cursor::new("hello<b>");
        assert_eq!(cursor.scan_until_any(b"<>"), "hello");
        assert_eq!(cursor.peek(), b'<');
    }

    #[test]
    fn test_scan_until_any_end_is_implicit_stop() {
        let mut cursor = Cursor::new("tail");
        assert_eq!(cursor.scan_until_any(b"<>"), "tail");
        assert!(cursor.is_eof());
        assert_eq!(cursor.scan_until_any(b"<>"), "");
    }

    #[test]
    fn test_scan_keeps_multibyte_text_intact() {
        let mut cursor = Cursor::new("héllo wörld<");
        assert_eq!(cursor.scan_until_any(b"<>"), "héllo wörld");
    }

    // =========================================================================
    // Backtracking and locations
    // =========================================================================

    #[test]
    fn test_save_restore() {
        let mut cursor = Cursor::new("abc");
        let saved = cursor.save();
        cursor.read().unwrap();
        cursor.read().unwrap();
        cursor.restore(saved);
        assert_eq!(cursor.peek(), b'a');
    }

    #[test]
    fn test_restore_is_bounded() {
        let mut cursor = Cursor::new("abc");
        cursor.restore(99);
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_location_lines_and_columns() {
        let cursor = Cursor::new("ab\ncd\nef");
        assert_eq!(cursor.location(0), Location::new(0, 1, 1));
        assert_eq!(cursor.location(1), Location::new(1, 1, 2));
        assert_eq!(cursor.location(3), Location::new(3, 2, 1));
        assert_eq!(cursor.location(7), Location::new(7, 3, 2));
    }

    #[test]
    fn test_error_display_has_position() {
        let mut cursor = Cursor::new("\n  9");
        cursor.skip_whitespace();
        let err = cursor.scan_identifier().unwrap_err();
        assert_eq!(err.to_string(), "Expected identifier at line 2, column 3");
        assert_eq!(err.location().offset, 3);
    }
}
