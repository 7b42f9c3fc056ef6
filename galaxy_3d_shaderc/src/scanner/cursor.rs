/// Forward-only cursor over an immutable source view
///
/// All positions are byte offsets into the viewed text. The cursor never
/// moves backwards: `seek` to an earlier offset is a no-op.

pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current offset
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Text from the current offset to the end
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Text between the current offset and `end`
    pub fn slice_to(&self, end: usize) -> &'a str {
        &self.text[self.pos..end.max(self.pos)]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Move to `pos`, clamped to the end of the text
    pub fn seek(&mut self, pos: usize) {
        self.pos = self.pos.max(pos.min(self.text.len()));
    }

    /// Skip one byte
    pub fn bump(&mut self) {
        self.seek(self.pos + 1);
    }

    /// Absolute offset of the next occurrence of `pattern`
    pub fn find(&self, pattern: &str) -> Option<usize> {
        self.rest().find(pattern).map(|offset| self.pos + offset)
    }

    pub fn skip_space(&mut self) {
        let skipped = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.pos += skipped;
    }

    /// Read the next identifier and the whitespace after it
    ///
    /// Returns an empty string when the cursor is not on an identifier.
    pub fn next_word(&mut self) -> &'a str {
        self.skip_space();
        let start = self.pos;
        let len = self
            .rest()
            .bytes()
            .take_while(|&b| is_word_byte(b))
            .count();
        self.pos += len;
        let word = &self.text[start..self.pos];
        self.skip_space();
        word
    }

    /// Move past the next newline (or to the end), then skip blank space
    pub fn skip_line(&mut self) {
        match self.find("\n") {
            Some(eol) => self.seek(eol + 1),
            None => self.seek(self.text.len()),
        }
        self.skip_space();
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_word_skips_surrounding_space() {
        let mut cursor = Cursor::new("  uniform  highp vec4 u_color;");
        assert_eq!(cursor.next_word(), "uniform");
        assert_eq!(cursor.next_word(), "highp");
        assert_eq!(cursor.next_word(), "vec4");
        assert_eq!(cursor.next_word(), "u_color");
        assert_eq!(cursor.peek(), Some(b';'));
    }

    #[test]
    fn test_next_word_on_punctuation_is_empty() {
        let mut cursor = Cursor::new("[4];");
        assert_eq!(cursor.next_word(), "");
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_find_is_absolute() {
        let mut cursor = Cursor::new("a; b;");
        cursor.seek(2);
        assert_eq!(cursor.find(";"), Some(4));
    }

    #[test]
    fn test_seek_never_moves_backwards() {
        let mut cursor = Cursor::new("abcdef");
        cursor.seek(4);
        cursor.seek(1);
        assert_eq!(cursor.pos(), 4);
        cursor.seek(100);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_skip_line_lands_on_next_non_blank_line() {
        let mut cursor = Cursor::new("uniform vec4 a; // trailing\n\n   uniform mat4 b;");
        cursor.skip_line();
        assert!(cursor.rest().starts_with("uniform mat4 b;"));
        cursor.skip_line();
        assert!(cursor.is_empty());
    }
}
