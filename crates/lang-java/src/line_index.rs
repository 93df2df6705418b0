/// Maps byte offsets of a text to zero-based (line, UTF-16 column) pairs
/// and back.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// `None` when `offset` is past the end or inside a UTF-8 sequence.
    pub fn position(&self, text: &str, offset: usize) -> Option<(usize, usize)> {
        if offset > text.len() || !text.is_char_boundary(offset) {
            return None;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let col = text[start..offset].encode_utf16().count();
        Some((line, col))
    }

    /// Byte offset of a (line, UTF-16 column) pair. Columns past the end of
    /// the line clamp to the line end.
    pub fn offset(&self, text: &str, line: usize, col: usize) -> Option<usize> {
        let start = *self.line_starts.get(line)?;
        let mut units = 0;
        for (i, ch) in text[start..].char_indices() {
            if units >= col || ch == '\n' {
                return Some(start + i);
            }
            units += ch.len_utf16();
        }
        Some(text.len())
    }
}
