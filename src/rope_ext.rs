use super::*;

pub(crate) trait RopeExt {
  /// Applies one `textDocument/didChange` content change; a change without a
  /// range replaces the whole text.
  fn apply_change(&mut self, change: &lsp::TextDocumentContentChangeEvent);

  /// Line and UTF-16 column of a byte offset.
  fn byte_to_lsp_position(&self, byte: usize) -> lsp::Position;

  /// Char index of an LSP position, clamped to the end of its line and to
  /// the end of the text.
  fn lsp_position_to_char(&self, position: lsp::Position) -> usize;

  fn lsp_position_to_offset(&self, position: lsp::Position) -> TextSize;

  fn lsp_range(&self, range: TextRange) -> lsp::Range;
}

impl RopeExt for Rope {
  fn apply_change(&mut self, change: &lsp::TextDocumentContentChangeEvent) {
    let (start, end) = match change.range {
      Some(range) => (
        self.lsp_position_to_char(range.start),
        self.lsp_position_to_char(range.end),
      ),
      None => (0, self.len_chars()),
    };

    self.remove(start..end.max(start));

    if !change.text.is_empty() {
      self.insert(start, &change.text);
    }
  }

  fn byte_to_lsp_position(&self, byte: usize) -> lsp::Position {
    let byte = byte.min(self.len_bytes());

    let line = self.byte_to_line(byte);

    let column = self.char_to_utf16_cu(self.byte_to_char(byte))
      - self.char_to_utf16_cu(self.line_to_char(line));

    lsp::Position::new(
      u32::try_from(line).unwrap_or(u32::MAX),
      u32::try_from(column).unwrap_or(u32::MAX),
    )
  }

  fn lsp_position_to_char(&self, position: lsp::Position) -> usize {
    let line = position.line as usize;

    if line >= self.len_lines() {
      return self.len_chars();
    }

    let line_start = self.char_to_utf16_cu(self.line_to_char(line));

    let line_end = self.char_to_utf16_cu(if line + 1 < self.len_lines() {
      self.line_to_char(line + 1)
    } else {
      self.len_chars()
    });

    self.utf16_cu_to_char(
      (line_start + position.character as usize).min(line_end),
    )
  }

  fn lsp_position_to_offset(&self, position: lsp::Position) -> TextSize {
    let byte = self.char_to_byte(self.lsp_position_to_char(position));

    TextSize::try_from(byte).unwrap_or(TextSize::from(u32::MAX))
  }

  fn lsp_range(&self, range: TextRange) -> lsp::Range {
    lsp::Range {
      start: self.byte_to_lsp_position(range.start().into()),
      end: self.byte_to_lsp_position(range.end().into()),
    }
  }
}
