use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Token<'a> {
  pub(crate) kind: SyntaxKind,
  pub(crate) text: &'a str,
}

/// Splits JSON5 source into tokens.
///
/// Lexing never fails: unterminated strings and comments run to the end of
/// the line (or input), and unknown characters become [`SyntaxKind::Error`]
/// tokens, so the concatenated token texts always equal the input.
pub(crate) struct Lexer<'a> {
  position: usize,
  source: &'a str,
}

impl<'a> Lexer<'a> {
  fn block_comment(&self) -> usize {
    self.source[self.position + 2..]
      .find("*/")
      .map_or(self.source.len(), |end| self.position + 2 + end + 2)
  }

  fn eat_while(&self, start: usize, predicate: impl Fn(char) -> bool) -> usize {
    self.source[start..]
      .char_indices()
      .find(|(_, ch)| !predicate(*ch))
      .map_or(self.source.len(), |(offset, _)| start + offset)
  }

  fn line_comment(&self) -> usize {
    self.eat_while(self.position, |ch| ch != '\n')
  }

  pub(crate) fn new(source: &'a str) -> Self {
    Self {
      position: 0,
      source,
    }
  }

  fn next_token(&mut self) -> Option<Token<'a>> {
    let rest = &self.source[self.position..];

    let ch = rest.chars().next()?;

    let (kind, end) = match ch {
      '{' => (SyntaxKind::LBrace, self.position + 1),
      '}' => (SyntaxKind::RBrace, self.position + 1),
      '[' => (SyntaxKind::LBracket, self.position + 1),
      ']' => (SyntaxKind::RBracket, self.position + 1),
      ':' => (SyntaxKind::Colon, self.position + 1),
      ',' => (SyntaxKind::Comma, self.position + 1),
      '"' | '\'' => (SyntaxKind::String, self.string(ch)),
      '/' if rest.starts_with("//") => {
        (SyntaxKind::Comment, self.line_comment())
      }
      '/' if rest.starts_with("/*") => {
        (SyntaxKind::Comment, self.block_comment())
      }
      ch if ch.is_whitespace() => (
        SyntaxKind::Whitespace,
        self.eat_while(self.position, char::is_whitespace),
      ),
      ch if Self::starts_number(ch, rest) => (
        SyntaxKind::Number,
        self.eat_while(self.position + ch.len_utf8(), |ch| {
          ch.is_ascii_alphanumeric() || matches!(ch, '.' | '+' | '-' | '_')
        }),
      ),
      ch if ch.is_alphabetic() || matches!(ch, '_' | '$') => (
        SyntaxKind::Ident,
        self.eat_while(self.position, |ch| {
          ch.is_alphanumeric() || matches!(ch, '_' | '$')
        }),
      ),
      ch => (SyntaxKind::Error, self.position + ch.len_utf8()),
    };

    let token = Token {
      kind,
      text: &self.source[self.position..end],
    };

    self.position = end;

    Some(token)
  }

  fn starts_number(ch: char, rest: &str) -> bool {
    if ch.is_ascii_digit() {
      return true;
    }

    matches!(ch, '-' | '+' | '.')
      && rest[1..]
        .chars()
        .next()
        .is_some_and(|next| next.is_ascii_digit() || next == '.')
  }

  /// End of a string starting at the current position, stopping before a
  /// newline when the closing quote is missing.
  fn string(&self, quote: char) -> usize {
    let start = self.position + 1;

    let mut escaped = false;

    for (offset, ch) in self.source[start..].char_indices() {
      match ch {
        '\n' if !escaped => return start + offset,
        '\\' if !escaped => escaped = true,
        ch if ch == quote && !escaped => return start + offset + 1,
        _ => escaped = false,
      }
    }

    self.source.len()
  }

  pub(crate) fn tokenize(source: &'a str) -> Vec<Token<'a>> {
    Self::new(source).collect()
  }
}

impl<'a> Iterator for Lexer<'a> {
  type Item = Token<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    self.next_token()
  }
}
