use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Parse {
  green: GreenNode,
}

impl Parse {
  pub(crate) fn syntax(&self) -> SyntaxNode {
    SyntaxNode::new_root(self.green.clone())
  }
}

/// Parses JSON5 text into a lossless syntax tree.
///
/// The parser is built for documents that are being typed: it never fails,
/// unexpected tokens are kept in place, and a property whose value is still
/// missing after the colon swallows the trailing trivia so that a cursor in
/// the empty value slot lands on the property.
pub(crate) fn parse(text: &str) -> Parse {
  let mut parser = Parser {
    builder: GreenNodeBuilder::new(),
    position: 0,
    tokens: Lexer::tokenize(text),
  };

  parser.root();

  Parse {
    green: parser.builder.finish(),
  }
}

struct Parser<'a> {
  builder: GreenNodeBuilder<'static>,
  position: usize,
  tokens: Vec<Token<'a>>,
}

impl Parser<'_> {
  fn array(&mut self) {
    self.builder.start_node(SyntaxKind::Array.into());

    self.bump();

    loop {
      self.trivia();

      match self.current() {
        None => break,
        Some(SyntaxKind::RBracket) => {
          self.bump();
          break;
        }
        Some(SyntaxKind::RBrace) if self.depth_closes_brace() => break,
        Some(kind) if kind.is_value_start() => self.value(),
        Some(_) => self.bump(),
      }
    }

    self.builder.finish_node();
  }

  fn bump(&mut self) {
    if let Some(token) = self.tokens.get(self.position) {
      self.builder.token(token.kind.into(), token.text);
      self.position += 1;
    }
  }

  fn current(&self) -> Option<SyntaxKind> {
    self.tokens.get(self.position).map(|token| token.kind)
  }

  /// A stray `}` inside an array belongs to an enclosing object when one is
  /// still open.
  fn depth_closes_brace(&self) -> bool {
    let mut depth = 0i32;

    for token in &self.tokens[..self.position] {
      match token.kind {
        SyntaxKind::LBrace => depth += 1,
        SyntaxKind::RBrace => depth -= 1,
        _ => {}
      }
    }

    depth > 0
  }

  fn next_significant(&self) -> Option<SyntaxKind> {
    self.tokens[self.position..]
      .iter()
      .map(|token| token.kind)
      .find(|kind| !kind.is_trivia())
  }

  fn object(&mut self) {
    self.builder.start_node(SyntaxKind::Object.into());

    self.bump();

    loop {
      self.trivia();

      match self.current() {
        None | Some(SyntaxKind::RBracket) => break,
        Some(SyntaxKind::RBrace) => {
          self.bump();
          break;
        }
        Some(
          SyntaxKind::Ident | SyntaxKind::Number | SyntaxKind::String,
        ) => self.property(),
        Some(_) => self.bump(),
      }
    }

    self.builder.finish_node();
  }

  fn property(&mut self) {
    self.builder.start_node(SyntaxKind::Property.into());

    self.builder.start_node(SyntaxKind::PropertyName.into());
    self.bump();
    self.builder.finish_node();

    if self.next_significant() == Some(SyntaxKind::Colon) {
      self.trivia();
      self.bump();

      match self.next_significant() {
        Some(kind) if kind.is_value_start() => {
          self.trivia();
          self.value();
        }
        _ => self.trivia(),
      }
    }

    self.builder.finish_node();
  }

  fn root(&mut self) {
    self.builder.start_node(SyntaxKind::Root.into());

    let mut seen_value = false;

    while let Some(kind) = self.current() {
      if kind.is_value_start() && !seen_value {
        self.value();
        seen_value = true;
      } else {
        self.bump();
      }
    }

    self.builder.finish_node();
  }

  fn trivia(&mut self) {
    while self.current().is_some_and(SyntaxKind::is_trivia) {
      self.bump();
    }
  }

  fn value(&mut self) {
    match self.current() {
      Some(SyntaxKind::LBrace) => self.object(),
      Some(SyntaxKind::LBracket) => self.array(),
      Some(_) => {
        self.builder.start_node(SyntaxKind::Scalar.into());
        self.bump();
        self.builder.finish_node();
      }
      None => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, indoc::indoc, pretty_assertions::assert_eq};

  fn tree(text: &str) -> String {
    let root = parse(text).syntax();

    assert_eq!(root.text().to_string(), text, "parse must be lossless");

    let mut out = String::new();

    for event in root.preorder() {
      if let rowan::WalkEvent::Enter(node) = event {
        let depth = node.ancestors().count() - 1;

        out.push_str(&format!(
          "{}{:?} {:?}\n",
          "  ".repeat(depth),
          node.kind(),
          node.text().to_string()
        ));
      }
    }

    out
  }

  #[test]
  fn object_with_nested_values() {
    assert_eq!(
      tree(r#"{"a": [1, {}], "b": null}"#),
      indoc! {r#"
        Root "{\"a\": [1, {}], \"b\": null}"
          Object "{\"a\": [1, {}], \"b\": null}"
            Property "\"a\": [1, {}]"
              PropertyName "\"a\""
              Array "[1, {}]"
                Scalar "1"
                Object "{}"
            Property "\"b\": null"
              PropertyName "\"b\""
              Scalar "null"
      "#}
    );
  }

  #[test]
  fn unterminated_property_name() {
    assert_eq!(
      tree("{\"na"),
      indoc! {r#"
        Root "{\"na"
          Object "{\"na"
            Property "\"na"
              PropertyName "\"na"
      "#}
    );
  }

  #[test]
  fn missing_value_absorbs_trailing_trivia() {
    assert_eq!(
      tree(r#"{"a": }"#),
      indoc! {r#"
        Root "{\"a\": }"
          Object "{\"a\": }"
            Property "\"a\": "
              PropertyName "\"a\""
      "#}
    );
  }

  #[test]
  fn property_without_colon_leaves_trivia_to_object() {
    assert_eq!(
      tree("{ name }"),
      indoc! {r#"
        Root "{ name }"
          Object "{ name }"
            Property "name"
              PropertyName "name"
      "#}
    );
  }

  #[test]
  fn json5_syntax() {
    assert_eq!(
      tree("{key: 'v', // c\n list: [+1,],}"),
      indoc! {r#"
        Root "{key: 'v', // c\n list: [+1,],}"
          Object "{key: 'v', // c\n list: [+1,],}"
            Property "key: 'v'"
              PropertyName "key"
              Scalar "'v'"
            Property "list: [+1,]"
              PropertyName "list"
              Array "[+1,]"
                Scalar "+1"
      "#}
    );
  }

  #[test]
  fn unclosed_array_inside_object() {
    assert_eq!(
      tree(r#"{"a": ["x", }"#),
      indoc! {r#"
        Root "{\"a\": [\"x\", }"
          Object "{\"a\": [\"x\", }"
            Property "\"a\": [\"x\", "
              PropertyName "\"a\""
              Array "[\"x\", "
                Scalar "\"x\""
      "#}
    );
  }

  #[test]
  fn trailing_garbage_stays_in_root() {
    assert_eq!(
      tree("1 2"),
      indoc! {r#"
        Root "1 2"
          Scalar "1"
      "#}
    );
  }

  #[test]
  fn empty_document() {
    assert_eq!(tree(""), "Root \"\"\n");
  }
}
