use super::*;

/// Syntactic role of a node, as far as completion cares.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NodeKind {
  Array,
  Object,
  Other,
  PrimitiveValue,
  Property,
  PropertyName,
}

/// A handle into the host editor's syntax tree.
pub(crate) trait EditorNode: Clone + PartialEq + Sized {
  fn children_of_kind(&self, kind: NodeKind) -> Vec<Self>;

  fn kind(&self) -> NodeKind;

  fn parent(&self) -> Option<Self>;

  fn span(&self) -> TextRange;

  /// Value children (objects, arrays and primitives) in document order.
  fn value_children(&self) -> Vec<Self> {
    let kinds = [NodeKind::Array, NodeKind::Object, NodeKind::PrimitiveValue];

    let mut children = kinds
      .into_iter()
      .flat_map(|kind| self.children_of_kind(kind))
      .collect::<Vec<Self>>();

    children.sort_by_key(|child| child.span().start());

    children
  }
}

/// What the completion engine needs from the host editor's document state.
pub(crate) trait EditorState {
  type Node: EditorNode;

  /// Innermost node touching `offset`, preferring the one to its left.
  fn node_at_position(&self, offset: TextSize) -> Self::Node;

  /// JSON Pointer of the innermost value covering `offset`.
  fn pointer_for_position(&self, offset: TextSize) -> String;

  fn slice(&self, range: TextRange) -> String;

  fn word_at(&self, node: &Self::Node, strip_quotes: bool) -> String {
    let word = self.slice(node.span());

    if strip_quotes {
      strip_surrounding_quotes(&word).to_string()
    } else {
      word
    }
  }
}

/// Removes one leading and one trailing quote character, if present.
pub(crate) fn strip_surrounding_quotes(text: &str) -> &str {
  let text = text
    .strip_prefix('"')
    .or_else(|| text.strip_prefix('\''))
    .unwrap_or(text);

  text
    .strip_suffix('"')
    .or_else(|| text.strip_suffix('\''))
    .unwrap_or(text)
}
