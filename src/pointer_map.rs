use super::*;

/// Text ranges of every value in a document, keyed by JSON Pointer.
#[derive(Debug, Default)]
pub(crate) struct PointerMap {
  ranges: HashMap<String, TextRange>,
}

impl PointerMap {
  pub(crate) fn build(root: &SyntaxNode) -> Self {
    let mut map = Self::default();

    map.ranges.insert(String::new(), root.text_range());

    if let Some(value) = root.value_children().first() {
      map.populate(value, String::new(), None);
    }

    map
  }

  fn node_range(
    node: Option<&SyntaxNode>,
    key: Option<&SyntaxNode>,
  ) -> TextRange {
    match (node, key) {
      (Some(node), Some(key)) => node.text_range().cover(key.text_range()),
      (Some(node), None) => node.text_range(),
      (None, Some(key)) => key.text_range(),
      (None, None) => TextRange::empty(TextSize::from(0)),
    }
  }

  pub(crate) fn pointer_for_position(&self, offset: TextSize) -> String {
    self
      .ranges
      .iter()
      .filter(|(_, range)| range.contains_inclusive(offset))
      .min_by_key(|(_, range)| (range.len(), Reverse(range.start())))
      .map(|(pointer, _)| pointer.clone())
      .unwrap_or_default()
  }

  fn populate(
    &mut self,
    node: &SyntaxNode,
    pointer: String,
    key: Option<&SyntaxNode>,
  ) {
    self
      .ranges
      .insert(pointer.clone(), Self::node_range(Some(node), key));

    match node.kind() {
      SyntaxKind::Object => {
        for property in node.children_of_kind(NodeKind::Property) {
          let Some(name) =
            property.children_of_kind(NodeKind::PropertyName).pop()
          else {
            continue;
          };

          let entry = pointer
            .join_segment(strip_surrounding_quotes(&name.text().to_string()));

          match property.value_children().first() {
            Some(value) => self.populate(value, entry, Some(&name)),
            None => {
              self.ranges.insert(entry, Self::node_range(None, Some(&name)));
            }
          }
        }
      }
      SyntaxKind::Array => {
        for (index, value) in node.value_children().iter().enumerate() {
          self.populate(value, pointer.join_segment(&index.to_string()), None);
        }
      }
      _ => {}
    }
  }

  #[cfg(test)]
  pub(crate) fn range_for_pointer(&self, pointer: &str) -> Option<TextRange> {
    self.ranges.get(pointer).copied()
  }
}
