use super::*;

pub(crate) type SyntaxNode = rowan::SyntaxNode<JsonLanguage>;

#[allow(clippy::arbitrary_source_item_ordering)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u16)]
pub(crate) enum SyntaxKind {
  // tokens
  Colon,
  Comma,
  Comment,
  Error,
  Ident,
  LBrace,
  LBracket,
  Number,
  RBrace,
  RBracket,
  String,
  Whitespace,
  // nodes
  Array,
  Object,
  Property,
  PropertyName,
  Root,
  Scalar,
}

impl SyntaxKind {
  const ALL: [SyntaxKind; 18] = [
    Self::Colon,
    Self::Comma,
    Self::Comment,
    Self::Error,
    Self::Ident,
    Self::LBrace,
    Self::LBracket,
    Self::Number,
    Self::RBrace,
    Self::RBracket,
    Self::String,
    Self::Whitespace,
    Self::Array,
    Self::Object,
    Self::Property,
    Self::PropertyName,
    Self::Root,
    Self::Scalar,
  ];

  fn from_raw(raw: u16) -> Self {
    Self::ALL
      .get(usize::from(raw))
      .copied()
      .unwrap_or(Self::Error)
  }

  fn into_node_kind(self) -> NodeKind {
    match self {
      Self::Array => NodeKind::Array,
      Self::Object => NodeKind::Object,
      Self::Property => NodeKind::Property,
      Self::PropertyName => NodeKind::PropertyName,
      Self::Scalar => NodeKind::PrimitiveValue,
      _ => NodeKind::Other,
    }
  }

  pub(crate) fn is_trivia(self) -> bool {
    matches!(self, Self::Comment | Self::Whitespace)
  }

  /// Tokens that may start a value.
  pub(crate) fn is_value_start(self) -> bool {
    matches!(
      self,
      Self::Ident | Self::LBrace | Self::LBracket | Self::Number | Self::String
    )
  }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
  fn from(kind: SyntaxKind) -> Self {
    Self(kind as u16)
  }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum JsonLanguage {}

impl rowan::Language for JsonLanguage {
  type Kind = SyntaxKind;

  fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
    SyntaxKind::from_raw(raw.0)
  }

  fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
    kind.into()
  }
}

impl EditorNode for SyntaxNode {
  fn children_of_kind(&self, kind: NodeKind) -> Vec<Self> {
    self
      .children()
      .filter(|child| child.kind().into_node_kind() == kind)
      .collect()
  }

  fn kind(&self) -> NodeKind {
    rowan::SyntaxNode::kind(self).into_node_kind()
  }

  fn parent(&self) -> Option<Self> {
    rowan::SyntaxNode::parent(self)
  }

  fn span(&self) -> TextRange {
    self.text_range()
  }
}
