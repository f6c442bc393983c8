use super::*;

#[derive(Debug)]
pub(crate) struct Document {
  pub(crate) content: Rope,
  pub(crate) tree: Parse,
  pub(crate) uri: lsp::Url,
  pub(crate) version: i32,
}

#[cfg(test)]
impl From<&str> for Document {
  fn from(value: &str) -> Self {
    Self {
      content: value.into(),
      tree: parse(value),
      uri: lsp::Url::from_file_path(env::temp_dir().join("document.json"))
        .unwrap(),
      version: 1,
    }
  }
}

impl From<lsp::DidOpenTextDocumentParams> for Document {
  fn from(params: lsp::DidOpenTextDocumentParams) -> Self {
    let lsp::TextDocumentItem {
      text, uri, version, ..
    } = params.text_document;

    Self {
      content: Rope::from_str(&text),
      tree: parse(&text),
      uri,
      version,
    }
  }
}

impl Document {
  pub(crate) fn apply_change(
    &mut self,
    params: lsp::DidChangeTextDocumentParams,
  ) {
    let lsp::DidChangeTextDocumentParams {
      content_changes,
      text_document: lsp::VersionedTextDocumentIdentifier { version, .. },
      ..
    } = params;

    self.version = version;

    for change in &content_changes {
      self.content.apply_change(change);
    }

    self.tree = parse(&self.content.to_string());
  }

  pub(crate) fn from_path(path: &Path) -> Result<Self> {
    let text = fs::read_to_string(path)
      .with_context(|| format!("failed to read `{}`", path.display()))?;

    let path = path
      .canonicalize()
      .with_context(|| format!("failed to resolve `{}`", path.display()))?;

    let uri = lsp::Url::from_file_path(&path)
      .map_err(|()| anyhow!("invalid document path `{}`", path.display()))?;

    Ok(Self {
      content: Rope::from_str(&text),
      tree: parse(&text),
      uri,
      version: 0,
    })
  }

  pub(crate) fn mode(&self) -> Mode {
    Mode::from_path(Path::new(self.uri.path()))
  }

  pub(crate) fn resolve_path(&self, path: &str) -> Option<PathBuf> {
    let Ok(mut document_path) = self.uri.to_file_path() else {
      return None;
    };

    let path = Path::new(path);

    if path.is_absolute() {
      return Some(path.to_path_buf());
    }

    document_path.pop();

    Some(document_path.join(path))
  }

  /// The root object's `"$schema"` string, if any.
  pub(crate) fn schema_reference(&self) -> Option<String> {
    let root = self.tree.syntax();

    let object = root
      .value_children()
      .into_iter()
      .find(|node| EditorNode::kind(node) == NodeKind::Object)?;

    object
      .children_of_kind(NodeKind::Property)
      .into_iter()
      .find_map(|property| {
        let name = property
          .children_of_kind(NodeKind::PropertyName)
          .into_iter()
          .next()?;

        if self.word_at(&name, true) != "$schema" {
          return None;
        }

        let value = property.value_children().into_iter().next()?;

        let text = self.slice(value.span());

        let quoted = text.starts_with(['"', '\'']) && text.len() >= 2;

        quoted.then(|| strip_surrounding_quotes(&text).to_string())
      })
  }
}

impl EditorState for Document {
  type Node = SyntaxNode;

  fn node_at_position(&self, offset: TextSize) -> SyntaxNode {
    let root = self.tree.syntax();

    let offset = offset.min(root.text_range().end());

    root
      .token_at_offset(offset)
      .left_biased()
      .and_then(|token| token.parent())
      .unwrap_or(root)
  }

  fn pointer_for_position(&self, offset: TextSize) -> String {
    PointerMap::build(&self.tree.syntax()).pointer_for_position(offset)
  }

  fn slice(&self, range: TextRange) -> String {
    let length = self.content.len_bytes();

    let start = usize::from(range.start()).min(length);
    let end = usize::from(range.end()).clamp(start, length);

    self.content.byte_slice(start..end).to_string()
  }
}
