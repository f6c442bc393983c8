use super::*;

/// Finds and loads the schema that governs a document.
pub(crate) struct SchemaStore<'a> {
  config: &'a Config,
  root: Option<&'a Path>,
}

impl<'a> SchemaStore<'a> {
  pub(crate) fn load(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read schema `{}`", path.display()))?;

    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse schema `{}`", path.display()))
  }

  pub(crate) fn new(config: &'a Config, root: Option<&'a Path>) -> Self {
    Self { config, root }
  }

  /// The configured association for the document if one matches, else the
  /// document's own `"$schema"`. Failures are logged and yield `None`.
  pub(crate) fn schema_for(&self, document: &Document) -> Option<Value> {
    let path = document.uri.to_file_path().ok();

    let association = path
      .as_deref()
      .and_then(|path| self.config.association(path));

    let location = match association {
      Some(SchemaAssociation {
        schema: Some(schema),
        ..
      }) => return Some(schema.clone()),
      Some(SchemaAssociation {
        path: Some(schema_path),
        ..
      }) => match (schema_path.is_absolute(), self.root) {
        (false, Some(root)) => root.join(schema_path),
        _ => document.resolve_path(&schema_path.to_string_lossy())?,
      },
      _ => {
        let reference = document.schema_reference()?;

        if reference.contains("://") && !reference.starts_with("file://") {
          log::debug!("not fetching remote schema `{reference}`");
          return None;
        }

        match lsp::Url::parse(&reference)
          .ok()
          .and_then(|url| url.to_file_path().ok())
        {
          Some(path) => path,
          None => document.resolve_path(&reference)?,
        }
      }
    };

    match Self::load(&location) {
      Ok(schema) => Some(schema),
      Err(error) => {
        log::warn!("{error:#}");
        None
      }
    }
  }
}
