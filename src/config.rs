use super::*;

/// Server settings, taken from the client's `initializationOptions`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Config {
  /// Overrides the dialect otherwise derived from the file extension.
  #[serde(default)]
  pub(crate) mode: Option<Mode>,
  #[serde(default)]
  pub(crate) schemas: Vec<SchemaAssociation>,
}

impl Config {
  pub(crate) fn association(&self, path: &Path) -> Option<&SchemaAssociation> {
    self
      .schemas
      .iter()
      .find(|association| association.matches(path))
  }

  pub(crate) fn from_initialization_options(options: Option<Value>) -> Self {
    let Some(options) = options.filter(|options| !options.is_null()) else {
      return Self::default();
    };

    match serde_json::from_value(options) {
      Ok(config) => config,
      Err(error) => {
        log::warn!("failed to parse initialization options: {error}");
        Self::default()
      }
    }
  }
}

/// Ties documents matching any of `file_match` to a schema, given either as
/// a `path` or inline.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaAssociation {
  pub(crate) file_match: Vec<String>,
  #[serde(default)]
  pub(crate) path: Option<PathBuf>,
  #[serde(default)]
  pub(crate) schema: Option<Value>,
}

impl SchemaAssociation {
  /// Globs with a `/` match the trailing components of the full path,
  /// others the file name. `*` never crosses a path separator.
  pub(crate) fn matches(&self, path: &Path) -> bool {
    let full = path.to_string_lossy().replace('\\', "/");

    let file_name = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();

    self.file_match.iter().any(|pattern| {
      let (glob, candidate) = if pattern.contains('/') {
        let trimmed = pattern.trim_start_matches("./").trim_start_matches('/');
        (format!("**/{trimmed}"), full.as_str())
      } else {
        (pattern.clone(), file_name.as_str())
      };

      match GlobBuilder::new(&glob).literal_separator(true).build() {
        Ok(glob) => glob.compile_matcher().is_match(candidate),
        Err(error) => {
          log::warn!("invalid `fileMatch` pattern `{pattern}`: {error}");
          false
        }
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  fn association(patterns: &[&str]) -> SchemaAssociation {
    SchemaAssociation {
      file_match: patterns.iter().map(|pattern| pattern.to_string()).collect(),
      path: None,
      schema: None,
    }
  }

  #[test]
  fn parses_initialization_options() {
    let config = Config::from_initialization_options(Some(json!({
      "mode": "json5",
      "schemas": [
        { "fileMatch": ["*.app.json"], "path": "schemas/app.json" },
        { "fileMatch": ["inline.json"], "schema": { "type": "object" } }
      ]
    })));

    assert_eq!(config.mode, Some(Mode::Json5));

    assert_eq!(
      config.schemas,
      vec![
        SchemaAssociation {
          file_match: vec!["*.app.json".into()],
          path: Some("schemas/app.json".into()),
          schema: None,
        },
        SchemaAssociation {
          file_match: vec!["inline.json".into()],
          path: None,
          schema: Some(json!({ "type": "object" })),
        },
      ]
    );
  }

  #[test]
  fn malformed_options_fall_back_to_defaults() {
    assert_eq!(
      Config::from_initialization_options(Some(json!({ "mode": "yaml" }))),
      Config::default()
    );

    assert_eq!(Config::from_initialization_options(None), Config::default());

    assert_eq!(
      Config::from_initialization_options(Some(Value::Null)),
      Config::default()
    );
  }

  #[test]
  fn file_name_patterns() {
    let association = association(&["*.app.json", "settings.json5"]);

    assert!(association.matches(Path::new("/work/main.app.json")));
    assert!(association.matches(Path::new("/work/settings.json5")));
    assert!(!association.matches(Path::new("/work/app.json")));
    assert!(!association.matches(Path::new("/work/settings.json")));
  }

  #[test]
  fn path_patterns() {
    let association = association(&["/.vscode/*.json"]);

    assert!(association.matches(Path::new("/work/.vscode/settings.json")));
    assert!(!association.matches(Path::new("/work/settings.json")));
  }

  #[test]
  fn glob_syntax() {
    let cases = [
      ("settings.json?", "/p/settings.json5", true),
      ("{a,b}.json", "/p/a.json", true),
      ("[ab].json", "/p/b.json", true),
      ("[ab].json", "/p/c.json", false),
    ];

    for (pattern, path, expected) in cases {
      assert_eq!(
        association(&[pattern]).matches(Path::new(path)),
        expected,
        "{pattern} vs {path}"
      );
    }
  }

  #[test]
  fn star_stays_within_a_directory() {
    let association = association(&[".vscode/*.json"]);

    assert!(association.matches(Path::new("/p/.vscode/x.json")));
    assert!(!association.matches(Path::new("/p/.vscode/x/y.json")));
  }

  #[test]
  fn invalid_globs_never_match() {
    assert!(!association(&["[a.json"]).matches(Path::new("/p/[a.json")));
  }

  #[test]
  fn first_matching_association_wins() {
    let config = Config {
      mode: None,
      schemas: vec![association(&["*.json"]), association(&["a.json"])],
    };

    assert_eq!(
      config.association(Path::new("a.json")),
      Some(&config.schemas[0])
    );

    assert_eq!(config.association(Path::new("a.yaml")), None);
  }
}
