use super::*;

/// Which dialect completions are rendered for.
#[derive(
  Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Mode {
  #[default]
  Json,
  Json5,
}

impl Mode {
  pub(crate) fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|extension| extension.to_str()) {
      Some(extension) if extension.eq_ignore_ascii_case("json5") => Self::Json5,
      _ => Self::Json,
    }
  }

  /// Quote used when the engine has to invent a string.
  pub(crate) fn quote(self) -> char {
    match self {
      Self::Json => '"',
      Self::Json5 => '\'',
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  #[test]
  fn from_path() {
    assert_eq!(Mode::from_path(Path::new("a/config.json")), Mode::Json);
    assert_eq!(Mode::from_path(Path::new("config.JSON5")), Mode::Json5);
    assert_eq!(Mode::from_path(Path::new("tsconfig")), Mode::Json);
  }

  #[test]
  fn deserializes_lowercase() {
    assert_eq!(
      serde_json::from_value::<Mode>(json!("json5")).unwrap(),
      Mode::Json5
    );
  }
}
