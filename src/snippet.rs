use super::*;

/// Placeholder the cursor jumps to when nothing better is known.
const EMPTY_PLACEHOLDER: &str = "${}";

/// Renders schema values as insertable snippet text.
///
/// Placeholders are written `${}` or `${text}`; literal `\`, `$` and `}` are
/// escaped with a backslash.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Snippet {
  mode: Mode,
}

impl Snippet {
  /// Escapes characters that would otherwise read as snippet syntax.
  pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
      if matches!(ch, '\\' | '$' | '}') {
        escaped.push('\\');
      }

      escaped.push(ch);
    }

    escaped
  }

  /// A value as a snippet, with placeholders around scalars.
  pub(crate) fn guessed_value(&self, value: &Value, separator: &str) -> String {
    let text = match value {
      Value::Null => "${null}".to_string(),
      Value::Bool(_) | Value::Number(_) => format!("${{{value}}}"),
      Value::String(string) => {
        let quoted = Value::String(string.clone()).to_string();
        self.string(&Self::escape(&self.requote(&quoted)))
      }
      Value::Array(_) | Value::Object(_) => {
        return self.literal(value, separator);
      }
    };

    format!("{text}{separator}")
  }

  /// Whether `key` can stand unquoted as a JSON5 property name.
  fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();

    chars
      .next()
      .is_some_and(|ch| ch.is_alphabetic() || matches!(ch, '_' | '$'))
      && chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '$'))
  }

  fn key(&self, key: &str, raw_word: &str) -> String {
    let quoted = Value::String(key.to_string()).to_string();

    match self.mode {
      Mode::Json => Self::escape(&quoted),
      Mode::Json5 => match raw_word.chars().next() {
        Some('"') => Self::escape(&quoted),
        Some('\'') => Self::escape(&self.requote(&quoted)),
        _ if Self::is_identifier(key) => Self::escape(key),
        _ => Self::escape(&self.requote(&quoted)),
      },
    }
  }

  /// Tab-indented JSON for objects and arrays; empty containers keep a
  /// placeholder between their brackets.
  fn literal(&self, value: &Value, separator: &str) -> String {
    let mut buffer = Vec::new();

    let mut serializer = serde_json::Serializer::with_formatter(
      &mut buffer,
      PrettyFormatter::with_indent(b"\t"),
    );

    let text = match value.serialize(&mut serializer) {
      Ok(()) => String::from_utf8(buffer).unwrap_or_default(),
      Err(error) => {
        log::warn!("failed to render value as snippet: {error}");
        return format!("{EMPTY_PLACEHOLDER}{separator}");
      }
    };

    match text.as_str() {
      "{}" => format!("{{{EMPTY_PLACEHOLDER}}}{separator}"),
      "[]" => format!("[{EMPTY_PLACEHOLDER}]{separator}"),
      _ => Self::escape(&format!("{text}{separator}")),
    }
  }

  pub(crate) fn new(mode: Mode) -> Self {
    Self { mode }
  }

  /// Text inserted for a property key, followed by a value snippet when
  /// `add_value` is set.
  ///
  /// The value guess comes from `default`, a single-member `enum`, `const`,
  /// or a single-member `examples`, in that order. When the schema offers
  /// more than one candidate value in total the guess is dropped in favor of
  /// an empty placeholder; with no candidates the declared (or inferred) type
  /// picks a skeleton.
  pub(crate) fn property(
    &self,
    key: &str,
    add_value: bool,
    raw_word: &str,
    schema: Option<&Value>,
  ) -> String {
    let key = self.key(key, raw_word);

    if !add_value {
      return key;
    }

    let value = schema.map_or_else(
      || EMPTY_PLACEHOLDER.to_string(),
      |schema| self.property_value(schema),
    );

    format!("{key}: {value}")
  }

  fn property_value(&self, schema: &Value) -> String {
    let default = schema.get("default");
    let constant = schema.get("const");

    let enumeration = schema
      .get("enum")
      .and_then(Value::as_array)
      .map_or(&[][..], Vec::as_slice);

    let examples = schema
      .get("examples")
      .and_then(Value::as_array)
      .map_or(&[][..], Vec::as_slice);

    let candidates = usize::from(default.is_some())
      + enumeration.len()
      + usize::from(constant.is_some())
      + examples.len();

    if candidates > 1 {
      return EMPTY_PLACEHOLDER.to_string();
    }

    let guess = default
      .or(enumeration.first())
      .or(constant)
      .or(examples.first());

    if let Some(value) = guess {
      return self.guessed_value(value, "");
    }

    let inferred = if schema.get("properties").is_some() {
      Some("object")
    } else if schema.get("items").is_some() {
      Some("array")
    } else {
      None
    };

    match schema.type_names().first().copied().or(inferred) {
      Some("string") => self.string(""),
      Some("object") => format!("{{{EMPTY_PLACEHOLDER}}}"),
      Some("array") => format!("[{EMPTY_PLACEHOLDER}]"),
      Some("number" | "integer") => "${0}".to_string(),
      Some("null") => "${null}".to_string(),
      _ => EMPTY_PLACEHOLDER.to_string(),
    }
  }

  /// Rewraps a JSON string literal in the mode's quote character.
  fn requote(&self, quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];

    match self.mode.quote() {
      '\'' => format!("'{}'", inner.replace("\\\"", "\"").replace('\'', "\\'")),
      _ => quoted.to_string(),
    }
  }

  /// A string placeholder holding already-escaped `content`.
  fn string(&self, content: &str) -> String {
    let quote = self.mode.quote();

    let content = content
      .strip_prefix(quote)
      .and_then(|content| content.strip_suffix(quote))
      .unwrap_or(content);

    format!("{quote}${{{content}}}{quote}")
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  const JSON: Snippet = Snippet { mode: Mode::Json };

  const JSON5: Snippet = Snippet { mode: Mode::Json5 };

  #[test]
  fn escapes_snippet_syntax() {
    assert_eq!(Snippet::escape(r"a\b$c}d{"), r"a\\b\$c\}d{");
  }

  #[test]
  fn guessed_scalars() {
    assert_eq!(JSON.guessed_value(&json!(null), ""), "${null}");
    assert_eq!(JSON.guessed_value(&json!(42), ","), "${42},");
    assert_eq!(JSON.guessed_value(&json!(1.5), ""), "${1.5}");
    assert_eq!(JSON.guessed_value(&json!(true), ""), "${true}");
  }

  #[test]
  fn guessed_strings() {
    assert_eq!(JSON.guessed_value(&json!("x"), ""), "\"${x}\"");
    assert_eq!(JSON5.guessed_value(&json!("x"), ""), "'${x}'");

    assert_eq!(
      JSON.guessed_value(&json!("say \"hi\""), ""),
      r#""${say \\"hi\\"}""#
    );

    assert_eq!(
      JSON5.guessed_value(&json!("it's \"ok\""), ""),
      r#"'${it\\'s "ok"}'"#
    );

    assert_eq!(
      JSON.guessed_value(&json!("${HOME}\\bin"), ""),
      r#""${\${HOME\}\\\\bin}""#
    );
  }

  #[test]
  fn guessed_containers() {
    assert_eq!(JSON.guessed_value(&json!({}), ""), "{${}}");
    assert_eq!(JSON.guessed_value(&json!([]), ","), "[${}],");

    assert_eq!(
      JSON.guessed_value(&json!({ "a": [1, "}"] }), ","),
      "{\n\t\"a\": [\n\t\t1,\n\t\t\"\\}\"\n\t]\n\\},"
    );
  }

  #[test]
  fn json_keys_are_always_double_quoted() {
    assert_eq!(JSON.property("name", false, "'na", None), "\"name\"");
    assert_eq!(JSON.property("$schema", false, "", None), "\"\\$schema\"");
  }

  #[test]
  fn json5_keys_keep_the_typed_quote() {
    assert_eq!(JSON5.property("name", false, "\"na", None), "\"name\"");
    assert_eq!(JSON5.property("name", false, "'na", None), "'name'");
    assert_eq!(JSON5.property("name", false, "na", None), "name");
  }

  #[test]
  fn json5_keys_that_are_not_identifiers_get_quoted() {
    assert_eq!(JSON5.property("a b", true, "", None), "'a b': ${}");
    assert_eq!(JSON5.property("1st", false, "", None), "'1st'");
    assert_eq!(JSON5.property("x-y", false, "", None), "'x-y'");
    assert_eq!(JSON5.property("", false, "", None), "''");
    assert_eq!(JSON5.property("$id", false, "", None), "\\$id");
    assert_eq!(JSON5.property("_ok2", false, "", None), "_ok2");
  }

  #[test]
  fn property_without_schema_gets_empty_placeholder() {
    assert_eq!(JSON.property("a", true, "", None), "\"a\": ${}");
  }

  #[test]
  fn default_fills_the_placeholder() {
    assert_eq!(
      JSON.property(
        "name",
        true,
        "\"na",
        Some(&json!({ "type": "string", "default": "x" }))
      ),
      "\"name\": \"${x}\""
    );
  }

  #[test]
  fn single_enum_member_fills_the_placeholder() {
    assert_eq!(
      JSON.property("level", true, "", Some(&json!({ "enum": ["high"] }))),
      "\"level\": \"${high}\""
    );
  }

  #[test]
  fn several_candidates_leave_the_placeholder_empty() {
    for schema in [
      json!({ "enum": ["a", "b"] }),
      json!({ "examples": [1, 2], "type": "integer" }),
      json!({ "default": "a", "enum": ["a"] }),
      json!({ "const": 1, "examples": [1] }),
    ] {
      assert_eq!(JSON.property("k", true, "", Some(&schema)), "\"k\": ${}");
    }
  }

  #[test]
  fn const_and_single_example() {
    assert_eq!(
      JSON.property("k", true, "", Some(&json!({ "const": 3 }))),
      "\"k\": ${3}"
    );

    assert_eq!(
      JSON.property("k", true, "", Some(&json!({ "examples": [false] }))),
      "\"k\": ${false}"
    );
  }

  #[test]
  fn type_skeletons() {
    let cases = [
      (json!({ "type": "boolean" }), "${}"),
      (json!({ "type": "string" }), "\"${}\""),
      (json!({ "type": "object" }), "{${}}"),
      (json!({ "type": "array" }), "[${}]"),
      (json!({ "type": "number" }), "${0}"),
      (json!({ "type": "integer" }), "${0}"),
      (json!({ "type": "null" }), "${null}"),
      (json!({ "type": ["array", "null"] }), "[${}]"),
      (json!({ "properties": {} }), "{${}}"),
      (json!({ "items": {} }), "[${}]"),
      (json!({ "type": "unknown" }), "${}"),
      (json!({}), "${}"),
    ];

    for (schema, value) in cases {
      assert_eq!(
        JSON.property("k", true, "", Some(&schema)),
        format!("\"k\": {value}"),
        "{schema}"
      );
    }

    assert_eq!(
      JSON5.property("k", true, "", Some(&json!({ "type": "string" }))),
      "k: '${}'"
    );
  }
}
