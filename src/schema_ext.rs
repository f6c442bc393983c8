use super::*;

/// Bound on `$ref` chains, combinator nesting and array-default wrapping.
pub(crate) const MAX_DEPTH: usize = 5;

const COMBINATORS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

pub(crate) trait SchemaExt {
  /// Every branch of `allOf`, `anyOf` and `oneOf`, in that order.
  fn branches(&self) -> Vec<&Value>;

  fn description(&self) -> Option<&str>;

  /// Resolves `$ref` against `root`, following chains.
  ///
  /// The referenced fragment fills in keys the referencing fragment does not
  /// define, and the `$ref` key itself is dropped. A reference that cannot be
  /// resolved to an object, a cycle, or a chain longer than [`MAX_DEPTH`]
  /// leaves the fragment as it was.
  fn expand_ref(&self, root: &Value) -> Cow<'_, Value>;

  /// `enum` without any structural keywords.
  fn is_bare_enum(&self) -> bool;

  /// Schema of the first `patternProperties` entry whose pattern matches
  /// `key`, in declaration order.
  fn pattern_property(&self, key: &str) -> Option<&Value>;

  fn type_label(&self) -> Option<String>;

  fn type_names(&self) -> Vec<&str>;

  /// The branches of the first of `allOf`, `oneOf`, `anyOf` present.
  fn union_branches(&self) -> &[Value];
}

impl SchemaExt for Value {
  fn branches(&self) -> Vec<&Value> {
    COMBINATORS
      .iter()
      .filter_map(|keyword| self.get(*keyword).and_then(Value::as_array))
      .flatten()
      .collect()
  }

  fn description(&self) -> Option<&str> {
    self.get("description").and_then(Value::as_str)
  }

  fn expand_ref(&self, root: &Value) -> Cow<'_, Value> {
    let mut current = Cow::Borrowed(self);

    let mut seen = HashSet::new();

    for _ in 0..MAX_DEPTH {
      let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
        return current;
      };

      if !seen.insert(reference.to_string()) {
        log::debug!("reference cycle through `{reference}`");
        return Cow::Borrowed(self);
      }

      let Some(Value::Object(target)) = resolve_reference(root, reference)
      else {
        log::debug!("unresolved reference `{reference}`");
        return Cow::Borrowed(self);
      };

      let mut merged = target.clone();

      if let Value::Object(fragment) = &*current {
        for (key, value) in fragment {
          if key != "$ref" {
            merged.insert(key.clone(), value.clone());
          }
        }
      }

      current = Cow::Owned(Value::Object(merged));
    }

    if current.get("$ref").is_some() {
      Cow::Borrowed(self)
    } else {
      current
    }
  }

  fn is_bare_enum(&self) -> bool {
    self.get("enum").is_some()
      && [
        "additionalProperties",
        "items",
        "patternProperties",
        "properties",
      ]
      .iter()
      .all(|keyword| self.get(*keyword).is_none())
  }

  fn pattern_property(&self, key: &str) -> Option<&Value> {
    self
      .get("patternProperties")
      .and_then(Value::as_object)?
      .iter()
      .find(|(pattern, _)| {
        Pattern::new(pattern).is_some_and(|pattern| pattern.is_match(key))
      })
      .map(|(_, schema)| schema)
  }

  fn type_label(&self) -> Option<String> {
    let names = self.type_names();

    (!names.is_empty()).then(|| names.join(","))
  }

  fn type_names(&self) -> Vec<&str> {
    match self.get("type") {
      Some(Value::String(name)) => vec![name.as_str()],
      Some(Value::Array(names)) => {
        names.iter().filter_map(Value::as_str).collect()
      }
      _ => Vec::new(),
    }
  }

  fn union_branches(&self) -> &[Value] {
    ["allOf", "oneOf", "anyOf"]
      .iter()
      .find_map(|keyword| self.get(*keyword).and_then(Value::as_array))
      .map(Vec::as_slice)
      .unwrap_or_default()
  }
}

/// Walks a `#/a/b`-style reference from the root document.
fn resolve_reference<'a>(
  root: &'a Value,
  reference: &str,
) -> Option<&'a Value> {
  let mut current = root;

  for segment in reference.split('/').filter(|segment| !segment.is_empty()) {
    if segment == "#" {
      current = root;
      continue;
    }

    let segment = segment.replace("~1", "/").replace("~0", "~");

    current = match current {
      Value::Object(map) => map.get(&segment)?,
      Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
      _ => return None,
    };
  }

  Some(current)
}
