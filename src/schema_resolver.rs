use super::*;

#[derive(Debug, PartialEq)]
enum Lookup {
  Found(Value),
  UnknownProperty,
  Unresolved,
}

/// Maps JSON Pointers into a document to the schema fragments that describe
/// the value at that pointer.
pub(crate) struct SchemaResolver<'a> {
  root: &'a Value,
}

impl<'a> SchemaResolver<'a> {
  fn descend(&self, fragment: &Value, segment: &str, depth: usize) -> Lookup {
    let fragment = fragment.expand_ref(self.root);

    if let Some(schema) = fragment
      .get("properties")
      .and_then(|properties| properties.get(segment))
    {
      return Lookup::Found(schema.clone());
    }

    if let Some(schema) = fragment.pattern_property(segment) {
      return Lookup::Found(schema.clone());
    }

    if let (Ok(index), Some(items)) =
      (segment.parse::<usize>(), fragment.get("items"))
    {
      let schema = match items {
        Value::Array(tuple) => tuple
          .get(index)
          .or_else(|| {
            fragment.get("additionalItems").filter(|schema| schema.is_object())
          }),
        schema => Some(schema),
      };

      if let Some(schema) = schema {
        return Lookup::Found(schema.clone());
      }
    }

    match fragment.get("additionalProperties") {
      Some(schema @ Value::Object(_)) => return Lookup::Found(schema.clone()),
      Some(Value::Bool(false)) => return Lookup::UnknownProperty,
      _ => {}
    }

    if depth < MAX_DEPTH {
      for branch in fragment.union_branches() {
        if let found @ Lookup::Found(_) =
          self.descend(branch, segment, depth + 1)
        {
          return found;
        }
      }
    }

    Lookup::Unresolved
  }

  fn lookup(&self, pointer: &str) -> Lookup {
    let mut current = self.root.expand_ref(self.root).into_owned();

    for segment in pointer.segments() {
      current = match self.descend(&current, &segment, 0) {
        Lookup::Found(schema) => schema,
        failure => return failure,
      };
    }

    Lookup::Found(current)
  }

  pub(crate) fn new(root: &'a Value) -> Self {
    Self { root }
  }

  /// Fragments describing the value at `pointer`, the resolved fragment
  /// first, followed by its expanded union branches.
  ///
  /// A pointer that does not resolve to anything useful is retried once at
  /// its parent.
  pub(crate) fn resolve(&self, pointer: &str) -> Vec<Value> {
    if pointer.is_empty() || pointer == "/" {
      return vec![self.root.expand_ref(self.root).into_owned()];
    }

    let resolved = match self.lookup(pointer) {
      Lookup::Found(schema) if Self::usable(&schema) => Lookup::Found(schema),
      failure => {
        log::debug!("no usable schema at `{pointer}` ({failure:?}), retrying");
        self.lookup(&pointer.parent_pointer())
      }
    };

    let Lookup::Found(schema) = resolved else {
      log::debug!("no schema at `{pointer}`");
      return Vec::new();
    };

    let schema = schema.expand_ref(self.root).into_owned();

    let branches = schema
      .union_branches()
      .iter()
      .map(|branch| branch.expand_ref(self.root).into_owned())
      .collect::<Vec<Value>>();

    let mut fragments = Vec::with_capacity(branches.len() + 1);

    fragments.push(schema);
    fragments.extend(branches);

    fragments
  }

  fn usable(schema: &Value) -> bool {
    !schema.is_bare_enum()
      && schema.get("type").and_then(Value::as_str) != Some("undefined")
  }
}
