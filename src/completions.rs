use super::*;

/// Proposals for one request and the range they replace.
#[derive(Debug, PartialEq)]
pub(crate) struct CompletionResult {
  pub(crate) from: TextSize,
  pub(crate) proposals: Vec<Proposal>,
  pub(crate) to: TextSize,
}

impl CompletionResult {
  fn empty(offset: TextSize) -> Self {
    Self {
      from: offset,
      proposals: Vec::new(),
      to: offset,
    }
  }
}

/// Where a value is being completed.
struct ValueSlot<N> {
  /// Enclosing object or array, `None` at the document root.
  container: Option<N>,
  /// Key of the property whose value is edited.
  key: Option<String>,
  /// The value under the cursor, when there is one.
  value: Option<N>,
}

pub(crate) struct Completions<'a, S: EditorState> {
  explicit: bool,
  offset: TextSize,
  schema: &'a Value,
  snippet: Snippet,
  state: &'a S,
}

impl<'a, S: EditorState> Completions<'a, S> {
  fn add_default_value_completions(
    &self,
    schema: &Value,
    sink: &mut dyn Sink,
    separator: &str,
    wrap: usize,
  ) {
    let wrapped = |value: &Value| {
      (0..wrap).fold(value.clone(), |value, _| Value::Array(vec![value]))
    };

    let detail = if wrap > 0 {
      Some("array".to_string())
    } else {
      schema.type_label()
    };

    let mut found = false;

    if let Some(default) = schema.get("default") {
      let value = wrapped(default);

      sink.add(Proposal {
        detail: Some("Default value".into()),
        docs: None,
        insert_text: self.snippet.guessed_value(&value, separator),
        kind: ProposalKind::Value,
        label: value.to_string(),
      });

      found = true;
    }

    if let Some(examples) = schema.get("examples").and_then(Value::as_array) {
      for example in examples {
        let value = wrapped(example);

        sink.add(Proposal {
          detail: detail.clone(),
          docs: None,
          insert_text: self.snippet.guessed_value(&value, separator),
          kind: ProposalKind::Value,
          label: value.to_string(),
        });

        found = true;
      }
    }

    if found || wrap >= MAX_DEPTH {
      return;
    }

    if let Some(items @ Value::Object(_)) = schema.get("items") {
      self.add_default_value_completions(
        &items.expand_ref(self.schema),
        sink,
        separator,
        wrap + 1,
      );
    }
  }

  fn add_enum_value_completions(
    &self,
    schema: &Value,
    sink: &mut dyn Sink,
    separator: &str,
  ) {
    let detail = schema.type_label();

    let description = schema.description().map(str::to_string);

    if let Some(constant) = schema.get("const") {
      sink.add(Proposal {
        detail: detail.clone(),
        docs: description.clone(),
        insert_text: self.snippet.guessed_value(constant, separator),
        kind: ProposalKind::Value,
        label: constant.to_string(),
      });
    }

    let Some(members) = schema.get("enum").and_then(Value::as_array) else {
      return;
    };

    let descriptions = schema.get("enumDescriptions").and_then(Value::as_array);

    for (index, member) in members.iter().enumerate() {
      let docs = descriptions
        .and_then(|descriptions| descriptions.get(index))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| description.clone());

      sink.add(Proposal {
        detail: detail.clone(),
        docs,
        insert_text: self.snippet.guessed_value(member, separator),
        kind: ProposalKind::Value,
        label: member.to_string(),
      });
    }
  }

  /// `true`/`false` and `null` for the collected types.
  fn add_literal_completions(
    types: &HashSet<String>,
    sink: &mut dyn Sink,
    separator: &str,
  ) {
    if types.contains("boolean") {
      for value in ["true", "false"] {
        sink.add(Proposal {
          detail: None,
          docs: None,
          insert_text: format!("{value}{separator}"),
          kind: ProposalKind::Boolean,
          label: value.into(),
        });
      }
    }

    if types.contains("null") {
      sink.add(Proposal {
        detail: None,
        docs: None,
        insert_text: format!("null{separator}"),
        kind: ProposalKind::Null,
        label: "null".into(),
      });
    }
  }

  fn add_property_completions(
    &self,
    node: &S::Node,
    collector: &mut Collector,
  ) {
    let (object, edited) = match node.kind() {
      NodeKind::PropertyName => {
        let Some(property) = node.parent() else {
          return;
        };

        let Some(object) = property.parent() else {
          return;
        };

        (object, Some(property))
      }
      NodeKind::Object if node.span().start() == self.offset => return,
      NodeKind::Object => (node.clone(), None),
      _ => return,
    };

    for property in object.children_of_kind(NodeKind::Property) {
      if edited.as_ref() == Some(&property) {
        continue;
      }

      if let Some(name) = Self::property_name(&property) {
        collector.reserve(&self.state.word_at(&name, true));
      }
    }

    let add_value = edited
      .as_ref()
      .is_none_or(|property| property.value_children().is_empty());

    let raw_word = edited
      .as_ref()
      .and_then(Self::property_name)
      .map(|name| self.state.word_at(&name, false))
      .unwrap_or_default();

    let separator = if add_value {
      self.separator_after(node)
    } else {
      ""
    };

    let pointer = self.state.pointer_for_position(object.span().start());

    for fragment in SchemaResolver::new(self.schema).resolve(&pointer) {
      if let Some(properties) =
        fragment.get("properties").and_then(Value::as_object)
      {
        for (key, schema) in properties {
          if !schema.is_object() {
            continue;
          }

          let schema = schema.expand_ref(self.schema);

          let text =
            self.snippet.property(key, add_value, &raw_word, Some(&schema));

          collector.add(Proposal {
            detail: schema.type_label(),
            docs: schema.description().map(str::to_string),
            insert_text: format!("{text}{separator}"),
            kind: ProposalKind::Property,
            label: key.clone(),
          });
        }
      }

      let Some(names) = fragment
        .get("propertyNames")
        .map(|names| names.expand_ref(self.schema))
      else {
        continue;
      };

      let members = names
        .get("enum")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .chain(names.get("const"))
        .filter_map(Value::as_str);

      for key in members {
        let text = self.snippet.property(key, add_value, &raw_word, None);

        collector.add(Proposal {
          detail: None,
          docs: names.description().map(str::to_string),
          insert_text: format!("{text}{separator}"),
          kind: ProposalKind::Property,
          label: key.to_string(),
        });
      }
    }
  }

  /// Proposals from a schema fragment, its `$ref` target and combinator
  /// branches, collecting the types it admits along the way.
  fn add_schema_value_completions(
    &self,
    schema: &Value,
    types: &mut HashSet<String>,
    sink: &mut dyn Sink,
    separator: &str,
    depth: usize,
  ) {
    let schema = schema.expand_ref(self.schema);

    if !schema.is_object() {
      return;
    }

    self.add_enum_value_completions(&schema, sink, separator);
    self.add_default_value_completions(&schema, sink, separator, 0);

    if schema.get("enum").is_none() && schema.get("const").is_none() {
      types.extend(schema.type_names().into_iter().map(str::to_string));
    }

    if depth >= MAX_DEPTH {
      return;
    }

    for branch in schema.branches() {
      self.add_schema_value_completions(
        branch,
        types,
        sink,
        separator,
        depth + 1,
      );
    }
  }

  fn add_value_completions(&self, node: &S::Node, collector: &mut Collector) {
    let Some(slot) = self.value_slot(node) else {
      return;
    };

    let separator = self.separator_after(node);

    let mut types = HashSet::new();

    let mut unique = None;

    match &slot.container {
      None => self.add_schema_value_completions(
        self.schema,
        &mut types,
        collector,
        separator,
        0,
      ),
      Some(container) => {
        let pointer =
          self.state.pointer_for_position(container.span().start());

        let fragments = SchemaResolver::new(self.schema).resolve(&pointer);

        for fragment in &fragments {
          if container.kind() == NodeKind::Array {
            let Some(schema) = Self::item_schema(
              fragment,
              self.item_index(container, slot.value.as_ref()),
            ) else {
              continue;
            };

            if fragment.get("uniqueItems") == Some(&Value::Bool(true)) {
              let existing =
                self.existing_items(container, slot.value.as_ref());

              self.add_schema_value_completions(
                schema,
                &mut types,
                &mut UniqueItems::new(collector, existing.clone()),
                separator,
                0,
              );

              unique = Some(existing);
            } else {
              self.add_schema_value_completions(
                schema,
                &mut types,
                collector,
                separator,
                0,
              );
            }
          } else if let Some(schema) = slot
            .key
            .as_deref()
            .and_then(|key| Self::property_schema(fragment, key))
          {
            self.add_schema_value_completions(
              schema,
              &mut types,
              collector,
              separator,
              0,
            );
          }
        }
      }
    }

    match unique {
      Some(existing) => Self::add_literal_completions(
        &types,
        &mut UniqueItems::new(collector, existing),
        separator,
      ),
      None => Self::add_literal_completions(&types, collector, separator),
    }
  }

  pub(crate) fn complete(&self) -> CompletionResult {
    let node = self.state.node_at_position(self.offset);

    let on_token =
      matches!(node.kind(), NodeKind::PrimitiveValue | NodeKind::PropertyName);

    if !on_token && !self.explicit {
      return CompletionResult::empty(self.offset);
    }

    let (from, to, prefix) = if on_token {
      let span = node.span();

      let end = self.offset.clamp(span.start(), span.end());

      (
        span.start(),
        span.end(),
        self.state.slice(TextRange::new(span.start(), end)),
      )
    } else {
      (self.offset, self.offset, String::new())
    };

    let mut collector = Collector::default();

    self.add_property_completions(&node, &mut collector);
    self.add_value_completions(&node, &mut collector);

    CompletionResult {
      from,
      proposals: collector.filter(&prefix),
      to,
    }
  }

  /// Labels of the elements already in `array`, other than `value`.
  fn existing_items(
    &self,
    array: &S::Node,
    value: Option<&S::Node>,
  ) -> HashSet<String> {
    array
      .value_children()
      .iter()
      .filter(|child| Some(*child) != value)
      .map(|child| value_label(&self.state.slice(child.span())))
      .collect()
  }

  fn item_index(&self, array: &S::Node, value: Option<&S::Node>) -> usize {
    let children = array.value_children();

    value
      .and_then(|value| children.iter().position(|child| child == value))
      .unwrap_or_else(|| {
        children
          .iter()
          .filter(|child| child.span().end() <= self.offset)
          .count()
      })
  }

  fn item_schema(array: &Value, index: usize) -> Option<&Value> {
    match array.get("items")? {
      Value::Array(tuple) => tuple.get(index).or_else(|| {
        array
          .get("additionalItems")
          .filter(|schema| schema.is_object())
      }),
      schema @ Value::Object(_) => Some(schema),
      _ => None,
    }
  }

  pub(crate) fn new(
    schema: &'a Value,
    state: &'a S,
    offset: TextSize,
    explicit: bool,
    mode: Mode,
  ) -> Self {
    Self {
      explicit,
      offset,
      schema,
      snippet: Snippet::new(mode),
      state,
    }
  }

  fn property_name(property: &S::Node) -> Option<S::Node> {
    property
      .children_of_kind(NodeKind::PropertyName)
      .into_iter()
      .next()
  }

  /// Schema for the value of `key`: `properties`, then the first matching
  /// `patternProperties` entry, then `additionalProperties`.
  fn property_schema<'s>(object: &'s Value, key: &str) -> Option<&'s Value> {
    object
      .get("properties")
      .and_then(|properties| properties.get(key))
      .or_else(|| object.pattern_property(key))
      .or_else(|| {
        object
          .get("additionalProperties")
          .filter(|schema| schema.is_object())
      })
  }

  /// A comma when more content follows the completed text without one.
  fn separator_after(&self, node: &S::Node) -> &'static str {
    let mut root = node.clone();

    while let Some(parent) = root.parent() {
      root = parent;
    }

    let to = if matches!(
      node.kind(),
      NodeKind::PrimitiveValue | NodeKind::PropertyName
    ) {
      node.span().end()
    } else {
      self.offset
    };

    let end = root.span().end().max(to);

    let rest = self.state.slice(TextRange::new(to, end));

    match rest.trim_start().chars().next() {
      None | Some(',' | '}' | ']' | '/') => "",
      Some(_) => ",",
    }
  }

  fn value_slot(&self, node: &S::Node) -> Option<ValueSlot<S::Node>> {
    match node.kind() {
      NodeKind::PrimitiveValue => {
        let parent = node.parent()?;

        let (container, key) = match parent.kind() {
          NodeKind::Property => (
            parent.parent(),
            Self::property_name(&parent)
              .map(|name| self.state.word_at(&name, true)),
          ),
          NodeKind::Array => (Some(parent), None),
          _ => (None, None),
        };

        Some(ValueSlot {
          container,
          key,
          value: Some(node.clone()),
        })
      }
      NodeKind::Property => {
        let name = Self::property_name(node)?;

        let between = TextRange::new(
          name.span().end(),
          self.offset.max(name.span().end()),
        );

        self.state.slice(between).contains(':').then(|| ValueSlot {
          container: node.parent(),
          key: Some(self.state.word_at(&name, true)),
          value: None,
        })
      }
      NodeKind::Array => Some(ValueSlot {
        container: Some(node.clone()),
        key: None,
        value: None,
      }),
      NodeKind::Other
        if node.parent().is_none() && node.value_children().is_empty() =>
      {
        Some(ValueSlot {
          container: None,
          key: None,
          value: None,
        })
      }
      _ => None,
    }
  }
}

/// Compact JSON label for the text of an existing value; single-quoted
/// strings are read as strings.
fn value_label(text: &str) -> String {
  if let Ok(value) = serde_json::from_str::<Value>(text) {
    return value.to_string();
  }

  match text
    .strip_prefix('\'')
    .and_then(|text| text.strip_suffix('\''))
  {
    Some(inner) => Value::String(inner.to_string()).to_string(),
    None => text.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use {super::*, indoc::indoc, pretty_assertions::assert_eq};

  fn person() -> Value {
    json!({
      "type": "object",
      "properties": {
        "name": { "type": "string", "default": "x" },
        "age": { "type": "integer" }
      }
    })
  }

  fn complete_with(
    schema: &Value,
    text: &str,
    explicit: bool,
    mode: Mode,
  ) -> CompletionResult {
    let (content, offset) = cursor(text);

    let document = Document::from(content.as_str());

    Completions::new(schema, &document, offset, explicit, mode).complete()
  }

  fn complete(schema: &Value, text: &str) -> CompletionResult {
    complete_with(schema, text, true, Mode::Json)
  }

  fn labels(result: &CompletionResult) -> Vec<&str> {
    result
      .proposals
      .iter()
      .map(|proposal| proposal.label.as_str())
      .collect()
  }

  fn insert_texts(result: &CompletionResult) -> Vec<&str> {
    result
      .proposals
      .iter()
      .map(|proposal| proposal.insert_text.as_str())
      .collect()
  }

  #[test]
  fn partial_property_name() {
    let result = complete_with(&person(), r#"{"na▮"#, false, Mode::Json);

    assert_eq!(
      result,
      CompletionResult {
        from: TextSize::from(1),
        proposals: vec![Proposal {
          detail: Some("string".into()),
          docs: None,
          insert_text: "\"name\": \"${x}\"".into(),
          kind: ProposalKind::Property,
          label: "name".into(),
        }],
        to: TextSize::from(4),
      }
    );
  }

  #[test]
  fn every_property_of_an_empty_object() {
    let result = complete(&person(), "{▮}");

    assert_eq!(labels(&result), vec!["name", "age"]);

    assert_eq!(
      insert_texts(&result),
      vec!["\"name\": \"${x}\"", "\"age\": ${0}"]
    );

    assert_eq!(result.from, TextSize::from(1));
    assert_eq!(result.to, TextSize::from(1));
  }

  #[test]
  fn implicit_request_outside_tokens_is_empty() {
    assert_eq!(
      complete_with(&person(), "{▮}", false, Mode::Json),
      CompletionResult::empty(TextSize::from(1))
    );
  }

  #[test]
  fn cursor_before_object_suppresses_properties() {
    assert_eq!(labels(&complete(&person(), "▮{}")), Vec::<&str>::new());
  }

  #[test]
  fn present_keys_are_reserved() {
    assert_eq!(
      labels(&complete(&person(), r#"{"name": "a", ▮}"#)),
      vec!["age"]
    );

    assert_eq!(
      labels(&complete(&person(), r#"{"age": 1, "▮"}"#)),
      vec!["name"]
    );
  }

  #[test]
  fn edited_property_is_not_reserved() {
    let result = complete(&person(), r#"{"na▮me": "a"}"#);

    assert_eq!(labels(&result), vec!["name"]);
    assert_eq!(insert_texts(&result), vec!["\"name\""]);
    assert_eq!(result.from, TextSize::from(1));
    assert_eq!(result.to, TextSize::from(7));
  }

  #[test]
  fn prefix_narrows_monotonically() {
    let schema = json!({
      "properties": {
        "name": {},
        "nickname": {},
        "namespace": {},
        "age": {}
      }
    });

    let mut previous = None::<Vec<String>>;

    for text in [r#"{"▮"#, r#"{"n▮"#, r#"{"na▮"#, r#"{"nam▮"#, r#"{"name▮"#] {
      let current = labels(&complete_with(&schema, text, false, Mode::Json))
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<String>>();

      if let Some(previous) = &previous {
        assert!(current.iter().all(|label| previous.contains(label)));
      }

      previous = Some(current);
    }

    assert_eq!(previous, Some(vec!["name".to_string(), "namespace".into()]));
  }

  #[test]
  fn comma_is_added_before_following_content() {
    let result = complete(&person(), r#"{"na▮" "age": 1}"#);

    assert_eq!(insert_texts(&result), vec!["\"name\": \"${x}\","]);
  }

  #[test]
  fn references_complete_like_inlined_schemas() {
    let referenced = json!({
      "definitions": { "X": { "type": "string", "default": "hi" } },
      "properties": { "p": { "$ref": "#/definitions/X" } }
    });

    let inlined = json!({
      "properties": { "p": { "type": "string", "default": "hi" } }
    });

    let referenced = complete(&referenced, r#"{"p▮"#);

    assert_eq!(referenced, complete(&inlined, r#"{"p▮"#));
    assert_eq!(insert_texts(&referenced), vec!["\"p\": \"${hi}\""]);
  }

  #[test]
  fn single_member_enum_prefills_the_value() {
    let schema = json!({ "properties": { "level": { "enum": ["high"] } } });

    assert_eq!(
      insert_texts(&complete(&schema, "{▮}")),
      vec!["\"level\": \"${high}\""]
    );
  }

  #[test]
  fn multi_member_enum_proposes_each_member() {
    let schema = json!({
      "properties": {
        "level": { "enum": ["low", "high"], "description": "How loud." }
      }
    });

    assert_eq!(
      insert_texts(&complete(&schema, "{▮}")),
      vec!["\"level\": ${}"]
    );

    let result = complete(&schema, r#"{"level": ▮}"#);

    assert_eq!(
      result.proposals,
      vec![
        Proposal {
          detail: None,
          docs: Some("How loud.".into()),
          insert_text: "\"${low}\"".into(),
          kind: ProposalKind::Value,
          label: "\"low\"".into(),
        },
        Proposal {
          detail: None,
          docs: Some("How loud.".into()),
          insert_text: "\"${high}\"".into(),
          kind: ProposalKind::Value,
          label: "\"high\"".into(),
        },
      ]
    );
  }

  #[test]
  fn value_prefix_filters_members() {
    let schema = json!({
      "properties": { "level": { "enum": ["low", "high"] } }
    });

    let result = complete_with(&schema, r#"{"level": "h▮"}"#, false, Mode::Json);

    assert_eq!(labels(&result), vec!["\"high\""]);
    assert_eq!(result.from, TextSize::from(10));
    assert_eq!(result.to, TextSize::from(13));
  }

  #[test]
  fn unique_items_skip_present_values() {
    let schema = json!({
      "type": "array",
      "items": { "enum": ["red", "green", "blue"] },
      "uniqueItems": true
    });

    assert_eq!(
      labels(&complete(&schema, r#"["red", ▮]"#)),
      vec!["\"green\"", "\"blue\""]
    );
  }

  #[test]
  fn unique_items_skip_present_literals() {
    let schema = json!({
      "type": "array",
      "items": { "type": ["boolean", "null"] },
      "uniqueItems": true
    });

    assert_eq!(
      labels(&complete(&schema, "[true, ▮]")),
      vec!["false", "null"]
    );

    assert_eq!(
      labels(&complete(&schema, "[null, false, ▮]")),
      vec!["true"]
    );
  }

  #[test]
  fn without_unique_items_present_values_stay() {
    let schema = json!({
      "type": "array",
      "items": { "enum": ["red", "green"] }
    });

    assert_eq!(
      labels(&complete(&schema, r#"["red", ▮]"#)),
      vec!["\"red\"", "\"green\""]
    );
  }

  #[test]
  fn cyclic_references_terminate() {
    let schema = json!({
      "definitions": {
        "A": { "$ref": "#/definitions/B" },
        "B": { "$ref": "#/definitions/A" }
      },
      "properties": {
        "a": { "$ref": "#/definitions/A" },
        "b": { "allOf": [{ "$ref": "#/definitions/A" }] }
      }
    });

    assert_eq!(
      insert_texts(&complete(&schema, "{▮}")),
      vec!["\"a\": ${}", "\"b\": ${}"]
    );

    assert_eq!(labels(&complete(&schema, r#"{"a": ▮}"#)), Vec::<&str>::new());
    assert_eq!(labels(&complete(&schema, r#"{"b": ▮}"#)), Vec::<&str>::new());
  }

  #[test]
  fn json5_keys_follow_the_typed_quote() {
    let schema = person();

    let insert = |text: &str| {
      insert_texts(&complete_with(&schema, text, false, Mode::Json5))
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<String>>()
    };

    assert_eq!(insert("{na▮"), vec!["name: '${x}'"]);
    assert_eq!(insert("{'na▮"), vec!["'name': '${x}'"]);
    assert_eq!(insert("{\"na▮"), vec!["\"name\": '${x}'"]);
  }

  #[test]
  fn json5_values_use_single_quotes() {
    let schema = json!({
      "properties": { "level": { "enum": ["it's"] } }
    });

    assert_eq!(
      insert_texts(&complete_with(
        &schema,
        "{level: ▮}",
        true,
        Mode::Json5
      )),
      vec![r"'${it\\'s}'"]
    );
  }

  #[test]
  fn pattern_properties_match_in_declaration_order() {
    let schema = json!({
      "patternProperties": {
        "^x-": { "enum": ["first"] },
        "^x-y": { "enum": ["second"] }
      },
      "additionalProperties": { "enum": ["fallback"] }
    });

    assert_eq!(
      labels(&complete(&schema, r#"{"x-y": ▮}"#)),
      vec!["\"first\""]
    );

    assert_eq!(
      labels(&complete(&schema, r#"{"other": ▮}"#)),
      vec!["\"fallback\""]
    );
  }

  #[test]
  fn additional_properties_schema() {
    let schema = json!({
      "additionalProperties": { "type": "boolean" }
    });

    assert_eq!(
      labels(&complete(&schema, r#"{"anything": ▮}"#)),
      vec!["true", "false"]
    );
  }

  #[test]
  fn tuple_items_follow_the_index() {
    let schema = json!({
      "items": [{ "enum": [1] }, { "enum": ["two"] }],
      "additionalItems": { "enum": [null] }
    });

    assert_eq!(labels(&complete(&schema, "[▮]")), vec!["1"]);
    assert_eq!(labels(&complete(&schema, "[1, ▮]")), vec!["\"two\""]);
    assert_eq!(labels(&complete(&schema, r#"[1, "two", ▮]"#)), vec!["null"]);

    assert_eq!(
      labels(&complete_with(&schema, r#"[1, "t▮"]"#, false, Mode::Json)),
      vec!["\"two\""]
    );
  }

  #[test]
  fn booleans_and_null_come_from_types() {
    let schema = json!({
      "properties": {
        "flag": { "type": ["boolean", "null"] },
        "fixed": { "type": "boolean", "enum": [true] }
      }
    });

    assert_eq!(
      labels(&complete(&schema, r#"{"flag": ▮}"#)),
      vec!["true", "false", "null"]
    );

    assert_eq!(labels(&complete(&schema, r#"{"fixed": ▮}"#)), vec!["true"]);
  }

  #[test]
  fn types_are_collected_through_combinators() {
    let schema = json!({
      "properties": {
        "mixed": {
          "anyOf": [{ "type": "boolean" }, { "const": "auto" }]
        }
      }
    });

    assert_eq!(
      labels(&complete(&schema, r#"{"mixed": ▮}"#)),
      vec!["\"auto\"", "true", "false"]
    );
  }

  #[test]
  fn property_names_propose_keys() {
    let schema = json!({
      "propertyNames": { "enum": ["alpha", "beta"] }
    });

    let result = complete(&schema, r#"{"beta": 1, ▮}"#);

    assert_eq!(labels(&result), vec!["alpha"]);
    assert_eq!(insert_texts(&result), vec!["\"alpha\": ${}"]);
  }

  #[test]
  fn defaults_and_examples() {
    let schema = json!({
      "properties": {
        "port": { "type": "integer", "default": 8080, "examples": [80, 443] }
      }
    });

    let result = complete(&schema, r#"{"port": ▮}"#);

    assert_eq!(labels(&result), vec!["8080", "80", "443"]);
    assert_eq!(result.proposals[0].detail.as_deref(), Some("Default value"));
    assert_eq!(result.proposals[1].detail.as_deref(), Some("integer"));
    assert_eq!(insert_texts(&result), vec!["${8080}", "${80}", "${443}"]);
  }

  #[test]
  fn item_defaults_are_wrapped_in_arrays() {
    let schema = json!({
      "properties": {
        "tags": { "type": "array", "items": { "default": "x" } }
      }
    });

    let result = complete(&schema, r#"{"tags": ▮}"#);

    assert_eq!(labels(&result), vec![r#"["x"]"#]);
    assert_eq!(insert_texts(&result), vec!["[\n\t\"x\"\n]"]);
  }

  #[test]
  fn item_default_wrapping_stops_at_the_depth_bound() {
    let nested = |depth: usize| {
      let items = (0..depth).fold(json!({ "default": "x" }), |schema, _| {
        json!({ "items": schema })
      });

      json!({ "properties": { "deep": items } })
    };

    assert_eq!(
      labels(&complete(&nested(MAX_DEPTH), r#"{"deep": ▮}"#)),
      vec![r#"[[[[["x"]]]]]"#]
    );

    assert!(
      complete(&nested(MAX_DEPTH + 1), r#"{"deep": ▮}"#)
        .proposals
        .is_empty()
    );

    assert!(
      complete(&nested(MAX_DEPTH + 3), r#"{"deep": ▮}"#)
        .proposals
        .is_empty()
    );
  }

  #[test]
  fn self_referencing_combinators_terminate() {
    let schema = json!({
      "definitions": {
        "loop": {
          "type": "boolean",
          "examples": [1],
          "allOf": [{ "$ref": "#/definitions/loop" }]
        }
      },
      "properties": {
        "value": { "$ref": "#/definitions/loop" }
      }
    });

    assert_eq!(
      labels(&complete(&schema, r#"{"value": ▮}"#)),
      vec!["1", "true", "false"]
    );
  }

  #[test]
  fn root_primitive_uses_the_root_schema() {
    let schema = json!({ "enum": [1, 2, 10] });

    let result = complete_with(&schema, "1▮", false, Mode::Json);

    assert_eq!(labels(&result), vec!["1", "10"]);
    assert_eq!((result.from, result.to), (TextSize::from(0), TextSize::from(1)));
  }

  #[test]
  fn empty_document() {
    let schema = json!({ "type": "object", "default": {} });

    let result = complete(&schema, "▮");

    assert_eq!(labels(&result), vec!["{}"]);
    assert_eq!(insert_texts(&result), vec!["{${}}"]);
  }

  #[test]
  fn nested_objects_resolve_their_pointer() {
    let schema = json!({
      "properties": {
        "server": {
          "oneOf": [
            { "properties": { "host": { "type": "string" } } },
            { "properties": { "socket": { "type": "string" } } }
          ]
        }
      }
    });

    let content = indoc! {r#"
      {
        "server": {
          ▮
        }
      }
    "#};

    assert_eq!(labels(&complete(&schema, content)), vec!["host", "socket"]);
  }

  #[test]
  fn existing_items_are_normalized() {
    assert_eq!(value_label("\"red\""), "\"red\"");
    assert_eq!(value_label("'red'"), "\"red\"");
    assert_eq!(value_label("1.0"), "1.0");
    assert_eq!(value_label("tru"), "tru");
  }
}
