use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ProposalKind {
  Boolean,
  Null,
  Property,
  Value,
}

impl From<ProposalKind> for lsp::CompletionItemKind {
  fn from(kind: ProposalKind) -> Self {
    match kind {
      ProposalKind::Boolean | ProposalKind::Null => Self::KEYWORD,
      ProposalKind::Property => Self::PROPERTY,
      ProposalKind::Value => Self::VALUE,
    }
  }
}

/// One candidate completion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Proposal {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) detail: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub(crate) docs: Option<String>,
  pub(crate) insert_text: String,
  pub(crate) kind: ProposalKind,
  pub(crate) label: String,
}

impl Proposal {
  pub(crate) fn into_completion_item(
    self,
    index: usize,
    range: lsp::Range,
  ) -> lsp::CompletionItem {
    lsp::CompletionItem {
      detail: self.detail,
      documentation: self.docs.map(|docs| {
        lsp::Documentation::MarkupContent(lsp::MarkupContent {
          kind: lsp::MarkupKind::Markdown,
          value: docs,
        })
      }),
      filter_text: Some(strip_surrounding_quotes(&self.label).to_string()),
      insert_text_format: Some(lsp::InsertTextFormat::SNIPPET),
      kind: Some(self.kind.into()),
      sort_text: Some(format!("{index:04}")),
      text_edit: Some(lsp::CompletionTextEdit::Edit(lsp::TextEdit {
        new_text: Self::tab_stops(&self.insert_text),
        range,
      })),
      label: self.label,
      ..lsp::CompletionItem::default()
    }
  }

  /// Numbers placeholder markers as LSP tab stops: `${}` becomes `$1` and
  /// `${text}` becomes `${1:text}`, counting up in order of appearance.
  pub(crate) fn tab_stops(snippet: &str) -> String {
    let mut output = String::with_capacity(snippet.len() + 8);

    let mut chars = snippet.chars().peekable();

    let mut stop = 0;

    while let Some(ch) = chars.next() {
      match ch {
        '\\' => {
          output.push(ch);

          if let Some(escaped) = chars.next() {
            output.push(escaped);
          }
        }
        '$' if chars.peek() == Some(&'{') => {
          chars.next();

          stop += 1;

          let mut content = String::new();

          while let Some(ch) = chars.next() {
            match ch {
              '\\' => {
                content.push(ch);

                if let Some(escaped) = chars.next() {
                  content.push(escaped);
                }
              }
              '}' => break,
              _ => content.push(ch),
            }
          }

          if content.is_empty() {
            output.push_str(&format!("${stop}"));
          } else {
            output.push_str(&format!("${{{stop}:{content}}}"));
          }
        }
        _ => output.push(ch),
      }
    }

    output
  }
}
