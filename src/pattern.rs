use super::*;

/// A `patternProperties` key compiled to a regular expression.
#[derive(Debug)]
pub(crate) struct Pattern(Regex);

impl Pattern {
  pub(crate) fn is_match(&self, text: &str) -> bool {
    self.0.is_match(text)
  }

  /// Compiles `pattern`, honoring a leading `(?i)` as case-insensitive.
  ///
  /// Unicode mode is tried first, then plain byte-oriented classes; a pattern
  /// neither accepts yields `None` and never matches.
  pub(crate) fn new(pattern: &str) -> Option<Self> {
    let (pattern, case_insensitive) = match pattern.strip_prefix("(?i)") {
      Some(rest) => (rest, true),
      None => (pattern, false),
    };

    [true, false]
      .into_iter()
      .find_map(|unicode| {
        RegexBuilder::new(pattern)
          .case_insensitive(case_insensitive)
          .unicode(unicode)
          .build()
          .ok()
      })
      .map(Self)
      .or_else(|| {
        log::debug!("skipping invalid pattern `{pattern}`");
        None
      })
  }
}
