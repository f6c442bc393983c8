use super::*;

pub(crate) trait PointerExt {
  /// Appends an encoded segment.
  fn join_segment(&self, segment: &str) -> String;

  /// Empties the last segment, keeping its leading slash.
  fn parent_pointer(&self) -> String;

  /// Decoded, non-empty segments.
  fn segments(&self) -> Vec<String>;
}

impl PointerExt for str {
  fn join_segment(&self, segment: &str) -> String {
    let mut encoded = String::with_capacity(self.len() + segment.len() + 1);

    encoded.push_str(self);
    encoded.push('/');

    for ch in segment.chars() {
      match ch {
        '~' => encoded.push_str("~0"),
        '/' => encoded.push_str("~1"),
        _ => encoded.push(ch),
      }
    }

    encoded
  }

  fn parent_pointer(&self) -> String {
    match self.rfind('/') {
      Some(index) => self[..=index].to_string(),
      None => String::new(),
    }
  }

  fn segments(&self) -> Vec<String> {
    self
      .split('/')
      .filter(|segment| !segment.is_empty())
      .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
      .collect()
  }
}
