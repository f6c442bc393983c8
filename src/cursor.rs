#![cfg(test)]

use super::*;

/// Removes the `▮` marker from `text`, returning the text and the marker's
/// byte offset.
pub(crate) fn cursor(text: &str) -> (String, TextSize) {
  let offset = text
    .find('▮')
    .unwrap_or_else(|| panic!("missing cursor marker in {text:?}"));

  (
    text.replacen('▮', "", 1),
    TextSize::try_from(offset).unwrap(),
  )
}
