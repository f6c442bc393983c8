use super::*;

/// Anything proposals can be added to.
pub(crate) trait Sink {
  fn add(&mut self, proposal: Proposal);

  fn contains(&self, label: &str) -> bool;
}

/// Proposals for a single request, keyed by label in insertion order.
///
/// Reserved labels never enter the set. Adding a label that is already
/// present replaces the earlier proposal but keeps its position.
#[derive(Debug, Default)]
pub(crate) struct Collector {
  proposals: IndexMap<String, Proposal>,
  reserved: HashSet<String>,
}

impl Collector {
  /// Proposals whose unquoted label starts with the unquoted `prefix`.
  pub(crate) fn filter(self, prefix: &str) -> Vec<Proposal> {
    let prefix = strip_surrounding_quotes(prefix);

    self
      .proposals
      .into_values()
      .filter(|proposal| {
        strip_surrounding_quotes(&proposal.label).starts_with(prefix)
      })
      .collect()
  }

  #[cfg(test)]
  pub(crate) fn labels(&self) -> Vec<&str> {
    self.proposals.keys().map(String::as_str).collect()
  }

  pub(crate) fn reserve(&mut self, label: &str) {
    self
      .reserved
      .insert(strip_surrounding_quotes(label).to_string());
  }
}

impl Sink for Collector {
  fn add(&mut self, proposal: Proposal) {
    if self
      .reserved
      .contains(strip_surrounding_quotes(&proposal.label))
    {
      return;
    }

    self.proposals.insert(proposal.label.clone(), proposal);
  }

  fn contains(&self, label: &str) -> bool {
    self.proposals.contains_key(label)
  }
}

/// Drops proposals for values the array already holds, or that were already
/// collected.
pub(crate) struct UniqueItems<'a> {
  existing: HashSet<String>,
  sink: &'a mut dyn Sink,
}

impl<'a> UniqueItems<'a> {
  pub(crate) fn new(sink: &'a mut dyn Sink, existing: HashSet<String>) -> Self {
    Self { existing, sink }
  }
}

impl Sink for UniqueItems<'_> {
  fn add(&mut self, proposal: Proposal) {
    if self.existing.contains(&proposal.label)
      || self.sink.contains(&proposal.label)
    {
      return;
    }

    self.sink.add(proposal);
  }

  fn contains(&self, label: &str) -> bool {
    self.sink.contains(label)
  }
}
