use {super::*, complete::Complete};

mod complete;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  /// Print the completions offered at a position in a document
  Complete(Complete),
  /// Run the language server over stdio
  Server,
}

impl Subcommand {
  pub(crate) async fn run(self) -> Result {
    match self {
      Self::Complete(complete) => complete.run(),
      Self::Server => {
        Server::run().await;
        Ok(())
      }
    }
  }
}
