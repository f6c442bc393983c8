use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Complete {
  #[arg(long, help = "Treat the request as explicitly invoked")]
  explicit: bool,
  #[arg(long, help = "Print the result as JSON")]
  json: bool,
  #[arg(
    long,
    value_enum,
    help = "Dialect to render proposals for, derived from the file extension by default"
  )]
  mode: Option<Mode>,
  #[arg(
    long,
    value_name = "BYTE",
    conflicts_with = "position",
    required_unless_present = "position",
    help = "Byte offset of the cursor"
  )]
  offset: Option<usize>,
  #[arg(
    value_name = "PATH",
    help = "Path to the document to complete",
    value_hint = clap::ValueHint::FilePath
  )]
  path: PathBuf,
  #[arg(
    long,
    value_name = "LINE:CHARACTER",
    value_parser = parse_position,
    help = "Zero-based line and UTF-16 character of the cursor"
  )]
  position: Option<lsp::Position>,
  #[arg(
    long,
    value_name = "PATH",
    help = "Schema to complete against, instead of the document's `$schema`",
    value_hint = clap::ValueHint::FilePath
  )]
  schema: Option<PathBuf>,
}

impl Complete {
  fn completions(&self, document: &Document) -> Result<CompletionResult> {
    let schema = match &self.schema {
      Some(path) => SchemaStore::load(path)?,
      None => SchemaStore::new(&Config::default(), None)
        .schema_for(document)
        .ok_or_else(|| {
          anyhow!(
            "no schema for `{}`, pass `--schema` or add a `$schema` property",
            self.path.display()
          )
        })?,
    };

    let offset = self.offset(document)?;

    let mode = self.mode.unwrap_or_else(|| document.mode());

    Ok(
      Completions::new(&schema, document, offset, self.explicit, mode)
        .complete(),
    )
  }

  fn offset(&self, document: &Document) -> Result<TextSize> {
    let Some(offset) = self.offset else {
      return match self.position {
        Some(position) => Ok(document.content.lsp_position_to_offset(position)),
        None => bail!("either `--offset` or `--position` is required"),
      };
    };

    let text = document.content.to_string();

    if offset > text.len() {
      bail!(
        "offset {offset} is past the end of `{}` ({} bytes)",
        self.path.display(),
        text.len()
      );
    }

    if !text.is_char_boundary(offset) {
      bail!("offset {offset} is not on a character boundary");
    }

    Ok(TextSize::try_from(offset)?)
  }

  fn print(&self, result: &CompletionResult) -> Result {
    if self.json {
      println!(
        "{}",
        serde_json::to_string_pretty(&json!({
          "from": u32::from(result.from),
          "proposals": result.proposals,
          "to": u32::from(result.to),
        }))?
      );

      return Ok(());
    }

    if result.proposals.is_empty() {
      eprintln!("{}", "no completions".dimmed());
      return Ok(());
    }

    println!(
      "{}",
      format!("replacing {}..{}", u32::from(result.from), u32::from(result.to))
        .dimmed()
    );

    for proposal in &result.proposals {
      let detail = proposal.detail.as_deref().unwrap_or_default();

      println!(
        "{} {} {}",
        proposal.label.bold(),
        detail.cyan(),
        proposal.insert_text.escape_debug().green()
      );
    }

    Ok(())
  }

  pub(crate) fn run(self) -> Result {
    let document = Document::from_path(&self.path)?;

    let result = self.completions(&document)?;

    self.print(&result)
  }
}

fn parse_position(value: &str) -> Result<lsp::Position> {
  let (line, character) = value
    .split_once(':')
    .ok_or_else(|| anyhow!("expected `LINE:CHARACTER`, got `{value}`"))?;

  Ok(lsp::Position::new(
    line
      .parse()
      .with_context(|| format!("invalid line `{line}`"))?,
    character
      .parse()
      .with_context(|| format!("invalid character `{character}`"))?,
  ))
}
