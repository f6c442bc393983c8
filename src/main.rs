use {
  anyhow::{Context, Error, anyhow, bail},
  arguments::Arguments,
  clap::{Parser, ValueEnum},
  collector::{Collector, Sink, UniqueItems},
  completions::{CompletionResult, Completions},
  config::{Config, SchemaAssociation},
  document::Document,
  editor::{EditorNode, EditorState, NodeKind, strip_surrounding_quotes},
  env_logger::Env,
  globset::GlobBuilder,
  indexmap::IndexMap,
  lexer::{Lexer, Token},
  mode::Mode,
  owo_colors::OwoColorize,
  parser::{Parse, parse},
  pattern::Pattern,
  pointer_ext::PointerExt,
  pointer_map::PointerMap,
  proposal::{Proposal, ProposalKind},
  regex::{Regex, RegexBuilder},
  rope_ext::RopeExt,
  ropey::Rope,
  rowan::{GreenNode, GreenNodeBuilder},
  schema_ext::{MAX_DEPTH, SchemaExt},
  schema_resolver::SchemaResolver,
  schema_store::SchemaStore,
  serde::{Deserialize, Serialize},
  serde_json::{Value, json, ser::PrettyFormatter},
  server::Server,
  snippet::Snippet,
  std::{
    backtrace::BacktraceStatus,
    borrow::Cow,
    cmp::Reverse,
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
    process,
    sync::Arc,
  },
  subcommand::Subcommand,
  syntax::{SyntaxKind, SyntaxNode},
  text_size::{TextRange, TextSize},
  tokio::sync::RwLock,
  tower_lsp::{Client, LanguageServer, LspService, jsonrpc, lsp_types as lsp},
};

#[cfg(test)]
use {cursor::cursor, std::env};

mod arguments;
mod collector;
mod completions;
mod config;
mod cursor;
mod document;
mod editor;
mod lexer;
mod mode;
mod parser;
mod pattern;
mod pointer_ext;
mod pointer_map;
mod proposal;
mod rope_ext;
mod schema_ext;
mod schema_resolver;
mod schema_store;
mod server;
mod snippet;
mod subcommand;
mod syntax;

type Result<T = (), E = Error> = std::result::Result<T, E>;

#[tokio::main]
async fn main() {
  let env = Env::default().default_filter_or("info");

  env_logger::Builder::from_env(env).init();

  if let Err(error) = Arguments::parse().run().await {
    eprintln!("error: {error}");

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();
        eprintln!("because:");
      }

      eprintln!("- {error}");
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      eprintln!("backtrace:");
      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
