use super::*;

#[derive(Debug)]
pub(crate) struct Server(Arc<Inner>);

impl Server {
  pub(crate) fn capabilities() -> lsp::ServerCapabilities {
    lsp::ServerCapabilities {
      completion_provider: Some(lsp::CompletionOptions {
        trigger_characters: Some(
          ["\"", "'", ":"].map(str::to_string).to_vec(),
        ),
        ..Default::default()
      }),
      text_document_sync: Some(lsp::TextDocumentSyncCapability::Options(
        lsp::TextDocumentSyncOptions {
          open_close: Some(true),
          change: Some(lsp::TextDocumentSyncKind::INCREMENTAL),
          will_save: None,
          will_save_wait_until: None,
          save: None,
        },
      )),
      ..Default::default()
    }
  }

  pub(crate) fn new(client: Client) -> Self {
    Self(Arc::new(Inner::new(client)))
  }

  pub(crate) async fn run() {
    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());

    let (service, socket) = LspService::new(Server::new);

    tower_lsp::Server::new(stdin, stdout, socket)
      .serve(service)
      .await;
  }
}

#[tower_lsp::async_trait]
impl LanguageServer for Server {
  async fn completion(
    &self,
    params: lsp::CompletionParams,
  ) -> Result<Option<lsp::CompletionResponse>, jsonrpc::Error> {
    Ok(self.0.completion(params).await)
  }

  async fn did_change(&self, params: lsp::DidChangeTextDocumentParams) {
    self.0.did_change(params).await;
  }

  async fn did_close(&self, params: lsp::DidCloseTextDocumentParams) {
    self.0.did_close(params).await;
  }

  async fn did_open(&self, params: lsp::DidOpenTextDocumentParams) {
    self.0.did_open(params).await;
  }

  async fn initialize(
    &self,
    params: lsp::InitializeParams,
  ) -> Result<lsp::InitializeResult, jsonrpc::Error> {
    self.0.initialize(params).await
  }

  async fn initialized(&self, params: lsp::InitializedParams) {
    self.0.initialized(params).await;
  }

  async fn shutdown(&self) -> Result<(), jsonrpc::Error> {
    Ok(())
  }
}

#[derive(Debug)]
struct Inner {
  client: Client,
  config: RwLock<Config>,
  documents: RwLock<BTreeMap<lsp::Url, Document>>,
  root: RwLock<Option<PathBuf>>,
}

impl Inner {
  async fn completion(
    &self,
    params: lsp::CompletionParams,
  ) -> Option<lsp::CompletionResponse> {
    let lsp::CompletionParams {
      context,
      text_document_position:
        lsp::TextDocumentPositionParams {
          position,
          text_document,
        },
      ..
    } = params;

    let documents = self.documents.read().await;

    let document = documents.get(&text_document.uri)?;

    let config = self.config.read().await;

    let root = self.root.read().await;

    let Some(schema) =
      SchemaStore::new(&config, root.as_deref()).schema_for(document)
    else {
      log::debug!("no schema for `{}`", text_document.uri);
      return None;
    };

    let explicit = context.is_none_or(|context| {
      context.trigger_kind == lsp::CompletionTriggerKind::INVOKED
        || context.trigger_character.as_deref() == Some(":")
    });

    let offset = document.content.lsp_position_to_offset(position);

    let mode = config.mode.unwrap_or_else(|| document.mode());

    let result =
      Completions::new(&schema, document, offset, explicit, mode).complete();

    let range = document
      .content
      .lsp_range(TextRange::new(result.from, result.to));

    let items = result
      .proposals
      .into_iter()
      .enumerate()
      .map(|(index, proposal)| proposal.into_completion_item(index, range))
      .collect();

    Some(lsp::CompletionResponse::List(lsp::CompletionList {
      is_incomplete: false,
      items,
    }))
  }

  async fn did_change(&self, params: lsp::DidChangeTextDocumentParams) {
    let mut documents = self.documents.write().await;

    if let Some(document) = documents.get_mut(&params.text_document.uri) {
      document.apply_change(params);

      log::debug!("`{}` is at version {}", document.uri, document.version);
    }
  }

  async fn did_close(&self, params: lsp::DidCloseTextDocumentParams) {
    self
      .documents
      .write()
      .await
      .remove(&params.text_document.uri);
  }

  async fn did_open(&self, params: lsp::DidOpenTextDocumentParams) {
    let uri = params.text_document.uri.clone();

    self
      .documents
      .write()
      .await
      .insert(uri, Document::from(params));
  }

  async fn initialize(
    &self,
    params: lsp::InitializeParams,
  ) -> Result<lsp::InitializeResult, jsonrpc::Error> {
    log::info!("Starting {} language server...", env!("CARGO_PKG_NAME"));

    #[allow(deprecated)]
    let root = params
      .workspace_folders
      .as_ref()
      .and_then(|folders| folders.first())
      .map(|folder| &folder.uri)
      .or(params.root_uri.as_ref())
      .and_then(|uri| uri.to_file_path().ok());

    *self.root.write().await = root;

    *self.config.write().await =
      Config::from_initialization_options(params.initialization_options);

    Ok(lsp::InitializeResult {
      capabilities: Server::capabilities(),
      server_info: Some(lsp::ServerInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
      }),
    })
  }

  async fn initialized(&self, _: lsp::InitializedParams) {
    self
      .client
      .log_message(
        lsp::MessageType::INFO,
        &format!("{} initialized", env!("CARGO_PKG_NAME")),
      )
      .await;
  }

  fn new(client: Client) -> Self {
    Self {
      client,
      config: RwLock::new(Config::default()),
      documents: RwLock::new(BTreeMap::new()),
      root: RwLock::new(None),
    }
  }
}
