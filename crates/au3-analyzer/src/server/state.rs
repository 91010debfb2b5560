use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::Client;

use crate::{definition::DefinitionProvider, document::DocumentStore, server::settings::ServerSettings};

/// The au3-analyzer backend that implements the Language Server Protocol.
pub struct Au3LanguageServer {
    /// The LSP client handle, used to send log messages back.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Resolves `Func` and variable declarations across included scripts.
    pub(crate) definition_provider: Arc<DefinitionProvider>,

    /// Echo every definition result to the client's log (`--log-messages`).
    pub(crate) log_messages: bool,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl Au3LanguageServer {
    /// Create a new `Au3LanguageServer` wired to the given LSP client.
    ///
    /// With `log_messages` set, each definition and declaration result is
    /// also sent to the client as a `window/logMessage`.
    pub fn new(
        client: Client,
        log_messages: bool,
    ) -> Self {
        Self::with_provider(client, DefinitionProvider::new(), log_messages)
    }

    /// Same as [`Au3LanguageServer::new`] with a caller-supplied provider.
    pub fn with_provider(
        client: Client,
        definition_provider: DefinitionProvider,
        log_messages: bool,
    ) -> Self {
        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            definition_provider: Arc::new(definition_provider),
            log_messages,
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        *self.settings.write().await = settings;
    }
}
