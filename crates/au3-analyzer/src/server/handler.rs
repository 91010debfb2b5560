use std::{panic::AssertUnwindSafe, time::Instant};

use futures::FutureExt;
use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info};

use crate::{
    ide::lsp::{definition_response, lsp_position_to_ide},
    server::{settings::ServerSettings, state::Au3LanguageServer},
};

const CLIENT_NOTIFICATION_PREFIX: &str = "au3-analyzer:";

#[tower_lsp::async_trait]
impl LanguageServer for Au3LanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing au3-analyzer...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        let roots = match (params.workspace_folders.as_deref(), params.root_uri.as_ref()) {
            (Some(folders), _) => folders.len(),
            (None, Some(_)) => 1,
            (None, None) => 0,
        };
        info!("Client opened {roots} workspace roots");

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                definition_provider: Some(OneOf::Left(true)),
                declaration_provider: Some(DeclarationCapability::Simple(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "au3-analyzer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        let layout = self.settings_snapshot().await.project_layout();
        info!(
            "au3-analyzer initialized (sources '{}', libraries '{}', *.{})",
            layout.source_dir, layout.library_dir, layout.script_extension
        );
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }

        self.apply_settings(merged).await;
        info!("Applied updated au3-analyzer settings");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down au3-analyzer");
        self.definition_provider.log_perf_summary();
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        let version = params.text_document.version;
        let filename = short_name(&uri);
        let allow_client_info_logs = self.settings_snapshot().await.logging.level.allows_info();

        info!("Opened {filename} (v{version}, {} bytes)", text.len());
        if allow_client_info_logs {
            let _ = AssertUnwindSafe(
                self.client.log_message(MessageType::INFO, prefixed_client_message(format!("Opened {filename}"))),
            )
            .catch_unwind()
            .await;
        }

        self.document_store.open(uri, text, version);
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("Changed {} (v{version}, {} edits)", short_name(&uri), params.content_changes.len());
        self.document_store.apply_changes(&uri, params.content_changes, version);
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        debug!("Closed {}", short_name(&uri));
        self.document_store.close(&uri);
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        Ok(self.resolve_definition("goto-def", params.text_document_position_params).await)
    }

    async fn goto_declaration(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        Ok(self.resolve_definition("goto-decl", params.text_document_position_params).await)
    }
}

impl Au3LanguageServer {
    /// Shared body of definition and declaration requests; AutoIt does not
    /// distinguish the two.
    async fn resolve_definition(
        &self,
        request: &str,
        params: TextDocumentPositionParams,
    ) -> Option<GotoDefinitionResponse> {
        let uri = params.text_document.uri;
        let position = params.position;
        let filename = short_name(&uri);

        let Some(document) = self.document_store.get(&uri) else {
            debug!("{request} {filename}: document is not open");
            return None;
        };
        let layout = self.settings_snapshot().await.project_layout();

        let start = Instant::now();
        let location = self.definition_provider.provide(&document.view(), lsp_position_to_ide(position), &layout);
        let elapsed = start.elapsed();

        let outcome = match &location {
            Some(location) => {
                format!("{}:{}", short_path(location.uri.path()), location.range.start.line + 1)
            },
            None => "none".to_string(),
        };
        let summary =
            format!("{request} {filename}:{}:{} → {outcome} ({elapsed:?})", position.line + 1, position.character + 1);
        debug!("{summary}");
        if self.log_messages {
            let _ = AssertUnwindSafe(self.client.log_message(MessageType::LOG, prefixed_client_message(&summary)))
                .catch_unwind()
                .await;
        }

        location.map(definition_response)
    }
}

fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}

fn short_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
