use crate::util::{from_lsp_lens, to_lsp_lens};
use crate::LspServer;
use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

pub async fn code_lens(server: &LspServer, params: CodeLensParams) -> Result<Option<Vec<CodeLens>>> {
    let uri = params.text_document.uri;
    let Some(engine) = server.current_engine().await else {
        return Ok(None);
    };
    let Some(text) = server.document_text(&uri).await else {
        return Ok(None);
    };

    let ctx = engine.editor_context(uri.as_str(), text);
    let provider = engine.provider();
    let cancel = server.request_token();
    // Dropping the request (client cancel) cancels the blocking work
    let guard = cancel.clone().drop_guard();
    let result = tokio::task::spawn_blocking(move || provider.produce(ctx.as_ref(), &cancel)).await;
    guard.disarm();

    match result {
        Ok(lenses) => Ok(Some(
            lenses.iter().map(|lens| to_lsp_lens(&uri, lens)).collect(),
        )),
        Err(e) => {
            tracing::error!("codeLens task failed for {}: {}", uri, e);
            Ok(None)
        }
    }
}

pub async fn code_lens_resolve(server: &LspServer, params: CodeLens) -> Result<CodeLens> {
    let Some((data, lens)) = from_lsp_lens(&params) else {
        return Ok(params);
    };
    let Some(engine) = server.current_engine().await else {
        return Ok(params);
    };
    let Some(text) = server.document_text(&data.uri).await else {
        return Ok(params);
    };

    let ctx = engine.editor_context(data.uri.as_str(), text);
    let provider = engine.provider();
    let cancel = server.request_token();
    let guard = cancel.clone().drop_guard();
    let result =
        tokio::task::spawn_blocking(move || provider.resolve(ctx.as_ref(), lens, &cancel)).await;
    guard.disarm();

    match result {
        Ok(resolved) if resolved.is_resolved() => Ok(to_lsp_lens(&data.uri, &resolved)),
        Ok(_) => Ok(params),
        Err(e) => {
            tracing::error!("codeLens/resolve task failed for {}: {}", data.uri, e);
            Ok(params)
        }
    }
}

/// Text of a document: the open buffer if the client sent one, the file on
/// disk otherwise.
pub(crate) async fn read_text(uri: &Url) -> Option<Arc<str>> {
    let path = uri.to_file_path().ok()?;
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => Some(text.into()),
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", path.display(), e);
            None
        }
    }
}
