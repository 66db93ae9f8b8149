use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use papersum_core::{PaperApi, ingest};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Receive commands until the channel closes or `cancel` fires.
///
/// Each command runs on its own task so a slow analysis never blocks a
/// search issued after it.
pub async fn run(
    api: Arc<dyn PaperApi>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };
        let api = Arc::clone(&api);
        let tx = event_tx.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), cmd).await;
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(event);
        });
    }
    tracing::debug!("backend listener stopped");
}

/// Run one command to completion.
pub async fn execute(api: &dyn PaperApi, cmd: BackendCommand) -> BackendEvent {
    match cmd {
        BackendCommand::Search(ticket) => {
            tracing::debug!(id = ticket.id, query = %ticket.query, "search started");
            BackendEvent::SearchFinished {
                id: ticket.id,
                result: api.search(&ticket.query).await,
            }
        }
        BackendCommand::Analyze(ticket) => {
            tracing::debug!(id = ticket.id, len = ticket.text.len(), "analysis started");
            BackendEvent::AnalysisFinished {
                id: ticket.id,
                result: api.analyze(&ticket.text).await,
            }
        }
        BackendCommand::ReadFile(candidate) => BackendEvent::FileRead {
            result: ingest::read_text_file(&candidate.path).await,
            name: candidate.name,
        },
    }
}
