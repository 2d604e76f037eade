use std::sync::Arc;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;

use chatcast_core::error::ChatcastError;
use chatcast_core::Message;

use crate::realtime::{Connection, ConnectionRegistry};

/// Outcome of one broadcast pass.
///
/// `failed` is informational: those connections were flagged for eviction,
/// the publish itself still succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Active connections in the snapshot.
    pub recipients: usize,
    pub delivered: usize,
    /// Ids whose push failed during this pass.
    pub failed: Vec<String>,
}

impl BroadcastReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

enum PushOutcome {
    Delivered,
    /// Flagged inactive by a concurrent pass before our push started.
    Skipped,
    /// The connection has already been flagged by the push task.
    Failed,
}

/// Fan-out with join: one task per recipient, all joined before returning.
///
/// The dispatcher never mutates the registry; a failed connection is only
/// flagged, and its own session deregisters it. Flagging happens inside the
/// spawned push task, so it still happens if the caller stops polling
/// `broadcast` mid-pass.
pub struct BroadcastDispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastDispatcher {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Push `msg` to every active connection and wait for every push to resolve.
    pub async fn broadcast(&self, msg: &Message) -> BroadcastReport {
        let targets: Vec<Arc<Connection>> = self
            .registry
            .snapshot()
            .into_iter()
            .filter(|c| c.is_active())
            .collect();

        let mut report = BroadcastReport {
            recipients: targets.len(),
            ..BroadcastReport::default()
        };
        if targets.is_empty() {
            return report;
        }

        let msg = Arc::new(msg.clone());
        let mut pushes = FuturesUnordered::new();
        for conn in targets {
            let task = tokio::spawn(push_one(Arc::clone(&conn), Arc::clone(&msg)));
            pushes.push(async move { (conn, task.await) });
        }

        while let Some((conn, joined)) = pushes.next().await {
            let outcome = joined.unwrap_or_else(|e| {
                // the task died before it could flag the connection
                evict(&conn, ChatcastError::Internal(format!("push task aborted: {e}")));
                PushOutcome::Failed
            });
            match outcome {
                PushOutcome::Delivered => report.delivered += 1,
                PushOutcome::Skipped => {}
                PushOutcome::Failed => report.failed.push(conn.id().to_string()),
            }
        }

        tracing::debug!(
            recipients = report.recipients,
            delivered = report.delivered,
            failed = report.failed.len(),
            "broadcast pass complete"
        );
        report
    }
}

async fn push_one(conn: Arc<Connection>, msg: Arc<Message>) -> PushOutcome {
    if !conn.is_active() {
        return PushOutcome::Skipped;
    }
    match conn.push(&msg).await {
        Ok(()) => {
            tracing::debug!(conn_id = %conn.id(), name = %conn.name(), "message sent");
            PushOutcome::Delivered
        }
        Err(e) => {
            evict(&conn, e);
            PushOutcome::Failed
        }
    }
}

fn evict(conn: &Connection, err: ChatcastError) {
    tracing::warn!(conn_id = %conn.id(), name = %conn.name(), error = %err, "push failed; evicting");
    conn.fail(ChatcastError::delivery(conn.id(), err));
}
