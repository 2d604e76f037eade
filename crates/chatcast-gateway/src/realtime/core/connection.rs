use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use chatcast_core::error::{ChatcastError, Result};
use chatcast_core::{Message, User};

/// Pushes one message at a time to a remote peer.
///
/// Implementations own the transport write; `push` resolves once that single
/// write has completed or failed.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn push(&self, msg: &Message) -> Result<()>;
}

/// One registered outbound stream.
///
/// Shared by the registry (for dispatch) and the owning session (for
/// lifecycle). Only the dispatcher flips `active` and fires the failure
/// signal; `active.swap` elects exactly one writer for the signal.
pub struct Connection {
    id: String,
    name: String,
    sink: Arc<dyn MessageSink>,
    active: AtomicBool,
    failure: Mutex<Option<oneshot::Sender<ChatcastError>>>,
}

impl Connection {
    /// Build an active connection plus the receiving half of its failure signal.
    pub fn new(user: &User, sink: Arc<dyn MessageSink>) -> (Arc<Self>, oneshot::Receiver<ChatcastError>) {
        let (tx, rx) = oneshot::channel();
        let conn = Arc::new(Self {
            id: user.id.clone(),
            name: user.name.clone(),
            sink,
            active: AtomicBool::new(true),
            failure: Mutex::new(Some(tx)),
        });
        (conn, rx)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Push one message through the sink.
    pub(crate) async fn push(&self, msg: &Message) -> Result<()> {
        self.sink.push(msg).await
    }

    /// Mark inactive and wake the owning session.
    ///
    /// Returns `false` if the connection had already failed; the signal fires
    /// at most once.
    pub(crate) fn fail(&self, err: ChatcastError) -> bool {
        if !self.active.swap(false, Ordering::AcqRel) {
            return false;
        }
        let tx = match self.failure.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(tx) = tx {
            // receiver gone means the session already terminated
            let _ = tx.send(err);
        }
        true
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSink;

    #[async_trait]
    impl MessageSink for NullSink {
        async fn push(&self, _msg: &Message) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failure_signal_fires_once() {
        let (conn, mut rx) = Connection::new(&User::new("u1", "Ann"), Arc::new(NullSink));
        assert!(conn.is_active());

        assert!(conn.fail(ChatcastError::delivery("u1", "reset")));
        assert!(!conn.fail(ChatcastError::delivery("u1", "again")));
        assert!(!conn.is_active());

        match rx.try_recv() {
            Ok(ChatcastError::Delivery { reason, .. }) => assert_eq!(reason, "reset"),
            other => panic!("unexpected signal: {other:?}"),
        }
    }
}
