use std::future::Future;
use std::sync::Arc;

use tokio::sync::oneshot;

use chatcast_core::error::{ChatcastError, Result};
use chatcast_core::User;

use super::connection::{Connection, MessageSink};
use super::registry::{ConnectionRegistry, RegistryHandle};

/// Lifecycle of one `CreateStream` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Registering,
    Active,
    Terminating,
    Closed,
}

/// Long-lived handler behind one outbound stream.
///
/// The session only keeps the stream alive: delivery happens out of band when
/// the dispatcher pushes into the connection's sink. It ends on the first of
/// (a) the connection's failure signal or (b) the transport reporting that the
/// peer went away. Both paths deregister exactly once; dropping an
/// unfinished session deregisters too.
pub struct StreamSession {
    state: SessionState,
    registry: Arc<ConnectionRegistry>,
    conn: Arc<Connection>,
    failure: Option<oneshot::Receiver<ChatcastError>>,
    handle: Option<RegistryHandle>,
}

impl StreamSession {
    /// Registering -> Active.
    pub fn register(registry: Arc<ConnectionRegistry>, user: &User, sink: Arc<dyn MessageSink>) -> Self {
        let (conn, failure) = Connection::new(user, sink);
        let mut session = Self {
            state: SessionState::Registering,
            registry,
            conn,
            failure: Some(failure),
            handle: None,
        };
        session.handle = Some(session.registry.register(Arc::clone(&session.conn)));
        session.state = SessionState::Active;
        tracing::info!(conn_id = %user.id, name = %user.name, "stream session active");
        session
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.conn
    }

    /// Suspend until the connection fails or `peer_gone` resolves, then
    /// deregister and close.
    ///
    /// Returns the delivery error that evicted the connection, or `Ok(())`
    /// when the transport ended the call.
    pub async fn run_until<F>(mut self, peer_gone: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let failure = self
            .failure
            .take()
            .ok_or_else(|| ChatcastError::Internal("session already ran".into()))?;

        let outcome = tokio::select! {
            signal = failure => match signal {
                Ok(err) => Err(err),
                // sender dropped without firing: connection is gone
                Err(_) => Ok(()),
            },
            _ = peer_gone => Ok(()),
        };

        self.terminate();
        match &outcome {
            Ok(()) => tracing::info!(conn_id = %self.conn.id(), "stream closed by peer"),
            Err(e) => tracing::info!(conn_id = %self.conn.id(), error = %e, "stream evicted"),
        }
        outcome
    }

    /// Terminating -> Closed.
    fn terminate(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.state = SessionState::Terminating;
            self.registry.deregister(&handle);
        }
        self.state = SessionState::Closed;
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.terminate();
    }
}
