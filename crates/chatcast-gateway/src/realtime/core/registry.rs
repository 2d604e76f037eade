use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::connection::Connection;

/// Token returned by [`ConnectionRegistry::register`], used to deregister.
///
/// Keyed by registration sequence, so two sessions registered under the same
/// user id stay independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryHandle {
    seq: u64,
    id: String,
}

/// Active outbound streams.
///
/// - `seq -> Connection`, ordered by registration
/// - one mutex covers register, deregister and snapshot
pub struct ConnectionRegistry {
    entries: Mutex<BTreeMap<u64, Arc<Connection>>>,
    seq: AtomicU64,
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            seq: AtomicU64::new(1),
        }
    }

    // Every critical section is a single map operation, so a poisoned lock
    // never guards a torn map.
    fn entries(&self) -> MutexGuard<'_, BTreeMap<u64, Arc<Connection>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, conn: Arc<Connection>) -> RegistryHandle {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let handle = RegistryHandle {
            seq,
            id: conn.id().to_string(),
        };
        self.entries().insert(seq, conn);
        tracing::debug!(conn_id = %handle.id, seq, "connection registered");
        handle
    }

    /// Remove the entry behind `handle`. Returns `false` if it was already gone.
    pub fn deregister(&self, handle: &RegistryHandle) -> bool {
        let removed = self.entries().remove(&handle.seq).is_some();
        if removed {
            tracing::debug!(conn_id = %handle.id, seq = handle.seq, "connection deregistered");
        }
        removed
    }

    /// Point-in-time copy of the active set, in registration order.
    pub fn snapshot(&self) -> Vec<Arc<Connection>> {
        self.entries().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::core::connection::MessageSink;
    use async_trait::async_trait;
    use chatcast_core::{Message, Result, User};

    struct NullSink;

    #[async_trait]
    impl MessageSink for NullSink {
        async fn push(&self, _msg: &Message) -> Result<()> {
            Ok(())
        }
    }

    fn conn(id: &str) -> Arc<Connection> {
        Connection::new(&User::new(id, id), Arc::new(NullSink)).0
    }

    #[test]
    fn snapshot_keeps_registration_order() {
        let reg = ConnectionRegistry::new();
        for id in ["c", "a", "b"] {
            reg.register(conn(id));
        }
        let ids: Vec<String> = reg.snapshot().iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn default_matches_new() {
        let reg = ConnectionRegistry::default();
        let h = reg.register(conn("a"));
        assert_eq!(h.seq, 1);
    }

    #[test]
    fn deregister_twice_is_noop() {
        let reg = ConnectionRegistry::new();
        let h = reg.register(conn("a"));
        assert!(reg.deregister(&h));
        assert!(!reg.deregister(&h));
        assert!(reg.is_empty());
    }

    #[test]
    fn same_id_registers_independently() {
        let reg = ConnectionRegistry::new();
        let first = reg.register(conn("dup"));
        let second = reg.register(conn("dup"));
        assert_ne!(first, second);
        assert_eq!(reg.len(), 2);

        reg.deregister(&first);
        let left = reg.snapshot();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id(), "dup");
        assert_eq!(second.id, "dup");
        assert_eq!(second.seq, first.seq + 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let reg = ConnectionRegistry::new();
        let h = reg.register(conn("a"));
        let snap = reg.snapshot();
        reg.deregister(&h);
        reg.register(conn("b"));
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].id(), "a");
    }
}
