//! Session registry implementation
//!
//! The central table of live viewing sessions. Handlers create, resume and
//! stop sessions here; pacer loops poll their active flag and touch the
//! heartbeat; the watchdog scans snapshots for sessions to reap.

use std::collections::HashMap;
use std::time::Instant;

use parking_lot::Mutex;

use super::error::SessionError;
use super::id::SessionId;
use super::record::Session;

/// Central registry for all live viewing sessions
///
/// Thread-safe via a single mutex. Every method locks, does its work
/// without blocking on I/O, and returns, so operations form a total order
/// and readers never see torn state.
#[derive(Default)]
pub struct SessionRegistry {
    /// Map of session id to session record
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh session
    ///
    /// The new session starts active, with no heartbeat and no indicator
    /// claim. Cannot fail.
    pub fn create(&self) -> SessionId {
        let id = SessionId::generate();
        let mut sessions = self.sessions.lock();
        sessions.insert(id, Session::new(id));

        tracing::info!(session = %id, total = sessions.len(), "Session created");
        id
    }

    /// Mark an existing session active again
    ///
    /// Fails with [`SessionError::NotFound`] if the id is unknown or was
    /// already reaped; callers surface that as a client-visible error
    /// rather than silently retrying.
    pub fn resume(&self, id: SessionId) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock();

        match sessions.get_mut(&id) {
            Some(session) => {
                session.active = true;
                tracing::info!(session = %id, "Session resumed");
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    /// Grant the session a claim on the shared indicator
    ///
    /// Called by the transport layer after `create`/`resume` succeeds and
    /// before the arbiter is applied. Fails if the session was reaped in
    /// between.
    pub fn reserve(&self, id: SessionId) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock();

        match sessions.get_mut(&id) {
            Some(session) => {
                session.led_reserved = true;
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    /// Record a successful frame delivery
    ///
    /// No-op if the session no longer exists; an in-flight frame may race
    /// with a concurrent reap.
    pub fn heartbeat(&self, id: SessionId) {
        let mut sessions = self.sessions.lock();

        if let Some(session) = sessions.get_mut(&id) {
            session.last_heartbeat = Some(Instant::now());
        }
    }

    /// Stop a session and remove it from the table
    ///
    /// Clears the indicator claim as part of removal. Idempotent: stopping
    /// an unknown or already-stopped id is a silent no-op. Returns whether
    /// a session was actually removed.
    pub fn stop(&self, id: SessionId) -> bool {
        let mut sessions = self.sessions.lock();

        match sessions.remove(&id) {
            Some(_) => {
                tracing::info!(session = %id, remaining = sessions.len(), "Session stopped");
                true
            }
            None => false,
        }
    }

    /// Stop and remove every session atomically
    ///
    /// Returns the number of sessions removed.
    pub fn stop_all(&self) -> usize {
        let mut sessions = self.sessions.lock();
        let stopped = sessions.len();
        sessions.clear();

        if stopped > 0 {
            tracing::info!(stopped, "All sessions stopped");
        }
        stopped
    }

    /// Point-in-time view of every session, ordered by creation time
    ///
    /// Ties are broken by id so the order is stable for status output.
    pub fn snapshot(&self) -> Vec<Session> {
        let sessions = self.sessions.lock();
        let mut list: Vec<Session> = sessions.values().cloned().collect();
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }

    /// Whether the session exists and is permitted to keep producing
    ///
    /// This is the pacer loop's cancellation predicate.
    pub fn is_active(&self, id: SessionId) -> bool {
        let sessions = self.sessions.lock();
        sessions.get(&id).map(|s| s.active).unwrap_or(false)
    }

    /// Number of sessions currently holding an indicator claim
    pub fn reserved_count(&self) -> usize {
        let sessions = self.sessions.lock();
        sessions.values().filter(|s| s.led_reserved).count()
    }

    /// Number of registered sessions
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Whether no sessions are registered
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
