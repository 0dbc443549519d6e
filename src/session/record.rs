//! Per-session record stored in the registry

use std::time::Instant;

use super::id::SessionId;

/// A single viewer's streaming lifecycle record
///
/// Mutated only through [`SessionRegistry`](super::SessionRegistry) methods;
/// `snapshot()` hands out clones, so a `Session` held outside the registry
/// is a point-in-time view, not live state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session id
    pub id: SessionId,

    /// When the session was created
    pub created_at: Instant,

    /// When the last frame was successfully delivered, `None` until the
    /// first delivery
    pub last_heartbeat: Option<Instant>,

    /// Whether the session's pacer loop is permitted to keep producing
    pub active: bool,

    /// Whether this session holds a claim on the shared indicator
    pub led_reserved: bool,
}

impl Session {
    pub(super) fn new(id: SessionId) -> Self {
        Self {
            id,
            created_at: Instant::now(),
            last_heartbeat: None,
            active: true,
            led_reserved: false,
        }
    }

    /// Time since the session was created
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Time since the last delivered frame, `None` if none was delivered yet
    pub fn heartbeat_age(&self) -> Option<std::time::Duration> {
        self.last_heartbeat.map(|t| t.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(SessionId::generate());

        assert!(session.active);
        assert!(!session.led_reserved);
        assert!(session.last_heartbeat.is_none());
        assert!(session.heartbeat_age().is_none());
    }
}
