//! Session identifiers

use uuid::Uuid;

/// Opaque unique token identifying one viewing session
///
/// Backed by a random v4 UUID, so ids are practically unique without any
/// coordination. Viewers hold on to the id to resume a stream after a
/// transport hiccup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random id
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its string form
    ///
    /// Returns `None` for anything that is not a well-formed UUID. Callers
    /// surface that as a malformed-request error rather than a lookup miss.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
