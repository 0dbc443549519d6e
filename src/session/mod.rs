//! Session registry for viewer lifecycle management
//!
//! The registry is the authoritative table of live viewing sessions and the
//! single source of truth for "is anyone watching". Every other component
//! reads or mutates session state exclusively through it.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<SessionRegistry>
//!                   ┌───────────────────────────┐
//!                   │ sessions: Mutex<HashMap<  │
//!                   │   SessionId, Session {    │
//!                   │     active,               │
//!                   │     led_reserved,         │
//!                   │     last_heartbeat,       │
//!                   │   }                       │
//!                   │ >>                        │
//!                   └─────────────┬─────────────┘
//!                                 │
//!         ┌───────────────────────┼───────────────────────┐
//!         │                       │                       │
//!         ▼                       ▼                       ▼
//!    [HTTP handler]          [Pacer task]           [Watchdog task]
//!    create()/resume()       is_active()            snapshot()
//!    reserve()/stop()        heartbeat()            stop()
//! ```
//!
//! # Locking
//!
//! All operations take the registry's single mutex, mutate or read, and
//! return. No operation performs I/O or awaits while holding the lock, so
//! the registry is safe to call from both async tasks and sync contexts,
//! and its operations are linearizable.

pub mod error;
pub mod id;
pub mod record;
pub mod registry;

pub use error::SessionError;
pub use id::SessionId;
pub use record::Session;
pub use registry::SessionRegistry;
