//! Session types: the data structures that represent who is logged in.

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The authenticated user's identity.
///
/// Created on successful login, held exclusively by the
/// [`SessionManager`](crate::SessionManager), destroyed on logout. Nothing
/// else in the client ever stores a "current user" of its own — components
/// that need the username read it through a
/// [`SessionHandle`](crate::SessionHandle) at the moment they need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The username the service authenticated.
    pub username: String,
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The client's authentication state.
///
/// A two-state machine with exactly one instance per client:
///
/// ```text
///   Unauthenticated ──(login success)──→ Authenticated
///          ↑                                   │
///          └──────────(logout)─────────────────┘
/// ```
///
/// Only the [`SessionManager`](crate::SessionManager) writes this value,
/// and every transition is applied compare-and-set style: the transition is
/// rejected if the state moved while the network exchange was in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No user is logged in. Room, message, and presence operations are
    /// all invalid in this state and fail before any network call.
    Unauthenticated,

    /// A user is logged in.
    Authenticated(Identity),
}

impl SessionState {
    /// Returns `true` if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}
