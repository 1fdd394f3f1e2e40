//! The session manager: owner of the client's authentication state.
//!
//! This is the central piece of the session layer. It's responsible for:
//! - Requesting account creation (which does not log the user in)
//! - Logging in (`Unauthenticated → Authenticated`)
//! - Logging out, which invalidates everything scoped to the session
//!
//! # Concurrency note
//!
//! The state lives in a plain `std::sync::Mutex` that is **never held
//! across an await** — every critical section is a handful of loads and
//! stores. The calling layer may issue operations concurrently from
//! multiple tasks; transitions are applied compare-and-set style against a
//! generation counter, so a completion that arrives after the state has
//! moved is rejected with
//! [`SessionError::ConcurrentModification`] instead of clobbering it.
//!
//! The generation counter doubles as the cascade mechanism: the room layer
//! tags its state with the generation it was entered under, and a logout
//! (generation bump) silently kills that room, its message buffer, and its
//! presence snapshot without this crate ever touching them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use roomrealm_gateway::Gateway;
use roomrealm_protocol::{ConnectAccountRequest, CreateAccountRequest};

use crate::{Identity, SessionError, SessionState};

/// The shared session slot: the state plus the generation it is at.
///
/// `generation` increments on every successful transition (login, logout).
/// An operation snapshots it before awaiting the gateway and re-validates
/// it after; a mismatch means someone else transitioned in the meantime.
struct Shared {
    state: SessionState,
    generation: u64,
}

/// Locks a session slot, recovering from a poisoned mutex.
///
/// Critical sections contain no code that can panic, so poisoning can only
/// come from a panic elsewhere in the holder's task; the data itself is
/// always consistent.
fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Manages the client's one session.
///
/// ## Lifecycle
///
/// ```text
/// create_account() ─╴(no state change)
/// login() ──────────→ Authenticated ──────→ logout() ──→ Unauthenticated
///                         │                                  │
///                         └── generation += 1 ───────────────┘
/// ```
///
/// Cheap to share: both fields are `Arc`s. Clone it or wrap it in an `Arc`
/// to call it from multiple tasks.
pub struct SessionManager<G> {
    gateway: Arc<G>,
    shared: Arc<Mutex<Shared>>,
}

impl<G> Clone for SessionManager<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<G: Gateway> SessionManager<G> {
    /// Creates a new, unauthenticated session manager over the gateway.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            shared: Arc::new(Mutex::new(Shared {
                state: SessionState::Unauthenticated,
                generation: 0,
            })),
        }
    }

    /// Returns a read-only handle for the layers built on this session.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Returns a snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        lock(&self.shared).state.clone()
    }

    /// Requests account creation from the service.
    ///
    /// Creating an account does NOT log the user in — the service's flow is
    /// two-step (create, then connect), and this layer preserves it.
    /// `SessionState` is never touched here, success or failure.
    ///
    /// # Errors
    /// - [`SessionError::Auth`] — the service rejected the registration
    ///   (username taken, malformed credentials)
    /// - [`SessionError::Gateway`] — transport failure
    /// - [`SessionError::Protocol`] — rejection without an explanation
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        let resp = self
            .gateway
            .create_account(CreateAccountRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        if resp.success {
            tracing::info!(username, "account created");
            Ok(())
        } else {
            Err(SessionError::Auth(resp.rejection()?.to_string()))
        }
    }

    /// Logs in as `username`.
    ///
    /// The service authenticates by name alone at this step — no password.
    /// That asymmetry (create requires one, connect doesn't) is the
    /// service's observed contract, preserved deliberately.
    ///
    /// Logging in again under the name that is already authenticated is an
    /// idempotent success and performs no network call. Logging in under a
    /// different name while authenticated is an error; log out first.
    ///
    /// On any failure the state is exactly what it was before the call.
    ///
    /// # Errors
    /// - [`SessionError::Auth`] — the service doesn't recognize the user
    /// - [`SessionError::AlreadyAuthenticated`] — logged in as someone else
    /// - [`SessionError::ConcurrentModification`] — the session moved while
    ///   the request was in flight (e.g. an overlapping login won the race)
    /// - [`SessionError::Gateway`] — transport failure
    pub async fn login(&self, username: &str) -> Result<(), SessionError> {
        // Phase 1: check the precondition and snapshot the generation.
        let observed = {
            let shared = lock(&self.shared);
            match &shared.state {
                SessionState::Authenticated(id)
                    if id.username == username =>
                {
                    return Ok(());
                }
                SessionState::Authenticated(id) => {
                    return Err(SessionError::AlreadyAuthenticated(
                        id.username.clone(),
                    ));
                }
                SessionState::Unauthenticated => shared.generation,
            }
        };

        // Phase 2: the remote exchange. No lock is held here.
        let resp = self
            .gateway
            .connect_account(ConnectAccountRequest {
                username: username.to_string(),
            })
            .await?;

        if !resp.success {
            return Err(SessionError::Auth(resp.rejection()?.to_string()));
        }

        // Phase 3: compare-and-set. Apply only if nothing moved meanwhile.
        let mut shared = lock(&self.shared);
        if shared.generation != observed {
            return Err(SessionError::ConcurrentModification);
        }
        shared.state = SessionState::Authenticated(Identity {
            username: username.to_string(),
        });
        shared.generation += 1;
        tracing::info!(username, "logged in");
        Ok(())
    }

    /// Logs out. Purely local: there is no remote logout verb.
    ///
    /// Bumps the generation, which invalidates the active room, its
    /// inbound buffer, and its presence snapshot — room membership does
    /// not persist across logout. Logging out while already
    /// unauthenticated is a no-op.
    pub fn logout(&self) {
        let mut shared = lock(&self.shared);
        if let SessionState::Authenticated(id) = &shared.state {
            tracing::info!(username = %id.username, "logged out");
            shared.state = SessionState::Unauthenticated;
            shared.generation += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

/// A read-only view of the session, for the layers built on top of it.
///
/// The room, message, and presence components consult this before acting
/// and tag their own state with the generation they observed. The handle
/// cannot mutate the session — `SessionState` has exactly one writer.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<Mutex<Shared>>,
}

impl SessionHandle {
    /// Returns a snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        lock(&self.shared).state.clone()
    }

    /// Returns the current generation counter.
    pub fn generation(&self) -> u64 {
        lock(&self.shared).generation
    }

    /// Returns the authenticated username and the generation it was
    /// observed at, or `None` while unauthenticated.
    ///
    /// The pair is read under one lock, so the username and generation are
    /// consistent with each other — important for callers that tag state
    /// with the generation.
    pub fn authenticated(&self) -> Option<(String, u64)> {
        let shared = lock(&self.shared);
        match &shared.state {
            SessionState::Authenticated(id) => {
                Some((id.username.clone(), shared.generation))
            }
            SessionState::Unauthenticated => None,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
