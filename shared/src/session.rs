//! Navigation-level session gate.
//!
//! The session provider (sign-in, sign-out, change notifications) is an
//! external service; this module only holds the per-tab state machine
//! that decides, on every navigation, whether the user may proceed or
//! must be redirected. Keeping it as a pure state machine lets the
//! frontend test the gating rules without a live provider.
//!
//! This gate is a UX convenience, not authorization: the CRUD endpoints
//! themselves are not gated.

/// Path of the sign-in page, the only page an unauthenticated user may visit.
pub const SIGN_IN_PATH: &str = "/login";

/// Default landing page for signed-in users.
pub const LANDING_PATH: &str = "/";

/// Authentication state of one browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Change notification from the session provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    SessionExpired,
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    RedirectToSignIn,
    RedirectToLanding,
}

/// The session gate: feed it provider events, ask it about navigations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGate {
    state: SessionState,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Apply a change notification from the session provider.
    pub fn apply(&mut self, event: AuthEvent) {
        self.state = match event {
            AuthEvent::SignedIn => SessionState::Authenticated,
            AuthEvent::SignedOut | AuthEvent::SessionExpired => SessionState::Unauthenticated,
        };
    }

    /// Decide what a navigation to `path` should do in the current state.
    ///
    /// Unauthenticated users are sent to the sign-in page from anywhere
    /// else; authenticated users are bounced off the sign-in page back
    /// to the landing page.
    pub fn decide(&self, path: &str) -> GateDecision {
        let is_sign_in_page = path == SIGN_IN_PATH;
        match self.state {
            SessionState::Unauthenticated if !is_sign_in_page => GateDecision::RedirectToSignIn,
            SessionState::Authenticated if is_sign_in_page => GateDecision::RedirectToLanding,
            _ => GateDecision::Proceed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unauthenticated() {
        let gate = SessionGate::new();
        assert_eq!(gate.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn unauthenticated_is_redirected_to_sign_in() {
        let gate = SessionGate::new();
        assert_eq!(gate.decide(LANDING_PATH), GateDecision::RedirectToSignIn);
        assert_eq!(gate.decide("/report/3"), GateDecision::RedirectToSignIn);
        assert_eq!(gate.decide(SIGN_IN_PATH), GateDecision::Proceed);
    }

    #[test]
    fn authenticated_is_bounced_off_the_sign_in_page() {
        let mut gate = SessionGate::new();
        gate.apply(AuthEvent::SignedIn);
        assert_eq!(gate.decide(SIGN_IN_PATH), GateDecision::RedirectToLanding);
        assert_eq!(gate.decide(LANDING_PATH), GateDecision::Proceed);
        assert_eq!(gate.decide("/add-report"), GateDecision::Proceed);
    }

    #[test]
    fn sign_out_and_expiry_both_drop_the_session() {
        let mut gate = SessionGate::new();
        gate.apply(AuthEvent::SignedIn);
        gate.apply(AuthEvent::SignedOut);
        assert_eq!(gate.state(), SessionState::Unauthenticated);

        gate.apply(AuthEvent::SignedIn);
        gate.apply(AuthEvent::SessionExpired);
        assert_eq!(gate.decide("/report/1"), GateDecision::RedirectToSignIn);
    }

    #[test]
    fn repeated_events_are_idempotent() {
        let mut gate = SessionGate::new();
        gate.apply(AuthEvent::SignedIn);
        gate.apply(AuthEvent::SignedIn);
        assert_eq!(gate.state(), SessionState::Authenticated);
        gate.apply(AuthEvent::SignedOut);
        gate.apply(AuthEvent::SessionExpired);
        assert_eq!(gate.state(), SessionState::Unauthenticated);
    }
}
