//! Current-user session and its derived authorization flags.
//!
//! The controller is the single writer of [`SessionState`]; any number of
//! readers observe it through [`SessionController::subscribe`] (a
//! `tokio::sync::watch` channel) or take a snapshot with
//! [`SessionController::current`].
//!
//! ```text
//!   Initializing --restore()--> Authenticated
//!        |                           |
//!        +--------> Anonymous <------+  logout() / 401
//! ```
//!
//! State-changing calls on one controller must not overlap; each runs to
//! completion before the next begins.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CashMeError, ErrorKind, RequestError, Result};
use crate::rest::CashMeHttpClient;
use crate::token_store::{Credential, TokenStore};
use crate::types::{AuthResponse, RegisterRequest, RoleSet, UserProfile};

/// An authenticated user and what they may do.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub is_admin: bool,
    pub is_owner: bool,
}

impl Session {
    pub fn from_profile(user: UserProfile) -> Self {
        let is_admin = user.roles.is_admin();
        let is_owner = user.roles.is_owner();
        Self {
            user,
            is_admin,
            is_owner,
        }
    }

    pub fn roles(&self) -> &RoleSet {
        &self.user.roles
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup; no authorization decision may be made yet.
    Initializing,
    Authenticated(Session),
    Anonymous,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Initializing)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(s) => Some(s),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_some_and(|s| s.is_admin)
    }

    pub fn is_owner(&self) -> bool {
        self.session().is_some_and(|s| s.is_owner)
    }
}

/// Result of [`SessionController::restore`].
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    Authenticated,
    /// No credential, or the server rejected it (the credential is cleared).
    Anonymous,
    /// The profile fetch failed transiently. The credential is kept and
    /// `restore()` may be called again.
    Deferred(RequestError),
}

/// Owns the current user's identity and the stored credential's lifecycle.
pub struct SessionController {
    http: Arc<CashMeHttpClient>,
    state: watch::Sender<SessionState>,
}

impl SessionController {
    pub fn new(http: Arc<CashMeHttpClient>) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self { http, state }
    }

    fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.http.token_store()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Wait until the state has left `Initializing`.
    pub async fn ready(&self) -> SessionState {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|s| !s.is_loading()).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so it cannot have been dropped.
            Err(_) => self.current(),
        };
        state
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn is_owner(&self) -> bool {
        self.state.borrow().is_owner()
    }

    /// Rebuild the session from the stored credential. Called at startup.
    ///
    /// Authentication-class failures clear the credential. Transient
    /// failures (network, timeout, 5xx) keep it and report `Deferred`.
    pub async fn restore(&self) -> RestoreOutcome {
        if self.tokens().get().is_none() {
            debug!("no stored credential");
            self.set_state(SessionState::Anonymous);
            return RestoreOutcome::Anonymous;
        }

        match self.http.get_profile().await {
            Ok(profile) => {
                self.authenticate(profile);
                RestoreOutcome::Authenticated
            }
            Err(CashMeError::Request(e)) if e.is_retry_safe() => {
                warn!(kind = ?e.kind, error = %e, "session restore deferred, keeping credential");
                self.set_state(SessionState::Anonymous);
                RestoreOutcome::Deferred(e)
            }
            Err(e) => {
                warn!(error = %e, "stored session invalid");
                self.tokens().clear();
                self.set_state(SessionState::Anonymous);
                RestoreOutcome::Anonymous
            }
        }
    }

    /// Log in with email and password.
    ///
    /// The profile is fetched after the token is stored; the login response's
    /// own user fields are not used for the session. A failed login call
    /// leaves all state untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let response = self.http.login(email, password).await?;
        let token = response.token.clone().ok_or(CashMeError::MissingToken)?;
        self.establish(&Credential::new(token)).await?;
        Ok(response)
    }

    /// Create an account and log into it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let response = self.http.register(request).await?;
        let token = response.token.clone().ok_or(CashMeError::MissingToken)?;
        self.establish(&Credential::new(token)).await?;
        Ok(response)
    }

    /// Log in with a token handed back by an identity provider.
    ///
    /// The token is stored before the profile fetch is issued.
    pub async fn login_with_token(&self, token: &str) -> Result<Session> {
        if token.trim().is_empty() {
            return Err(CashMeError::InvalidCallback("empty token".into()));
        }
        self.establish(&Credential::new(token.trim())).await
    }

    /// Complete an identity-provider redirect such as
    /// `/oauth2/redirect?token=<credential>`.
    pub async fn login_from_callback(&self, callback: &str) -> Result<Session> {
        let token = token_from_callback(callback)?;
        self.login_with_token(&token).await
    }

    /// Drop the credential and the session. Cannot fail.
    pub fn logout(&self) {
        self.tokens().clear();
        self.set_state(SessionState::Anonymous);
        info!("logged out");
    }

    /// Re-fetch the profile for an authenticated session.
    pub async fn refresh(&self) -> Result<Session> {
        match self.http.get_profile().await {
            Ok(profile) => Ok(self.authenticate(profile)),
            Err(e) => {
                self.invalidate_on(&e);
                Err(e)
            }
        }
    }

    /// Replace the user after an edit made elsewhere; flags are re-derived.
    pub fn set_user(&self, profile: UserProfile) -> Session {
        self.authenticate(profile)
    }

    /// End the session if `err` says the credential is no longer valid.
    /// Returns whether the session was invalidated.
    pub fn invalidate_on(&self, err: &CashMeError) -> bool {
        if err.kind() == Some(ErrorKind::Authentication) {
            warn!(error = %err, "credential rejected, ending session");
            self.logout();
            true
        } else {
            false
        }
    }

    async fn establish(&self, credential: &Credential) -> Result<Session> {
        self.tokens().set(credential)?;

        match self.http.get_profile().await {
            Ok(profile) => Ok(self.authenticate(profile)),
            Err(e) => {
                let transient = e.request().is_some_and(RequestError::is_retry_safe);
                if !transient {
                    self.tokens().clear();
                }
                warn!(error = %e, kept_credential = transient, "profile fetch failed");
                self.set_state(SessionState::Anonymous);
                Err(e)
            }
        }
    }

    fn authenticate(&self, profile: UserProfile) -> Session {
        let session = Session::from_profile(profile);
        info!(
            user = %session.user.user_name,
            admin = session.is_admin,
            owner = session.is_owner,
            "session authenticated"
        );
        self.set_state(SessionState::Authenticated(session.clone()));
        session
    }

    fn set_state(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}

/// Extract the `token` query parameter from an identity-provider redirect.
/// Accepts absolute URLs and bare paths.
pub fn token_from_callback(callback: &str) -> Result<String> {
    let base = Url::parse("http://localhost/")
        .map_err(|e| CashMeError::InvalidCallback(e.to_string()))?;
    let url = base
        .join(callback)
        .map_err(|e| CashMeError::InvalidCallback(e.to_string()))?;

    url.query_pairs()
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CashMeError::InvalidCallback("no token in redirect".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_absolute_callback() {
        let token = token_from_callback("http://localhost:5173/oauth2/redirect?token=jwt123").unwrap();
        assert_eq!(token, "jwt123");
    }

    #[test]
    fn test_token_from_relative_callback() {
        let token = token_from_callback("/oauth2/redirect?state=x&token=a%2Bb").unwrap();
        assert_eq!(token, "a+b");
    }

    #[test]
    fn test_callback_without_token() {
        assert!(matches!(
            token_from_callback("/oauth2/redirect?error=denied"),
            Err(CashMeError::InvalidCallback(_))
        ));
        assert!(token_from_callback("/oauth2/redirect?token=").is_err());
    }

    #[test]
    fn test_state_flags() {
        assert!(SessionState::Initializing.is_loading());
        assert!(!SessionState::Anonymous.is_loading());
        assert!(!SessionState::Anonymous.is_admin());
        assert!(SessionState::Anonymous.user().is_none());
    }
}
