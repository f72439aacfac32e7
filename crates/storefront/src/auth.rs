//! # Auth Session
//!
//! In-memory login state shared by the HTTP client (bearer token) and the cart client (gating).
//! The token is not persisted: a new process starts logged out.

use crate::api::{ApiError, StorefrontApi};
use crate::model::{Credentials, User};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

/// Cloneable handle to the login state. All clones see the same state.
#[derive(Clone)]
pub struct Session {
    state: Arc<watch::Sender<AuthState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: Arc::new(watch::Sender::new(AuthState::default())),
        }
    }

    pub fn login_success(&self, user: User, token: String) {
        info!(username = %user.username, "Logged in");
        self.state.send_replace(AuthState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        });
    }

    pub fn logout(&self) {
        info!("Logged out");
        self.state.send_replace(AuthState::default());
    }

    /// Exchanges `credentials` for a token and records the result on success.
    #[instrument(skip(self, api))]
    pub async fn login(
        &self,
        api: &dyn StorefrontApi,
        credentials: Credentials,
    ) -> Result<User, ApiError> {
        match api.login(&credentials).await {
            Ok(grant) => {
                self.login_success(grant.user.clone(), grant.token);
                Ok(grant.user)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                Err(e)
            }
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;

    #[test]
    fn test_login_success_and_logout() {
        let session = Session::new();
        let observer = session.subscribe();
        assert!(!session.is_authenticated());

        session.login_success(User::new("ada"), "t-1".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token().as_deref(), Some("t-1"));
        assert_eq!(observer.borrow().user, Some(User::new("ada")));

        session.logout();
        assert_eq!(session.state(), AuthState::default());
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let other = session.clone();
        other.login_success(User::new("ada"), "t-1".to_string());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_through_api() {
        let api = MockApi::default();
        let session = Session::new();

        let user = session
            .login(&api, Credentials::new("ada", "secret"))
            .await
            .unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(session.bearer_token().as_deref(), Some("token-ada"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let api = MockApi::default();
        let session = Session::new();

        let result = session.login(&api, Credentials::new("ada", "")).await;
        assert_eq!(result.unwrap_err().status(), Some(401));
        assert!(!session.is_authenticated());
    }
}
