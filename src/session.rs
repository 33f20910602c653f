//! Login session state with on-disk token persistence.
//!
//! An [`AuthSession`] tracks the access token, the user payload, the last
//! login error and whether a login is in flight. The token is written to a
//! file on login and removed on logout, so a later run can restore it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::client::{ClientError, HrApiClient};
use crate::models::LoginCredentials;

/// Shown when a login fails without a server message.
pub const LOGIN_FAILED: &str = "Login Failed";

/// Authentication state for one user of the client.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    token: Option<String>,
    user: Option<Value>,
    error: Option<String>,
    loading: bool,
    token_path: PathBuf,
}

impl AuthSession {
    /// An unauthenticated session persisting to `token_path`.
    pub fn new(token_path: impl Into<PathBuf>) -> Self {
        Self {
            token: None,
            user: None,
            error: None,
            loading: false,
            token_path: token_path.into(),
        }
    }

    /// Restores a session from the token file.
    ///
    /// A missing or blank file yields an unauthenticated session.
    pub fn restore(token_path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let mut session = Self::new(token_path);
        match fs::read_to_string(&session.token_path) {
            Ok(content) => {
                let token = content.trim();
                if !token.is_empty() {
                    session.token = Some(token.to_string());
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(session)
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The access token, if authenticated.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The user payload, if one was set.
    pub fn user(&self) -> Option<&Value> {
        self.user.as_ref()
    }

    /// The last login error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a login is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Where the token is persisted.
    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// A copy of `client` carrying this session's token.
    pub fn authorize(&self, client: &HrApiClient) -> HrApiClient {
        let mut client = client.clone();
        client.set_token(self.token.clone());
        client
    }

    /// Logs in with the password grant.
    ///
    /// On success the token is held and persisted. On failure the token is
    /// cleared and [`error`](Self::error) holds the server message or
    /// [`LOGIN_FAILED`].
    pub async fn login(
        &mut self,
        client: &HrApiClient,
        credentials: &LoginCredentials,
    ) -> Result<(), ClientError> {
        self.loading = true;
        self.error = None;

        let result = client.login(credentials).await;
        self.loading = false;

        match result {
            Ok(token) => {
                if let Err(e) = self.persist_token(&token.access_token) {
                    warn!(path = %self.token_path.display(), error = %e, "Could not persist access token");
                }
                self.token = Some(token.access_token);
                info!(username = %credentials.username, "Logged in");
                Ok(())
            }
            Err(e) => {
                self.token = None;
                let message = e.user_message(LOGIN_FAILED);
                warn!(username = %credentials.username, error = %message, "Login failed");
                self.error = Some(message);
                Err(e)
            }
        }
    }

    /// Fetches the user payload for the current token and stores it.
    pub async fn refresh_user(&mut self, client: &HrApiClient) -> Result<&Value, ClientError> {
        let user = self.authorize(client).test_token().await?;
        let user = self.user.insert(user);
        Ok(&*user)
    }

    /// Clears all state and deletes the persisted token.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.token = None;
        self.user = None;
        self.error = None;
        match fs::remove_file(&self.token_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!("Logged out");
        Ok(())
    }

    /// Sets the user payload.
    pub fn set_user(&mut self, user: Value) {
        self.user = Some(user);
    }

    /// Clears the last login error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn persist_token(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.token_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.token_path, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::Client;
    use serde_json::json;
    use url::Url;

    fn client(server: &MockServer) -> HrApiClient {
        HrApiClient::new(
            Url::parse(&server.url("/")).expect("url"),
            Client::builder().build().expect("client"),
        )
    }

    #[test]
    fn restore_without_file_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let session = AuthSession::restore(dir.path().join("token")).unwrap();
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
    }

    #[test]
    fn restore_with_token_file_is_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "stored-jwt\n").unwrap();

        let session = AuthSession::restore(&path).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("stored-jwt"));
    }

    #[tokio::test]
    async fn login_success_persists_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/token");
                then.status(200)
                    .json_body(json!({"access_token": "fresh-jwt", "token_type": "bearer"}));
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token");
        let mut session = AuthSession::new(&path);
        session
            .login(&client(&server), &LoginCredentials::new("admin", "secret"))
            .await
            .expect("login");

        assert!(session.is_authenticated());
        assert_eq!(session.error(), None);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh-jwt");

        let restored = AuthSession::restore(&path).unwrap();
        assert_eq!(restored.token(), Some("fresh-jwt"));
    }

    #[tokio::test]
    async fn login_failure_sets_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/token");
                then.status(400)
                    .json_body(json!({"detail": "Incorrect username or password"}));
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut session = AuthSession::new(dir.path().join("token"));
        let result = session
            .login(&client(&server), &LoginCredentials::new("admin", "nope"))
            .await;

        assert!(result.is_err());
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(session.error(), Some("Incorrect username or password"));

        session.clear_error();
        assert_eq!(session.error(), None);
    }

    #[tokio::test]
    async fn login_failure_without_detail_uses_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/token");
                then.status(500).body("oops");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut session = AuthSession::new(dir.path().join("token"));
        let _ = session
            .login(&client(&server), &LoginCredentials::new("admin", "x"))
            .await;
        assert_eq!(session.error(), Some(LOGIN_FAILED));
    }

    #[tokio::test]
    async fn refresh_user_sends_session_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/test-token")
                    .header("authorization", "Bearer stored-jwt");
                then.status(200)
                    .json_body(json!({"username": "admin", "is_active": true}));
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "stored-jwt").unwrap();
        let mut session = AuthSession::restore(&path).unwrap();

        let user = session.refresh_user(&client(&server)).await.expect("user");
        assert_eq!(user["username"], "admin");
        mock.assert_async().await;
        assert!(session.user().is_some());
    }

    #[test]
    fn logout_clears_state_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "jwt").unwrap();

        let mut session = AuthSession::restore(&path).unwrap();
        session.set_user(json!({"username": "admin"}));
        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!path.exists());

        // A second logout with no file is fine.
        session.logout().unwrap();
    }
}
