//! Authentication models for the OAuth2 password-grant token endpoint.

use serde::{Deserialize, Serialize};

/// Access token returned by `POST /api/v1/token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The bearer token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    pub token_type: String,
}

/// Form body for the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
    /// OAuth2 grant type; `password` when not given.
    pub grant_type: Option<String>,
    /// Requested scope; empty when not given.
    pub scope: Option<String>,
    /// Optional OAuth2 client id.
    pub client_id: Option<String>,
    /// Optional OAuth2 client secret.
    pub client_secret: Option<String>,
}

impl LoginCredentials {
    /// Credentials with every optional field left to its default.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            grant_type: None,
            scope: None,
            client_id: None,
            client_secret: None,
        }
    }

    /// Builds the `application/x-www-form-urlencoded` pairs.
    ///
    /// Client id and secret are omitted when empty.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            (
                "grant_type",
                self.grant_type
                    .clone()
                    .filter(|g| !g.is_empty())
                    .unwrap_or_else(|| "password".to_string()),
            ),
            ("scope", self.scope.clone().unwrap_or_default()),
        ];
        if let Some(client_id) = self.client_id.as_ref().filter(|c| !c.is_empty()) {
            fields.push(("client_id", client_id.clone()));
        }
        if let Some(secret) = self.client_secret.as_ref().filter(|s| !s.is_empty()) {
            fields.push(("client_secret", secret.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_apply_defaults() {
        let creds = LoginCredentials::new("admin", "secret");
        let fields = creds.form_fields();
        assert_eq!(
            fields,
            vec![
                ("username", "admin".to_string()),
                ("password", "secret".to_string()),
                ("grant_type", "password".to_string()),
                ("scope", String::new()),
            ]
        );
    }

    #[test]
    fn test_form_fields_include_client_when_present() {
        let creds = LoginCredentials {
            client_id: Some("web".to_string()),
            client_secret: Some(String::new()),
            scope: Some("hr".to_string()),
            ..LoginCredentials::new("admin", "secret")
        };
        let fields = creds.form_fields();
        assert!(fields.contains(&("client_id", "web".to_string())));
        assert!(fields.contains(&("scope", "hr".to_string())));
        assert!(!fields.iter().any(|(k, _)| *k == "client_secret"));
    }

    #[test]
    fn test_deserialize_token() {
        let token: Token =
            serde_json::from_str(r#"{"access_token": "abc", "token_type": "bearer"}"#).unwrap();
        assert_eq!(token.access_token, "abc");
    }
}
