//! Async client for the HR REST API.
//!
//! One [`HrApiClient`] talks to every resource under `/api/v1/`. It is cheap
//! to clone and shares a single connection pool. Each call issues exactly one
//! request; there is no retry.

mod error;
mod resources;

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;

pub use error::{ClientError, extract_detail_message};
pub use resources::LeaveFilter;

/// Default page size for list calls.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Offset and page size sent with every list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// Rows to skip.
    pub skip: u32,
    /// Maximum rows to return.
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ListParams {
    /// Parameters for an explicit window.
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    fn append_to(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("skip", &self.skip.to_string())
            .append_pair("limit", &self.limit.to_string());
    }
}

/// Client for the HR REST API.
#[derive(Debug, Clone)]
pub struct HrApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl HrApiClient {
    /// Creates a client over an existing HTTP instance.
    ///
    /// `base_url` is the server root; a trailing slash is added if missing so
    /// relative paths resolve beneath it.
    pub fn new(mut base_url: Url, http: Client) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http,
            base_url,
            token: None,
        }
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::new(base_url, http))
    }

    /// Returns the client with a bearer token attached.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replaces or clears the bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The server root all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    fn list_endpoint(&self, path: &str, params: ListParams) -> Result<Url, ClientError> {
        let mut url = self.endpoint(path)?;
        params.append_to(&mut url);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T>(&self, builder: RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "HR API response"
        );
        parse_json(response).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        self.send(self.request(Method::GET, url)).await
    }

    async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        self.send(self.request(Method::DELETE, url)).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, url).json(body)).await
    }

    async fn put_json<B, T>(&self, url: Url, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, url).json(body)).await
    }
}

async fn parse_json<T>(response: Response) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    if !response.status().is_success() {
        return Err(error::status_error(response).await);
    }
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = HrApiClient::new(
            Url::parse("http://hr.local/backend").unwrap(),
            Client::new(),
        );
        assert_eq!(client.base_url().as_str(), "http://hr.local/backend/");
        assert_eq!(
            client.endpoint("api/v1/employees/").unwrap().as_str(),
            "http://hr.local/backend/api/v1/employees/"
        );
    }

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params, ListParams::new(0, 100));

        let client = HrApiClient::new(Url::parse("http://hr.local/").unwrap(), Client::new());
        let url = client
            .list_endpoint("api/v1/leave/", ListParams::new(20, 10))
            .unwrap();
        assert_eq!(url.query(), Some("skip=20&limit=10"));
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            HrApiClient::from_config(&config),
            Err(ClientError::Url(_))
        ));
    }

    #[test]
    fn test_token_management() {
        let mut client = HrApiClient::new(Url::parse("http://hr.local/").unwrap(), Client::new())
            .with_token("abc");
        assert_eq!(client.token(), Some("abc"));
        client.set_token(None);
        assert_eq!(client.token(), None);
    }
}
