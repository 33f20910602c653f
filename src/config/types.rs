//! Configuration type definitions.
//!
//! Every section and every field has a default, so a partial (or empty)
//! YAML document yields a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_ROWS_PER_PAGE;
use crate::client::DEFAULT_LIST_LIMIT;

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// REST API connection settings.
    pub api: ApiConfig,
    /// List and table paging.
    pub pagination: PaginationConfig,
    /// Login session persistence.
    pub session: SessionConfig,
    /// Preview service listener.
    pub server: ServerConfig,
}

/// REST API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server root, e.g. `http://localhost:8000/`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// List and table paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// `limit` sent with list calls.
    pub default_limit: u32,
    /// Rows per page in client-side tables.
    pub rows_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIST_LIMIT,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// Login session persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the access token between runs.
    pub token_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: PathBuf::from(".hr-payroll/token"),
        }
    }
}

/// Preview service listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the preview service binds to.
    pub bind_address: String,
    /// Largest number of detail lines accepted in one request.
    pub max_detail_lines: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            max_detail_lines: 500,
        }
    }
}
