//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the client
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use url::Url;

use crate::calculation::Pagination;
use crate::client::ListParams;
use crate::error::{PayrollError, PayrollResult};

use super::types::{ApiConfig, PayrollConfig, ServerConfig, SessionConfig};

/// Loads and provides access to the client configuration.
///
/// # Example
///
/// ```no_run
/// use hr_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("API at {}", loader.api().base_url);
/// # Ok::<(), hr_payroll::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid YAML or holds invalid values.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<PayrollConfig>(path)?;
        Self::from_config(config, &path.display().to_string())
    }

    /// Wraps an in-memory configuration after checking it.
    pub fn from_config(config: PayrollConfig, source: &str) -> PayrollResult<Self> {
        let invalid = |message: String| PayrollError::ConfigParseError {
            path: source.to_string(),
            message,
        };

        Url::parse(&config.api.base_url)
            .map_err(|e| invalid(format!("api.base_url: {}", e)))?;
        if config.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs must be positive".to_string()));
        }
        if config.pagination.default_limit == 0 || config.pagination.rows_per_page == 0 {
            return Err(invalid("pagination sizes must be positive".to_string()));
        }

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// REST API connection settings.
    pub fn api(&self) -> &ApiConfig {
        &self.config.api
    }

    /// Session persistence settings.
    pub fn session(&self) -> &SessionConfig {
        &self.config.session
    }

    /// Preview service settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Paging parameters for the first page of a list call.
    pub fn list_params(&self) -> ListParams {
        ListParams::new(0, self.config.pagination.default_limit)
    }

    /// A first-page table window using the configured page size.
    pub fn table_pagination(&self) -> Pagination {
        Pagination::new(0, self.config.pagination.rows_per_page)
    }
}
