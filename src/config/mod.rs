//! Configuration loading for the HR payroll client.
//!
//! Settings live in a single YAML file covering the REST API connection,
//! paging, session persistence and the preview service listener.
//!
//! # Example
//!
//! ```no_run
//! use hr_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Preview service on {}", config.server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ApiConfig, PaginationConfig, PayrollConfig, ServerConfig, SessionConfig};
