//! Error types for the HR payroll client.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for configuration loading, form validation and the payslip lifecycle.
//! Transport failures live in [`crate::client::ClientError`].

use thiserror::Error;

/// The main error type for the HR payroll client.
///
/// # Example
///
/// ```
/// use hr_payroll::error::PayrollError;
///
/// let error = PayrollError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The payslip header failed validation.
    #[error("{message}")]
    InvalidPayslip {
        /// The user-facing validation message.
        message: String,
    },

    /// A payslip detail line failed validation.
    #[error("{message}")]
    InvalidDetailLine {
        /// Index of the first offending line.
        index: usize,
        /// The user-facing validation message.
        message: String,
    },

    /// An employee salary assignment failed validation.
    #[error("{message}")]
    InvalidEmployeeSalary {
        /// The user-facing validation message.
        message: String,
    },

    /// A leave request failed validation.
    #[error("{message}")]
    InvalidLeave {
        /// The user-facing validation message.
        message: String,
    },

    /// A salary component failed validation.
    #[error("{message}")]
    InvalidSalaryComponent {
        /// The user-facing validation message.
        message: String,
    },

    /// An employee update failed validation.
    #[error("{message}")]
    InvalidEmployee {
        /// The user-facing validation message.
        message: String,
    },

    /// Detail lines of a persisted payslip cannot be edited.
    #[error(
        "Payslip {payslip_id} details are read-only; delete the payslip and create a new one"
    )]
    ReadOnlyPayslip {
        /// The ID of the persisted payslip.
        payslip_id: i64,
    },

    /// A detail line index was out of range.
    #[error("Detail line {index} does not exist (payslip has {len} lines)")]
    DetailLineNotFound {
        /// The requested index.
        index: usize,
        /// The number of lines on the form.
        len: usize,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
