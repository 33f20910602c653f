//! Employee salary assignment models.
//!
//! An assignment ties an employee to a salary component with an amount over
//! a time window. Overlapping windows are not checked here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wire_date;

/// A salary assignment as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalary {
    /// Server-assigned identifier.
    pub id: i64,
    /// The employee receiving the component.
    pub employee_id: i64,
    /// The assigned salary component.
    pub component_id: i64,
    /// Amount per pay period.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// First day the assignment applies.
    #[serde(with = "wire_date")]
    pub effective_date: NaiveDate,
    /// Last day the assignment applies, open-ended when `None`.
    #[serde(default, with = "wire_date::option")]
    pub end_date: Option<NaiveDate>,
}

impl EmployeeSalary {
    /// Returns `true` if the assignment applies on `date` (inclusive bounds).
    ///
    /// # Example
    ///
    /// ```
    /// use hr_payroll::models::EmployeeSalary;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let salary = EmployeeSalary {
    ///     id: 1,
    ///     employee_id: 2,
    ///     component_id: 3,
    ///     amount: Decimal::new(5000, 0),
    ///     effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    ///     end_date: None,
    /// };
    /// assert!(salary.is_active_on(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    /// assert!(!salary.is_active_on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
    /// ```
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.effective_date && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Body for creating a salary assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalaryCreate {
    /// The employee receiving the component.
    pub employee_id: i64,
    /// The assigned salary component.
    pub component_id: i64,
    /// Amount per pay period.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// First day the assignment applies.
    #[serde(with = "wire_date")]
    pub effective_date: NaiveDate,
    /// Last day the assignment applies; sent as `null` when open-ended.
    #[serde(default, with = "wire_date::option")]
    pub end_date: Option<NaiveDate>,
}

/// Body for updating a salary assignment.
///
/// `end_date` is always sent so that an open-ended window can be restored
/// with an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalaryUpdate {
    /// New employee reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    /// New component reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    /// New amount.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    /// New effective date.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub effective_date: Option<NaiveDate>,
    /// New end date.
    #[serde(default, with = "wire_date::option")]
    pub end_date: Option<NaiveDate>,
}
