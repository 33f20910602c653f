//! Employee model and related types.
//!
//! This module defines the [`Employee`] record returned by the employees
//! endpoint and the partial [`EmployeeUpdate`] body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::wire_date;

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Server-assigned identifier.
    pub id: i64,
    /// First name. Required.
    pub emp_firstname: String,
    /// Last name.
    #[serde(default)]
    pub emp_lastname: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub emp_email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub emp_phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub emp_address: Option<String>,
    /// Department the employee belongs to.
    #[serde(default)]
    pub department_id: Option<i64>,
    /// Position held.
    #[serde(default)]
    pub position_id: Option<i64>,
    /// Direct manager.
    #[serde(default)]
    pub manager_id: Option<i64>,
    /// Hire date.
    #[serde(default, with = "wire_date::option")]
    pub emp_hiredate: Option<NaiveDate>,
    /// Termination date.
    #[serde(default, with = "wire_date::option")]
    pub emp_firedate: Option<NaiveDate>,
    /// Whether the employee is currently active.
    #[serde(default)]
    pub emp_active: Option<bool>,
}

impl Employee {
    /// Returns the first name followed by the last name when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_payroll::models::Employee;
    ///
    /// let employee: Employee = serde_json::from_str(
    ///     r#"{"id": 1, "emp_firstname": "Ada", "emp_lastname": "Lovelace"}"#,
    /// ).unwrap();
    /// assert_eq!(employee.display_name(), "Ada Lovelace");
    /// ```
    pub fn display_name(&self) -> String {
        match self.emp_lastname.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.emp_firstname, last),
            _ => self.emp_firstname.clone(),
        }
    }
}

/// Body for updating an employee. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_firstname: Option<String>,
    /// New last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_lastname: Option<String>,
    /// New email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_email: Option<String>,
    /// New phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_phone: Option<String>,
    /// New address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_address: Option<String>,
    /// New department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    /// New position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
    /// New manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    /// New active flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emp_active: Option<bool>,
}
