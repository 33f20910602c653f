//! Core data models for the HR payroll client.
//!
//! This module contains the wire types for every REST resource the client
//! talks to, plus the [`PayslipTotals`] triple used by the calculator.

mod auth;
mod department;
mod employee;
mod employee_salary;
mod leave;
mod payslip;
mod salary_component;
pub mod wire_date;

use serde::{Deserialize, Deserializer};

pub use auth::{LoginCredentials, Token};
pub use department::{Department, DepartmentTreeNode};
pub use employee::{Employee, EmployeeUpdate};
pub use employee_salary::{EmployeeSalary, EmployeeSalaryCreate, EmployeeSalaryUpdate};
pub use leave::{Leave, LeaveCreate, LeaveStatus, LeaveType, LeaveUpdate};
pub use payslip::{
    Payslip, PayslipCreate, PayslipDetail, PayslipDetailCreate, PayslipDetailUpdate,
    PayslipTotals, PayslipUpdate,
};
pub use salary_component::{
    SalaryComponent, SalaryComponentCreate, SalaryComponentType, SalaryComponentUpdate,
};

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
