//! Payslip and payslip detail models.
//!
//! This module contains the persisted [`Payslip`] with its [`PayslipDetail`]
//! lines, the request bodies used to create and update them, and the
//! [`PayslipTotals`] triple derived from the detail lines.
//!
//! Money is held as [`Decimal`] and travels as a JSON number.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{SalaryComponentType, null_as_default, wire_date};

/// The three aggregate monetary fields of a payslip.
///
/// # Example
///
/// ```
/// use hr_payroll::models::PayslipTotals;
/// use rust_decimal::Decimal;
///
/// let totals = PayslipTotals::from_sums(Decimal::new(120, 0), Decimal::new(30, 0)).unwrap();
/// assert_eq!(totals.net_pay, Decimal::new(90, 0));
/// assert!(PayslipTotals::from_sums(Decimal::MAX, Decimal::NEGATIVE_ONE).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipTotals {
    /// Sum of all earning line amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_earnings: Decimal,
    /// Sum of all deduction line amounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    /// Earnings minus deductions. May be negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_pay: Decimal,
}

impl PayslipTotals {
    /// Builds totals from earnings and deductions, deriving net pay.
    ///
    /// Returns `None` when the net pay does not fit in a [`Decimal`].
    pub fn from_sums(total_earnings: Decimal, total_deductions: Decimal) -> Option<Self> {
        Some(Self {
            total_earnings,
            total_deductions,
            net_pay: total_earnings.checked_sub(total_deductions)?,
        })
    }
}

/// A payslip as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Server-assigned identifier.
    pub id: i64,
    /// The employee this payslip was issued to.
    pub employee_id: i64,
    /// First day of the pay period.
    #[serde(with = "wire_date")]
    pub pay_period_start_date: NaiveDate,
    /// Last day of the pay period.
    #[serde(with = "wire_date")]
    pub pay_period_end_date: NaiveDate,
    /// The date the payment was made.
    #[serde(with = "wire_date")]
    pub payment_date: NaiveDate,
    /// Stored total earnings.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_earnings: Decimal,
    /// Stored total deductions.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    /// Stored net pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_pay: Decimal,
    /// Bank account the payment went to.
    #[serde(default)]
    pub bank_account_number: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Detail lines, fixed at creation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Vec<PayslipDetail>,
}

impl Payslip {
    /// Returns the totals exactly as stored on the server.
    pub fn stored_totals(&self) -> PayslipTotals {
        PayslipTotals {
            total_earnings: self.total_earnings,
            total_deductions: self.total_deductions,
            net_pay: self.net_pay,
        }
    }
}

/// A persisted payslip detail line.
///
/// Name, type and earning flag are copies taken from the salary component
/// when the line was entered, not a live link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipDetail {
    /// Server-assigned identifier.
    pub id: i64,
    /// Owning payslip, when the server includes it.
    #[serde(default)]
    pub payslip_id: Option<i64>,
    /// Referenced salary component.
    pub component_id: i64,
    /// Component name at entry time.
    pub component_name: String,
    /// Component type at entry time.
    pub component_type: SalaryComponentType,
    /// Earning flag at entry time.
    pub is_earning: bool,
    /// Line amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Body for a detail line, either nested in [`PayslipCreate`] or posted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipDetailCreate {
    /// Owning payslip; required only when posting a line on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payslip_id: Option<i64>,
    /// Referenced salary component.
    pub component_id: i64,
    /// Component name copied from the catalog.
    pub component_name: String,
    /// Component type copied from the catalog.
    pub component_type: SalaryComponentType,
    /// Earning flag copied from the catalog.
    pub is_earning: bool,
    /// Line amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Body for updating a detail line. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipDetailUpdate {
    /// New component reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
    /// New component name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    /// New component type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<SalaryComponentType>,
    /// New earning flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_earning: Option<bool>,
    /// New amount.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
}

/// Body for creating a payslip together with its full detail set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipCreate {
    /// The employee the payslip is issued to.
    pub employee_id: i64,
    /// First day of the pay period.
    #[serde(with = "wire_date")]
    pub pay_period_start_date: NaiveDate,
    /// Last day of the pay period.
    #[serde(with = "wire_date")]
    pub pay_period_end_date: NaiveDate,
    /// The date the payment is made.
    #[serde(with = "wire_date")]
    pub payment_date: NaiveDate,
    /// Derived total earnings.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_earnings: Decimal,
    /// Derived total deductions.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    /// Derived net pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_pay: Decimal,
    /// Bank account the payment goes to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// The complete detail set.
    #[serde(default)]
    pub details: Vec<PayslipDetailCreate>,
}

/// Body for updating a payslip header. Details are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipUpdate {
    /// New employee reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    /// New pay period start.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub pay_period_start_date: Option<NaiveDate>,
    /// New pay period end.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub pay_period_end_date: Option<NaiveDate>,
    /// New payment date.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub payment_date: Option<NaiveDate>,
    /// Total earnings, echoed back unchanged by the form.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_earnings: Option<Decimal>,
    /// Total deductions, echoed back unchanged by the form.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_deductions: Option<Decimal>,
    /// Net pay, echoed back unchanged by the form.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub net_pay: Option<Decimal>,
    /// New bank account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    /// New notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
