//! In-progress form state for every editable resource.
//!
//! Drafts hold what the user has typed so far, including incomplete or
//! invalid values. They become request bodies only through the validators in
//! [`crate::calculation`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    DraftAmount, validate_employee_salary, validate_leave, validate_salary_component,
};
use crate::error::PayrollResult;
use crate::models::{
    EmployeeSalary, EmployeeSalaryCreate, EmployeeSalaryUpdate, Leave, LeaveCreate, LeaveStatus,
    LeaveType, LeaveUpdate, Payslip, SalaryComponent, SalaryComponentCreate, SalaryComponentType,
    SalaryComponentUpdate, wire_date,
};

/// Header fields of a payslip form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipHeaderDraft {
    /// The employee the payslip is for.
    #[serde(default)]
    pub employee_id: Option<i64>,
    /// First day of the pay period.
    #[serde(default, with = "wire_date::option")]
    pub pay_period_start_date: Option<NaiveDate>,
    /// Last day of the pay period.
    #[serde(default, with = "wire_date::option")]
    pub pay_period_end_date: Option<NaiveDate>,
    /// Payment date.
    #[serde(default, with = "wire_date::option")]
    pub payment_date: Option<NaiveDate>,
    /// Bank account; blank means none.
    #[serde(default)]
    pub bank_account_number: String,
    /// Notes; blank means none.
    #[serde(default)]
    pub notes: String,
}

impl PayslipHeaderDraft {
    /// Header fields copied from a persisted payslip.
    pub fn from_payslip(payslip: &Payslip) -> Self {
        Self {
            employee_id: Some(payslip.employee_id),
            pay_period_start_date: Some(payslip.pay_period_start_date),
            pay_period_end_date: Some(payslip.pay_period_end_date),
            payment_date: Some(payslip.payment_date),
            bank_account_number: payslip.bank_account_number.clone().unwrap_or_default(),
            notes: payslip.notes.clone().unwrap_or_default(),
        }
    }
}

/// Employee salary assignment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalaryDraft {
    /// The employee; zero until entered.
    #[serde(default)]
    pub employee_id: i64,
    /// The salary component; zero until entered.
    #[serde(default)]
    pub component_id: i64,
    /// The amount cell.
    #[serde(default)]
    pub amount: DraftAmount,
    /// First day the assignment applies.
    #[serde(default, with = "wire_date::option")]
    pub effective_date: Option<NaiveDate>,
    /// Last day the assignment applies; blank means open-ended.
    #[serde(default, with = "wire_date::option")]
    pub end_date: Option<NaiveDate>,
}

impl EmployeeSalaryDraft {
    /// Draft prefilled from a persisted assignment.
    pub fn from_salary(salary: &EmployeeSalary) -> Self {
        Self {
            employee_id: salary.employee_id,
            component_id: salary.component_id,
            amount: DraftAmount::Value(salary.amount),
            effective_date: Some(salary.effective_date),
            end_date: salary.end_date,
        }
    }

    /// Validates and builds a create body.
    pub fn to_create(&self) -> PayrollResult<EmployeeSalaryCreate> {
        validate_employee_salary(self)
    }

    /// Validates and builds an update body carrying every field.
    pub fn to_update(&self) -> PayrollResult<EmployeeSalaryUpdate> {
        let create = validate_employee_salary(self)?;
        Ok(EmployeeSalaryUpdate {
            employee_id: Some(create.employee_id),
            component_id: Some(create.component_id),
            amount: Some(create.amount),
            effective_date: Some(create.effective_date),
            end_date: create.end_date,
        })
    }
}

/// Leave request form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDraft {
    /// The requesting employee; zero until entered.
    #[serde(default)]
    pub employee_id: i64,
    /// First day of leave.
    #[serde(default, with = "wire_date::option")]
    pub start_date: Option<NaiveDate>,
    /// Last day of leave.
    #[serde(default, with = "wire_date::option")]
    pub end_date: Option<NaiveDate>,
    /// Kind of leave.
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
    /// Status; new requests are pending.
    #[serde(default)]
    pub status: LeaveStatus,
    /// Approver, if already known.
    #[serde(default)]
    pub approver_id: Option<i64>,
}

impl Default for LeaveDraft {
    fn default() -> Self {
        Self {
            employee_id: 0,
            start_date: None,
            end_date: None,
            leave_type: Some(LeaveType::Annual),
            reason: String::new(),
            status: LeaveStatus::Pending,
            approver_id: None,
        }
    }
}

impl LeaveDraft {
    /// Draft prefilled from a persisted leave request.
    pub fn from_leave(leave: &Leave) -> Self {
        Self {
            employee_id: leave.employee_id,
            start_date: Some(leave.start_date),
            end_date: Some(leave.end_date),
            leave_type: Some(leave.leave_type),
            reason: leave.reason.clone().unwrap_or_default(),
            status: leave.status,
            approver_id: leave.approver_id,
        }
    }

    /// Validates and builds a create body.
    pub fn to_create(&self) -> PayrollResult<LeaveCreate> {
        validate_leave(self)
    }

    /// Validates and builds an update body carrying every field.
    pub fn to_update(&self) -> PayrollResult<LeaveUpdate> {
        let create = validate_leave(self)?;
        Ok(LeaveUpdate {
            start_date: Some(create.start_date),
            end_date: Some(create.end_date),
            leave_type: Some(create.leave_type),
            reason: create.reason,
            status: Some(create.status),
            approver_id: create.approver_id,
        })
    }
}

/// Salary component form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponentDraft {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Categorical type.
    #[serde(rename = "type", default)]
    pub component_type: Option<SalaryComponentType>,
    /// Earning flag; new components are earnings.
    #[serde(default)]
    pub is_earning: bool,
    /// Optional description.
    #[serde(default)]
    pub description: String,
}

impl Default for SalaryComponentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            component_type: Some(SalaryComponentType::ALL[0]),
            is_earning: true,
            description: String::new(),
        }
    }
}

impl SalaryComponentDraft {
    /// Draft prefilled from a catalog component.
    pub fn from_component(component: &SalaryComponent) -> Self {
        Self {
            name: component.name.clone(),
            component_type: Some(component.component_type),
            is_earning: component.is_earning,
            description: component.description.clone().unwrap_or_default(),
        }
    }

    /// Validates and builds a create body.
    pub fn to_create(&self) -> PayrollResult<SalaryComponentCreate> {
        validate_salary_component(self)
    }

    /// Validates and builds an update body carrying every field.
    pub fn to_update(&self) -> PayrollResult<SalaryComponentUpdate> {
        let create = validate_salary_component(self)?;
        Ok(SalaryComponentUpdate {
            name: Some(create.name),
            component_type: Some(create.component_type),
            is_earning: Some(create.is_earning),
            description: create.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_salary_draft_round_trips_persisted_record() {
        let salary = EmployeeSalary {
            id: 8,
            employee_id: 2,
            component_id: 3,
            amount: Decimal::new(1999, 1),
            effective_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            end_date: None,
        };
        let update = EmployeeSalaryDraft::from_salary(&salary).to_update().unwrap();
        assert_eq!(update.amount, Some(Decimal::new(1999, 1)));
        assert_eq!(update.end_date, None);
    }

    #[test]
    fn test_default_leave_draft_is_pending_annual() {
        let draft = LeaveDraft::default();
        assert_eq!(draft.status, LeaveStatus::Pending);
        assert_eq!(draft.leave_type, Some(LeaveType::Annual));
        assert!(draft.to_create().is_err());
    }

    #[test]
    fn test_leave_draft_to_update() {
        let draft = LeaveDraft {
            employee_id: 5,
            start_date: NaiveDate::from_ymd_opt(2025, 8, 4),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 8),
            reason: "Family trip".to_string(),
            ..LeaveDraft::default()
        };
        let update = draft.to_update().unwrap();
        assert_eq!(update.reason.as_deref(), Some("Family trip"));
        assert_eq!(update.status, Some(LeaveStatus::Pending));
    }

    #[test]
    fn test_component_draft_from_component() {
        let component = SalaryComponent {
            id: 1,
            name: "Health Insurance".to_string(),
            component_type: SalaryComponentType::Insurance,
            is_earning: false,
            description: Some("Group plan".to_string()),
        };
        let draft = SalaryComponentDraft::from_component(&component);
        let update = draft.to_update().unwrap();
        assert_eq!(update.is_earning, Some(false));
        assert_eq!(update.description.as_deref(), Some("Group plan"));
    }

    #[test]
    fn test_header_draft_deserializes_partial_input() {
        let header: PayslipHeaderDraft =
            serde_json::from_str(r#"{"employee_id": 4, "payment_date": "2025-02-01"}"#).unwrap();
        assert_eq!(header.employee_id, Some(4));
        assert_eq!(header.pay_period_start_date, None);
        assert_eq!(header.payment_date, NaiveDate::from_ymd_opt(2025, 2, 1));
    }
}
