//! Local submission validation.
//!
//! Each form is checked before anything is sent to the server. A failed
//! check returns a [`PayrollError`] carrying the message shown to the user;
//! the draft itself is never modified.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::form::{EmployeeSalaryDraft, LeaveDraft, PayslipHeaderDraft, SalaryComponentDraft};
use crate::models::{
    EmployeeSalaryCreate, EmployeeUpdate, LeaveCreate, PayslipDetailCreate, SalaryComponentCreate,
};

use super::totals::DetailLineDraft;

/// Shown when the payslip header is incomplete.
pub const PAYSLIP_REQUIRED_FIELDS: &str = "Employee ID and all date fields are required.";

/// Shown when the pay period is inverted.
pub const PAY_PERIOD_INVERTED: &str = "Pay period end date cannot be before the start date.";

/// Shown when any detail line is incomplete or negative.
pub const DETAIL_LINE_INVALID: &str =
    "All payslip detail lines must have a selected component and a valid non-negative amount.";

/// Shown when a detail amount pushes the payslip totals out of range.
pub const TOTALS_OUT_OF_RANGE: &str = "Payslip totals are too large to calculate.";

/// Shown when an employee salary has no effective date.
pub const EFFECTIVE_DATE_REQUIRED: &str = "Effective Date is required.";

/// Shown when an employee salary references non-positive IDs.
pub const SALARY_IDS_INVALID: &str = "Employee ID and Component ID must be valid positive numbers.";

/// Shown when an employee salary amount is missing, malformed or negative.
pub const SALARY_AMOUNT_INVALID: &str = "Amount must be a valid non-negative number.";

/// Shown when an employee salary ends before it starts.
pub const SALARY_WINDOW_INVERTED: &str = "End date cannot be before the effective date.";

/// Shown when a leave request is incomplete.
pub const LEAVE_REQUIRED_FIELDS: &str =
    "Please fill in all required fields (Employee ID, Start Date, End Date, Leave Type).";

/// Shown when a leave request ends before it starts.
pub const LEAVE_RANGE_INVERTED: &str = "End date cannot be before the start date.";

/// Shown when a salary component has no name or type.
pub const COMPONENT_REQUIRED_FIELDS: &str = "Name and Type are required fields.";

/// Shown when an employee update has no first name.
pub const FIRST_NAME_REQUIRED: &str = "First name is required.";

/// A payslip header that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedHeader {
    /// The employee the payslip is issued to.
    pub employee_id: i64,
    /// First day of the pay period.
    pub pay_period_start_date: chrono::NaiveDate,
    /// Last day of the pay period.
    pub pay_period_end_date: chrono::NaiveDate,
    /// The date the payment is made.
    pub payment_date: chrono::NaiveDate,
    /// Bank account, `None` when left blank.
    pub bank_account_number: Option<String>,
    /// Notes, `None` when left blank.
    pub notes: Option<String>,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn invalid_payslip(message: &str) -> PayrollError {
    PayrollError::InvalidPayslip {
        message: message.to_string(),
    }
}

/// Validates the payslip header fields.
pub fn validate_payslip_header(header: &PayslipHeaderDraft) -> PayrollResult<ValidatedHeader> {
    let employee_id = header.employee_id.filter(|id| *id > 0);
    let (Some(employee_id), Some(start), Some(end), Some(payment)) = (
        employee_id,
        header.pay_period_start_date,
        header.pay_period_end_date,
        header.payment_date,
    ) else {
        return Err(invalid_payslip(PAYSLIP_REQUIRED_FIELDS));
    };

    if end < start {
        return Err(invalid_payslip(PAY_PERIOD_INVERTED));
    }

    Ok(ValidatedHeader {
        employee_id,
        pay_period_start_date: start,
        pay_period_end_date: end,
        payment_date: payment,
        bank_account_number: non_blank(&header.bank_account_number),
        notes: non_blank(&header.notes),
    })
}

/// Validates every detail line and converts them into create bodies.
///
/// Each line needs a selected component (ID and name) and a parsed,
/// non-negative amount. The first failing line is reported.
pub fn validate_detail_lines(lines: &[DetailLineDraft]) -> PayrollResult<Vec<PayslipDetailCreate>> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let complete = line.component_id.is_some()
                && !line.component_name.is_empty()
                && line.amount.value().is_some_and(|a| a >= Decimal::ZERO);
            line.to_create()
                .filter(|_| complete)
                .ok_or_else(|| PayrollError::InvalidDetailLine {
                    index,
                    message: DETAIL_LINE_INVALID.to_string(),
                })
        })
        .collect()
}

/// Validates an employee salary assignment draft.
pub fn validate_employee_salary(draft: &EmployeeSalaryDraft) -> PayrollResult<EmployeeSalaryCreate> {
    let invalid = |message: &str| PayrollError::InvalidEmployeeSalary {
        message: message.to_string(),
    };

    let effective_date = draft
        .effective_date
        .ok_or_else(|| invalid(EFFECTIVE_DATE_REQUIRED))?;
    if draft.employee_id <= 0 || draft.component_id <= 0 {
        return Err(invalid(SALARY_IDS_INVALID));
    }
    let amount = draft
        .amount
        .value()
        .filter(|a| *a >= Decimal::ZERO)
        .ok_or_else(|| invalid(SALARY_AMOUNT_INVALID))?;
    if draft.end_date.is_some_and(|end| end < effective_date) {
        return Err(invalid(SALARY_WINDOW_INVERTED));
    }

    Ok(EmployeeSalaryCreate {
        employee_id: draft.employee_id,
        component_id: draft.component_id,
        amount,
        effective_date,
        end_date: draft.end_date,
    })
}

/// Validates a leave request draft.
pub fn validate_leave(draft: &LeaveDraft) -> PayrollResult<LeaveCreate> {
    let invalid = |message: &str| PayrollError::InvalidLeave {
        message: message.to_string(),
    };

    let (true, Some(start_date), Some(end_date), Some(leave_type)) = (
        draft.employee_id > 0,
        draft.start_date,
        draft.end_date,
        draft.leave_type,
    ) else {
        return Err(invalid(LEAVE_REQUIRED_FIELDS));
    };
    if end_date < start_date {
        return Err(invalid(LEAVE_RANGE_INVERTED));
    }

    Ok(LeaveCreate {
        employee_id: draft.employee_id,
        start_date,
        end_date,
        leave_type,
        reason: non_blank(&draft.reason),
        status: draft.status,
        approver_id: draft.approver_id.filter(|id| *id > 0),
    })
}

/// Validates a salary component draft.
pub fn validate_salary_component(
    draft: &SalaryComponentDraft,
) -> PayrollResult<SalaryComponentCreate> {
    let (Some(name), Some(component_type)) = (non_blank(&draft.name), draft.component_type) else {
        return Err(PayrollError::InvalidSalaryComponent {
            message: COMPONENT_REQUIRED_FIELDS.to_string(),
        });
    };

    Ok(SalaryComponentCreate {
        name,
        component_type,
        is_earning: draft.is_earning,
        description: non_blank(&draft.description),
    })
}

/// Validates an employee update: the first name must be present.
pub fn validate_employee_update(update: &EmployeeUpdate) -> PayrollResult<()> {
    match update.emp_firstname.as_deref().and_then(non_blank) {
        Some(_) => Ok(()),
        None => Err(PayrollError::InvalidEmployee {
            message: FIRST_NAME_REQUIRED.to_string(),
        }),
    }
}
