//! Calculation logic for the HR payroll client.
//!
//! This module contains the payslip totals calculator, the local submission
//! validation rules for every form, and client-side pagination and filtering
//! of fetched lists.

mod pagination;
mod totals;
mod validation;

pub use pagination::{DEFAULT_ROWS_PER_PAGE, Pagination, Searchable, filter_by_text};
pub use totals::{
    DetailLineDraft, DraftAmount, TotalsCalculation, TotalsLine, TotalsVerification,
    calculate_totals, calculate_totals_detailed, verify_totals,
};
pub use validation::{
    COMPONENT_REQUIRED_FIELDS, DETAIL_LINE_INVALID, EFFECTIVE_DATE_REQUIRED, FIRST_NAME_REQUIRED,
    LEAVE_RANGE_INVERTED, LEAVE_REQUIRED_FIELDS, PAY_PERIOD_INVERTED, PAYSLIP_REQUIRED_FIELDS,
    SALARY_AMOUNT_INVALID, SALARY_IDS_INVALID, SALARY_WINDOW_INVERTED, TOTALS_OUT_OF_RANGE,
    ValidatedHeader,
    validate_detail_lines, validate_employee_salary, validate_employee_update, validate_leave,
    validate_payslip_header, validate_salary_component,
};
