//! Form state and submission workflows.
//!
//! The payslip form owns the create/edit lifecycle of a payslip. The other
//! drafts are plain structs turned into request bodies by validation.

mod drafts;
mod payslip_form;

pub use drafts::{EmployeeSalaryDraft, LeaveDraft, PayslipHeaderDraft, SalaryComponentDraft};
pub use payslip_form::{CREATE_FAILED, FormMode, PayslipForm, UPDATE_FAILED};
