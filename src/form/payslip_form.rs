//! The payslip create/edit form.
//!
//! A [`PayslipForm`] is either creating a new payslip, in which case its
//! detail lines are editable and totals follow them, or editing a persisted
//! one, in which case details and totals are frozen and only the header may
//! change.

use tracing::{debug, info, warn};

use crate::calculation::{
    DetailLineDraft, DraftAmount, TOTALS_OUT_OF_RANGE, TotalsCalculation,
    calculate_totals_detailed, validate_detail_lines, validate_payslip_header,
};
use crate::client::{ClientError, HrApiClient};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Payslip, PayslipCreate, PayslipTotals, PayslipUpdate, SalaryComponent};

use super::PayslipHeaderDraft;

/// Shown when creating a payslip fails without a server message.
pub const CREATE_FAILED: &str = "Failed to create payslip.";

/// Shown when updating a payslip fails without a server message.
pub const UPDATE_FAILED: &str = "Failed to update payslip.";

/// Whether the form creates a new payslip or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// A new payslip; detail lines are editable.
    Create,
    /// An existing payslip; detail lines are read-only.
    Edit {
        /// The payslip being edited.
        payslip_id: i64,
    },
}

/// State of the payslip form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipForm {
    mode: FormMode,
    /// Header fields, editable in both modes.
    pub header: PayslipHeaderDraft,
    details: Vec<DetailLineDraft>,
    calculation: TotalsCalculation,
}

impl PayslipForm {
    /// An empty form for a new payslip.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            header: PayslipHeaderDraft::default(),
            details: Vec::new(),
            calculation: calculate_totals_detailed::<DetailLineDraft>(&[]),
        }
    }

    /// A form prefilled from a persisted payslip.
    ///
    /// Totals are the stored values, never recomputed.
    pub fn edit(payslip: &Payslip) -> Self {
        Self {
            mode: FormMode::Edit {
                payslip_id: payslip.id,
            },
            header: PayslipHeaderDraft::from_payslip(payslip),
            details: payslip.details.iter().map(DetailLineDraft::from_detail).collect(),
            calculation: TotalsCalculation {
                totals: payslip.stored_totals(),
                counted_lines: payslip.details.len(),
                skipped_lines: Vec::new(),
            },
        }
    }

    /// A create-mode form holding the given lines.
    pub fn with_lines(header: PayslipHeaderDraft, details: Vec<DetailLineDraft>) -> Self {
        let calculation = calculate_totals_detailed(&details);
        Self {
            mode: FormMode::Create,
            header,
            details,
            calculation,
        }
    }

    /// The current mode.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Whether the form edits a persisted payslip.
    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// The detail lines in display order.
    pub fn details(&self) -> &[DetailLineDraft] {
        &self.details
    }

    /// The totals currently shown.
    pub fn totals(&self) -> PayslipTotals {
        self.calculation.totals
    }

    /// Indexes of rows left out of the totals for a missing or malformed amount.
    pub fn skipped_lines(&self) -> &[usize] {
        &self.calculation.skipped_lines
    }

    /// Appends a blank row and returns its index.
    pub fn add_detail_row(&mut self) -> PayrollResult<usize> {
        self.ensure_editable()?;
        self.details.push(DetailLineDraft::new_row());
        self.recompute();
        Ok(self.details.len() - 1)
    }

    /// Removes and returns the row at `index`.
    pub fn remove_detail_row(&mut self, index: usize) -> PayrollResult<DetailLineDraft> {
        self.ensure_editable()?;
        self.check_index(index)?;
        let removed = self.details.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Selects (or clears) the salary component of a row.
    pub fn select_component(
        &mut self,
        index: usize,
        component: Option<&SalaryComponent>,
    ) -> PayrollResult<()> {
        self.line_mut(index)?.select_component(component);
        self.recompute();
        Ok(())
    }

    /// Sets the amount of a row from raw input text.
    pub fn set_amount(&mut self, index: usize, raw: &str) -> PayrollResult<()> {
        let line = self.line_mut(index)?;
        line.amount = DraftAmount::parse(raw);
        if let DraftAmount::Invalid(text) = &line.amount {
            debug!(index, input = %text, "Detail amount is not a number");
        }
        self.recompute();
        Ok(())
    }

    /// Validates the form and builds the create body.
    ///
    /// Totals are recalculated from the validated lines so the body is
    /// always consistent with its details. A line whose amount would overflow
    /// the totals is rejected.
    pub fn build_create_request(&self) -> PayrollResult<PayslipCreate> {
        let header = validate_payslip_header(&self.header)?;
        let details = validate_detail_lines(&self.details)?;
        let calculation = calculate_totals_detailed(&details);
        if let Some(&index) = calculation.skipped_lines.first() {
            return Err(PayrollError::InvalidDetailLine {
                index,
                message: TOTALS_OUT_OF_RANGE.to_string(),
            });
        }
        let totals = calculation.totals;

        Ok(PayslipCreate {
            employee_id: header.employee_id,
            pay_period_start_date: header.pay_period_start_date,
            pay_period_end_date: header.pay_period_end_date,
            payment_date: header.payment_date,
            total_earnings: totals.total_earnings,
            total_deductions: totals.total_deductions,
            net_pay: totals.net_pay,
            bank_account_number: header.bank_account_number,
            notes: header.notes,
            details,
        })
    }

    /// Validates the header and builds the update body.
    ///
    /// The stored totals are echoed back unchanged and details are never sent.
    pub fn build_update_request(&self) -> PayrollResult<PayslipUpdate> {
        let header = validate_payslip_header(&self.header)?;
        let totals = self.totals();

        Ok(PayslipUpdate {
            employee_id: Some(header.employee_id),
            pay_period_start_date: Some(header.pay_period_start_date),
            pay_period_end_date: Some(header.pay_period_end_date),
            payment_date: Some(header.payment_date),
            total_earnings: Some(totals.total_earnings),
            total_deductions: Some(totals.total_deductions),
            net_pay: Some(totals.net_pay),
            bank_account_number: header.bank_account_number,
            notes: header.notes,
        })
    }

    /// Creates or updates the payslip on the server.
    ///
    /// The form is left untouched whatever the outcome.
    pub async fn submit(&self, client: &HrApiClient) -> Result<Payslip, ClientError> {
        match self.mode {
            FormMode::Create => {
                let body = self.build_create_request()?;
                let payslip = client.create_payslip(&body).await?;
                info!(
                    payslip_id = payslip.id,
                    employee_id = payslip.employee_id,
                    lines = payslip.details.len(),
                    "Payslip created"
                );
                Ok(payslip)
            }
            FormMode::Edit { payslip_id } => {
                let body = self.build_update_request()?;
                let payslip = client.update_payslip(payslip_id, &body).await?;
                info!(payslip_id, "Payslip updated");
                Ok(payslip)
            }
        }
    }

    /// Message to show for a failed [`submit`](Self::submit).
    pub fn submit_error_message(&self, error: &ClientError) -> String {
        let fallback = match self.mode {
            FormMode::Create => CREATE_FAILED,
            FormMode::Edit { .. } => UPDATE_FAILED,
        };
        let message = error.user_message(fallback);
        warn!(error = %error, "Payslip submission failed");
        message
    }

    fn ensure_editable(&self) -> PayrollResult<()> {
        match self.mode {
            FormMode::Create => Ok(()),
            FormMode::Edit { payslip_id } => Err(PayrollError::ReadOnlyPayslip { payslip_id }),
        }
    }

    fn check_index(&self, index: usize) -> PayrollResult<()> {
        if index < self.details.len() {
            Ok(())
        } else {
            Err(PayrollError::DetailLineNotFound {
                index,
                len: self.details.len(),
            })
        }
    }

    fn line_mut(&mut self, index: usize) -> PayrollResult<&mut DetailLineDraft> {
        self.ensure_editable()?;
        self.check_index(index)?;
        Ok(&mut self.details[index])
    }

    fn recompute(&mut self) {
        self.calculation = calculate_totals_detailed(&self.details);
    }
}

impl Default for PayslipForm {
    fn default() -> Self {
        Self::create()
    }
}
