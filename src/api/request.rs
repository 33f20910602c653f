//! Request types for the preview service.

use serde::{Deserialize, Serialize};

use crate::calculation::DetailLineDraft;
use crate::form::{PayslipForm, PayslipHeaderDraft};

/// Request body for `POST /payslips/totals`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalsRequest {
    /// Draft detail lines in display order.
    pub details: Vec<DetailLineDraft>,
}

/// Request body for `POST /payslips/validate`.
///
/// Header fields sit at the top level next to `details`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayslipDraftRequest {
    /// Header fields.
    #[serde(flatten)]
    pub header: PayslipHeaderDraft,
    /// Draft detail lines.
    #[serde(default)]
    pub details: Vec<DetailLineDraft>,
}

impl From<PayslipDraftRequest> for PayslipForm {
    fn from(request: PayslipDraftRequest) -> Self {
        PayslipForm::with_lines(request.header, request.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::DraftAmount;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_draft_request_reads_flat_header() {
        let json = r#"{
            "employee_id": 3,
            "pay_period_start_date": "2025-01-01",
            "pay_period_end_date": "2025-01-31",
            "payment_date": "2025-02-01",
            "notes": "January",
            "details": [
                {"component_id": 1, "component_name": "Basic", "component_type": "basic",
                 "is_earning": true, "amount": 100}
            ]
        }"#;

        let request: PayslipDraftRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.header.employee_id, Some(3));
        assert_eq!(
            request.header.payment_date,
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
        assert_eq!(request.details[0].amount, DraftAmount::Value(Decimal::from(100)));

        let form = PayslipForm::from(request);
        assert_eq!(form.totals().net_pay, Decimal::from(100));
    }

    #[test]
    fn test_totals_request_requires_details() {
        assert!(serde_json::from_str::<TotalsRequest>("{}").is_err());
        let request: TotalsRequest = serde_json::from_str(r#"{"details": []}"#).unwrap();
        assert!(request.details.is_empty());
    }
}
