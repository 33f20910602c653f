//! Payroll totals calculation.
//!
//! Derives the three aggregate monetary fields of a payslip from its detail
//! lines:
//!
//! - `total_earnings` is the sum of amounts on earning lines
//! - `total_deductions` is the sum of amounts on deduction lines
//! - `net_pay = total_earnings - total_deductions`, never clamped
//!
//! Lines whose amount is missing or not a number contribute nothing until
//! they are corrected. So does a line whose amount would push a total past
//! the range of [`Decimal`]. The calculation is a pure function and is re-run from
//! scratch on every change to the line set.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::models::{
    Payslip, PayslipDetail, PayslipDetailCreate, PayslipTotals, SalaryComponent,
    SalaryComponentType,
};

/// The amount cell of a detail row while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftAmount {
    /// Nothing entered yet.
    #[default]
    Missing,
    /// Text that does not parse as a number.
    Invalid(String),
    /// A parsed amount.
    Value(Decimal),
}

impl DraftAmount {
    /// Parses raw input. Blank input is [`DraftAmount::Missing`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_payroll::calculation::DraftAmount;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(DraftAmount::parse("12.50"), DraftAmount::Value(Decimal::new(1250, 2)));
    /// assert_eq!(DraftAmount::parse("  "), DraftAmount::Missing);
    /// assert_eq!(DraftAmount::parse("12,5"), DraftAmount::Invalid("12,5".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self::Value)
            .unwrap_or_else(|_| Self::Invalid(raw.to_string()))
    }

    /// The parsed amount, if any.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(amount) => Some(*amount),
            Self::Missing | Self::Invalid(_) => None,
        }
    }
}

impl From<Decimal> for DraftAmount {
    fn from(amount: Decimal) -> Self {
        Self::Value(amount)
    }
}

impl fmt::Display for DraftAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Invalid(raw) => f.write_str(raw),
            Self::Value(amount) => write!(f, "{}", amount),
        }
    }
}

// JSON numbers and numeric strings become values, null becomes missing,
// anything else is kept verbatim as invalid input.
impl<'de> Deserialize<'de> for DraftAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(serde_json::Value::Null) => Self::Missing,
            Some(serde_json::Value::Number(number)) => Self::parse(&number.to_string()),
            Some(serde_json::Value::String(text)) => Self::parse(&text),
            Some(other) => Self::Invalid(other.to_string()),
        })
    }
}

impl Serialize for DraftAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Invalid(raw) => serializer.serialize_str(raw),
            Self::Value(amount) => rust_decimal::serde::float::serialize(amount, serializer),
        }
    }
}

/// One detail row of a payslip being created.
///
/// Every field may be momentarily absent while the row is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLineDraft {
    /// Selected salary component.
    #[serde(default)]
    pub component_id: Option<i64>,
    /// Component name copied on selection.
    #[serde(default)]
    pub component_name: String,
    /// Component type copied on selection.
    #[serde(default)]
    pub component_type: Option<SalaryComponentType>,
    /// Earning flag copied on selection. An absent flag counts as a deduction.
    #[serde(default)]
    pub is_earning: Option<bool>,
    /// The amount cell.
    #[serde(default)]
    pub amount: DraftAmount,
}

impl DetailLineDraft {
    /// A freshly added row: no component, first component type, earning, amount 0.
    pub fn new_row() -> Self {
        Self {
            component_id: None,
            component_name: String::new(),
            component_type: Some(SalaryComponentType::ALL[0]),
            is_earning: Some(true),
            amount: DraftAmount::Value(Decimal::ZERO),
        }
    }

    /// A row copied from a persisted detail line.
    pub fn from_detail(detail: &PayslipDetail) -> Self {
        Self {
            component_id: Some(detail.component_id),
            component_name: detail.component_name.clone(),
            component_type: Some(detail.component_type),
            is_earning: Some(detail.is_earning),
            amount: DraftAmount::Value(detail.amount),
        }
    }

    /// Copies name, type and earning flag from a catalog component.
    ///
    /// Passing `None` clears the selection and the name but keeps the
    /// previous type and earning flag.
    pub fn select_component(&mut self, component: Option<&SalaryComponent>) {
        match component {
            Some(component) => {
                self.component_id = Some(component.id);
                self.component_name = component.name.clone();
                self.component_type = Some(component.component_type);
                self.is_earning = Some(component.is_earning);
            }
            None => {
                self.component_id = None;
                self.component_name.clear();
            }
        }
    }

    /// Converts a complete row into a create body, `None` if incomplete.
    pub fn to_create(&self) -> Option<PayslipDetailCreate> {
        Some(PayslipDetailCreate {
            payslip_id: None,
            component_id: self.component_id?,
            component_name: self.component_name.clone(),
            component_type: self.component_type.unwrap_or_default(),
            is_earning: self.is_earning.unwrap_or(false),
            amount: self.amount.value()?,
        })
    }
}

/// A line that contributes to payslip totals.
pub trait TotalsLine {
    /// The amount, or `None` when it is missing or malformed.
    fn line_amount(&self) -> Option<Decimal>;

    /// Whether the amount counts toward earnings rather than deductions.
    fn counts_as_earning(&self) -> bool;
}

impl TotalsLine for DetailLineDraft {
    fn line_amount(&self) -> Option<Decimal> {
        self.amount.value()
    }

    fn counts_as_earning(&self) -> bool {
        self.is_earning.unwrap_or(false)
    }
}

impl TotalsLine for PayslipDetail {
    fn line_amount(&self) -> Option<Decimal> {
        Some(self.amount)
    }

    fn counts_as_earning(&self) -> bool {
        self.is_earning
    }
}

impl TotalsLine for PayslipDetailCreate {
    fn line_amount(&self) -> Option<Decimal> {
        Some(self.amount)
    }

    fn counts_as_earning(&self) -> bool {
        self.is_earning
    }
}

/// Totals together with the rows that were left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsCalculation {
    /// The derived totals.
    #[serde(flatten)]
    pub totals: PayslipTotals,
    /// Number of rows that contributed.
    pub counted_lines: usize,
    /// Indexes of rows skipped for a missing or malformed amount, or for an
    /// amount that would overflow the totals.
    pub skipped_lines: Vec<usize>,
}

/// Calculates payslip totals from detail lines.
///
/// # Examples
///
/// ```
/// use hr_payroll::calculation::{calculate_totals, DetailLineDraft, DraftAmount};
/// use rust_decimal::Decimal;
///
/// let line = |amount: i64, is_earning: bool| DetailLineDraft {
///     is_earning: Some(is_earning),
///     amount: DraftAmount::Value(Decimal::from(amount)),
///     ..DetailLineDraft::default()
/// };
///
/// let totals = calculate_totals(&[line(100, true), line(30, false), line(20, true)]);
/// assert_eq!(totals.total_earnings, Decimal::from(120));
/// assert_eq!(totals.total_deductions, Decimal::from(30));
/// assert_eq!(totals.net_pay, Decimal::from(90));
/// ```
pub fn calculate_totals<L: TotalsLine>(lines: &[L]) -> PayslipTotals {
    calculate_totals_detailed(lines).totals
}

/// Calculates payslip totals and reports which rows were skipped.
pub fn calculate_totals_detailed<L: TotalsLine>(lines: &[L]) -> TotalsCalculation {
    let mut totals = PayslipTotals::default();
    let mut counted_lines = 0;
    let mut skipped_lines = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some(amount) = line.line_amount() else {
            skipped_lines.push(index);
            continue;
        };
        let (earnings, deductions) = (totals.total_earnings, totals.total_deductions);
        let sums = if line.counts_as_earning() {
            earnings.checked_add(amount).map(|earnings| (earnings, deductions))
        } else {
            deductions.checked_add(amount).map(|deductions| (earnings, deductions))
        };
        match sums.and_then(|(earnings, deductions)| PayslipTotals::from_sums(earnings, deductions)) {
            Some(next) => {
                totals = next;
                counted_lines += 1;
            }
            None => {
                warn!(index, amount = %amount, "Detail amount overflows payslip totals");
                skipped_lines.push(index);
            }
        }
    }

    TotalsCalculation {
        totals,
        counted_lines,
        skipped_lines,
    }
}

/// Stored totals of a persisted payslip compared with its detail lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalsVerification {
    /// Totals as stored on the server.
    pub stored: PayslipTotals,
    /// Totals recomputed from the detail lines.
    pub computed: PayslipTotals,
}

impl TotalsVerification {
    /// Whether stored and recomputed totals agree.
    pub fn is_consistent(&self) -> bool {
        self.stored == self.computed
    }
}

/// Checks a persisted payslip's stored totals against its details.
///
/// A mismatch is logged and reported, never treated as an error: the stored
/// values remain the ones displayed.
pub fn verify_totals(payslip: &Payslip) -> TotalsVerification {
    let verification = TotalsVerification {
        stored: payslip.stored_totals(),
        computed: calculate_totals(&payslip.details),
    };
    if !verification.is_consistent() {
        warn!(
            payslip_id = payslip.id,
            stored_net = %verification.stored.net_pay,
            computed_net = %verification.computed.net_pay,
            "Stored payslip totals do not match detail lines"
        );
    }
    verification
}
