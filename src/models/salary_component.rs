//! Salary component models.
//!
//! A salary component is a reusable, named earning or deduction category.
//! Payslip detail lines and employee salary assignments both reference one.

use serde::{Deserialize, Serialize};

/// The categorical type of a salary component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryComponentType {
    /// Basic (base) salary.
    #[default]
    Basic,
    /// A recurring allowance (housing, transport, ...).
    Allowance,
    /// A one-off or periodic bonus.
    Bonus,
    /// Overtime pay.
    Overtime,
    /// Sales commission.
    Commission,
    /// Income tax withholding.
    Tax,
    /// Insurance contribution.
    Insurance,
    /// Pension or retirement contribution.
    Pension,
    /// Loan repayment.
    Loan,
    /// Anything else.
    Other,
}

impl SalaryComponentType {
    /// All component types in declaration order.
    pub const ALL: [SalaryComponentType; 10] = [
        Self::Basic,
        Self::Allowance,
        Self::Bonus,
        Self::Overtime,
        Self::Commission,
        Self::Tax,
        Self::Insurance,
        Self::Pension,
        Self::Loan,
        Self::Other,
    ];

    /// Returns the wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Allowance => "allowance",
            Self::Bonus => "bonus",
            Self::Overtime => "overtime",
            Self::Commission => "commission",
            Self::Tax => "tax",
            Self::Insurance => "insurance",
            Self::Pension => "pension",
            Self::Loan => "loan",
            Self::Other => "other",
        }
    }
}

/// A salary component as stored by the server.
///
/// # Example
///
/// ```
/// use hr_payroll::models::{SalaryComponent, SalaryComponentType};
///
/// let component = SalaryComponent {
///     id: 1,
///     name: "Basic Salary".to_string(),
///     component_type: SalaryComponentType::Basic,
///     is_earning: true,
///     description: None,
/// };
/// assert_eq!(component.label(), "Basic Salary (Earning, Type: basic)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Categorical type.
    #[serde(rename = "type")]
    pub component_type: SalaryComponentType,
    /// `true` for earnings, `false` for deductions.
    pub is_earning: bool,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl SalaryComponent {
    /// Label used when offering the component for selection.
    pub fn label(&self) -> String {
        let kind = if self.is_earning { "Earning" } else { "Deduction" };
        format!("{} ({}, Type: {})", self.name, kind, self.component_type.as_str())
    }
}

/// Body for creating a salary component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponentCreate {
    /// Display name.
    pub name: String,
    /// Categorical type.
    #[serde(rename = "type")]
    pub component_type: SalaryComponentType,
    /// `true` for earnings, `false` for deductions.
    pub is_earning: bool,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for updating a salary component. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponentUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New categorical type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<SalaryComponentType>,
    /// New earning flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_earning: Option<bool>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_component_with_type_key() {
        let json = r#"{
            "id": 7,
            "name": "Income Tax",
            "type": "tax",
            "is_earning": false,
            "description": "PAYE"
        }"#;

        let component: SalaryComponent = serde_json::from_str(json).unwrap();
        assert_eq!(component.id, 7);
        assert_eq!(component.component_type, SalaryComponentType::Tax);
        assert!(!component.is_earning);
        assert_eq!(component.description.as_deref(), Some("PAYE"));
    }

    #[test]
    fn test_deserialize_component_without_description() {
        let json = r#"{"id": 1, "name": "Basic", "type": "basic", "is_earning": true}"#;
        let component: SalaryComponent = serde_json::from_str(json).unwrap();
        assert_eq!(component.description, None);
    }

    #[test]
    fn test_label_for_deduction() {
        let component = SalaryComponent {
            id: 2,
            name: "Pension".to_string(),
            component_type: SalaryComponentType::Pension,
            is_earning: false,
            description: None,
        };
        assert_eq!(component.label(), "Pension (Deduction, Type: pension)");
    }

    #[test]
    fn test_type_as_str_matches_serde() {
        for component_type in SalaryComponentType::ALL {
            let json = serde_json::to_string(&component_type).unwrap();
            assert_eq!(json, format!("\"{}\"", component_type.as_str()));
        }
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = SalaryComponentUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"name":"Renamed"}"#);
    }
}
