//! Leave request models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::wire_date;

/// Lifecycle status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a decision. New requests start here.
    #[default]
    Pending,
    /// Approved by an approver.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// Annual (vacation) leave.
    #[default]
    Annual,
    /// Sick leave.
    Sick,
    /// Unpaid leave.
    Unpaid,
    /// Maternity leave.
    Maternity,
    /// Paternity leave.
    Paternity,
    /// Anything else.
    Other,
}

/// A leave request as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    /// Server-assigned identifier.
    pub id: i64,
    /// The requesting employee.
    pub employee_id: i64,
    /// First day of leave.
    #[serde(with = "wire_date")]
    pub start_date: NaiveDate,
    /// Last day of leave.
    #[serde(with = "wire_date")]
    pub end_date: NaiveDate,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Current status.
    pub status: LeaveStatus,
    /// Employee who approved or rejected the request.
    #[serde(default)]
    pub approver_id: Option<i64>,
}

impl Leave {
    /// Only pending requests can be approved.
    pub fn can_approve(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    /// Number of calendar days covered, inclusive of both ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_payroll::models::Leave;
    ///
    /// let leave: Leave = serde_json::from_str(r#"{
    ///     "id": 1, "employee_id": 2, "start_date": "2025-03-03",
    ///     "end_date": "2025-03-07", "leave_type": "ANNUAL", "status": "PENDING"
    /// }"#).unwrap();
    /// assert_eq!(leave.days(), 5);
    /// ```
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Body for creating a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCreate {
    /// The requesting employee.
    pub employee_id: i64,
    /// First day of leave.
    #[serde(with = "wire_date")]
    pub start_date: NaiveDate,
    /// Last day of leave.
    #[serde(with = "wire_date")]
    pub end_date: NaiveDate,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// Free-text reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Initial status, normally pending.
    #[serde(default)]
    pub status: LeaveStatus,
    /// Pre-assigned approver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<i64>,
}

/// Body for updating a leave request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveUpdate {
    /// New first day.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub start_date: Option<NaiveDate>,
    /// New last day.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "wire_date::option"
    )]
    pub end_date: Option<NaiveDate>,
    /// New kind of leave.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    /// New reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveStatus>,
    /// New approver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leave_with_status(status: LeaveStatus) -> Leave {
        Leave {
            id: 1,
            employee_id: 2,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            leave_type: LeaveType::Sick,
            reason: None,
            status,
            approver_id: None,
        }
    }

    #[test]
    fn test_only_pending_can_be_approved() {
        assert!(leave_with_status(LeaveStatus::Pending).can_approve());
        assert!(!leave_with_status(LeaveStatus::Approved).can_approve());
        assert!(!leave_with_status(LeaveStatus::Rejected).can_approve());
        assert!(!leave_with_status(LeaveStatus::Cancelled).can_approve());
    }

    #[test]
    fn test_single_day_leave_counts_one_day() {
        assert_eq!(leave_with_status(LeaveStatus::Pending).days(), 1);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&LeaveType::Paternity).unwrap(),
            "\"PATERNITY\""
        );
        assert_eq!(LeaveStatus::Cancelled.as_str(), "CANCELLED");
    }

    #[test]
    fn test_create_defaults_to_pending() {
        let json = r#"{
            "employee_id": 4,
            "start_date": "2025-06-02",
            "end_date": "2025-06-03",
            "leave_type": "UNPAID"
        }"#;
        let create: LeaveCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.status, LeaveStatus::Pending);
        assert_eq!(create.leave_type, LeaveType::Unpaid);
    }
}
