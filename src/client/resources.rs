//! Endpoint methods for every HR resource.

use reqwest::Method;
use serde_json::Value;
use tracing::info;
use url::Url;

use super::{ClientError, HrApiClient, ListParams};
use crate::calculation::validate_employee_update;
use crate::error::PayrollError;
use crate::models::{
    Department, DepartmentTreeNode, Employee, EmployeeSalary, EmployeeSalaryCreate,
    EmployeeSalaryUpdate, EmployeeUpdate, Leave, LeaveCreate, LeaveStatus, LeaveUpdate,
    LoginCredentials, Payslip, PayslipCreate, PayslipDetail, PayslipDetailCreate,
    PayslipDetailUpdate, PayslipUpdate, SalaryComponent, SalaryComponentCreate,
    SalaryComponentUpdate, Token,
};

const TOKEN: &str = "api/v1/token";
const TEST_TOKEN: &str = "api/v1/test-token";
const EMPLOYEES: &str = "api/v1/employees/";
const DEPARTMENTS: &str = "api/v1/departments/";
const LEAVE: &str = "api/v1/leave/";
const SALARY_COMPONENTS: &str = "api/v1/hr-salary-components/";
const EMPLOYEE_SALARIES: &str = "api/v1/hr-employee-salaries/";
const PAYSLIPS: &str = "api/v1/hr-payslips/";
const PAYSLIP_DETAILS: &str = "api/v1/hr-payslip-details/";

/// Shown when approving a request that is no longer pending.
pub const LEAVE_NOT_PENDING: &str = "Only pending leave requests can be approved.";

/// Optional filters for listing leave requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveFilter {
    /// Only requests from this employee.
    pub employee_id: Option<i64>,
    /// Only requests in this status.
    pub status: Option<LeaveStatus>,
}

impl HrApiClient {
    fn item_endpoint(&self, collection: &str, id: i64) -> Result<Url, ClientError> {
        self.endpoint(&format!("{collection}{id}"))
    }

    // Auth

    /// Exchanges credentials for an access token (form-encoded password grant).
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Token, ClientError> {
        let url = self.endpoint(TOKEN)?;
        let builder = self.http.post(url).form(&credentials.form_fields());
        self.send(builder).await
    }

    /// Checks the current token and returns the user payload.
    pub async fn test_token(&self) -> Result<Value, ClientError> {
        self.get(self.endpoint(TEST_TOKEN)?).await
    }

    // Employees

    /// Lists employees.
    pub async fn list_employees(&self, params: ListParams) -> Result<Vec<Employee>, ClientError> {
        self.get(self.list_endpoint(EMPLOYEES, params)?).await
    }

    /// Fetches one employee.
    pub async fn get_employee(&self, employee_id: i64) -> Result<Employee, ClientError> {
        self.get(self.item_endpoint(EMPLOYEES, employee_id)?).await
    }

    /// Updates an employee. The first name must be present.
    pub async fn update_employee(
        &self,
        employee_id: i64,
        update: &EmployeeUpdate,
    ) -> Result<Employee, ClientError> {
        validate_employee_update(update)?;
        self.put_json(self.item_endpoint(EMPLOYEES, employee_id)?, update)
            .await
    }

    // Departments

    /// Lists departments.
    pub async fn list_departments(
        &self,
        params: ListParams,
    ) -> Result<Vec<Department>, ClientError> {
        self.get(self.list_endpoint(DEPARTMENTS, params)?).await
    }

    /// Fetches one department.
    pub async fn get_department(&self, department_id: i64) -> Result<Department, ClientError> {
        self.get(self.item_endpoint(DEPARTMENTS, department_id)?)
            .await
    }

    /// Fetches the department hierarchy roots.
    pub async fn department_tree(&self) -> Result<Vec<DepartmentTreeNode>, ClientError> {
        self.get(self.endpoint("api/v1/departments/tree")?).await
    }

    /// IDs of the department with `dept_code` and all departments beneath it.
    pub async fn subdepartment_ids(&self, dept_code: &str) -> Result<Vec<i64>, ClientError> {
        let mut url = self.endpoint(DEPARTMENTS)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(dept_code)
            .push("subdepartment-ids");
        self.get(url).await
    }

    // Leave

    /// Submits a leave request.
    pub async fn create_leave(&self, leave: &LeaveCreate) -> Result<Leave, ClientError> {
        self.post_json(self.endpoint(LEAVE)?, leave).await
    }

    /// Lists leave requests, optionally filtered.
    pub async fn list_leaves(
        &self,
        params: ListParams,
        filter: LeaveFilter,
    ) -> Result<Vec<Leave>, ClientError> {
        let mut url = self.list_endpoint(LEAVE, params)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(employee_id) = filter.employee_id {
                query.append_pair("employee_id", &employee_id.to_string());
            }
            if let Some(status) = filter.status {
                query.append_pair("status", status.as_str());
            }
        }
        self.get(url).await
    }

    /// Updates a leave request.
    pub async fn update_leave(
        &self,
        leave_id: i64,
        update: &LeaveUpdate,
    ) -> Result<Leave, ClientError> {
        self.put_json(self.item_endpoint(LEAVE, leave_id)?, update)
            .await
    }

    /// Approves a leave request by ID.
    pub async fn approve_leave(&self, leave_id: i64) -> Result<Leave, ClientError> {
        let url = self.endpoint(&format!("{LEAVE}{leave_id}/approve"))?;
        let leave: Leave = self.send(self.request(Method::POST, url)).await?;
        info!(leave_id, approver_id = ?leave.approver_id, "Leave approved");
        Ok(leave)
    }

    /// Approves a fetched leave request, refusing locally unless it is pending.
    pub async fn approve_pending_leave(&self, leave: &Leave) -> Result<Leave, ClientError> {
        if !leave.can_approve() {
            return Err(PayrollError::InvalidLeave {
                message: LEAVE_NOT_PENDING.to_string(),
            }
            .into());
        }
        self.approve_leave(leave.id).await
    }

    // Salary components

    /// Adds a salary component to the catalog.
    pub async fn create_salary_component(
        &self,
        component: &SalaryComponentCreate,
    ) -> Result<SalaryComponent, ClientError> {
        self.post_json(self.endpoint(SALARY_COMPONENTS)?, component)
            .await
    }

    /// Lists the salary component catalog.
    pub async fn list_salary_components(
        &self,
        params: ListParams,
    ) -> Result<Vec<SalaryComponent>, ClientError> {
        self.get(self.list_endpoint(SALARY_COMPONENTS, params)?)
            .await
    }

    /// Fetches one salary component.
    pub async fn get_salary_component(
        &self,
        component_id: i64,
    ) -> Result<SalaryComponent, ClientError> {
        self.get(self.item_endpoint(SALARY_COMPONENTS, component_id)?)
            .await
    }

    /// Updates a salary component.
    pub async fn update_salary_component(
        &self,
        component_id: i64,
        update: &SalaryComponentUpdate,
    ) -> Result<SalaryComponent, ClientError> {
        self.put_json(self.item_endpoint(SALARY_COMPONENTS, component_id)?, update)
            .await
    }

    /// Deletes a salary component and returns it.
    pub async fn delete_salary_component(
        &self,
        component_id: i64,
    ) -> Result<SalaryComponent, ClientError> {
        self.delete(self.item_endpoint(SALARY_COMPONENTS, component_id)?)
            .await
    }

    // Employee salaries

    /// Assigns a salary component to an employee.
    pub async fn create_employee_salary(
        &self,
        salary: &EmployeeSalaryCreate,
    ) -> Result<EmployeeSalary, ClientError> {
        self.post_json(self.endpoint(EMPLOYEE_SALARIES)?, salary)
            .await
    }

    /// Lists salary assignments.
    pub async fn list_employee_salaries(
        &self,
        params: ListParams,
    ) -> Result<Vec<EmployeeSalary>, ClientError> {
        self.get(self.list_endpoint(EMPLOYEE_SALARIES, params)?)
            .await
    }

    /// Fetches one salary assignment.
    pub async fn get_employee_salary(
        &self,
        employee_salary_id: i64,
    ) -> Result<EmployeeSalary, ClientError> {
        self.get(self.item_endpoint(EMPLOYEE_SALARIES, employee_salary_id)?)
            .await
    }

    /// Updates a salary assignment.
    pub async fn update_employee_salary(
        &self,
        employee_salary_id: i64,
        update: &EmployeeSalaryUpdate,
    ) -> Result<EmployeeSalary, ClientError> {
        self.put_json(
            self.item_endpoint(EMPLOYEE_SALARIES, employee_salary_id)?,
            update,
        )
        .await
    }

    /// Deletes a salary assignment and returns it.
    pub async fn delete_employee_salary(
        &self,
        employee_salary_id: i64,
    ) -> Result<EmployeeSalary, ClientError> {
        self.delete(self.item_endpoint(EMPLOYEE_SALARIES, employee_salary_id)?)
            .await
    }

    // Payslips

    /// Creates a payslip together with its detail lines.
    pub async fn create_payslip(&self, payslip: &PayslipCreate) -> Result<Payslip, ClientError> {
        self.post_json(self.endpoint(PAYSLIPS)?, payslip).await
    }

    /// Lists payslips.
    pub async fn list_payslips(&self, params: ListParams) -> Result<Vec<Payslip>, ClientError> {
        self.get(self.list_endpoint(PAYSLIPS, params)?).await
    }

    /// Fetches one payslip with its detail lines.
    pub async fn get_payslip(&self, payslip_id: i64) -> Result<Payslip, ClientError> {
        self.get(self.item_endpoint(PAYSLIPS, payslip_id)?).await
    }

    /// Updates a payslip header.
    pub async fn update_payslip(
        &self,
        payslip_id: i64,
        update: &PayslipUpdate,
    ) -> Result<Payslip, ClientError> {
        self.put_json(self.item_endpoint(PAYSLIPS, payslip_id)?, update)
            .await
    }

    /// Deletes a payslip and returns it.
    pub async fn delete_payslip(&self, payslip_id: i64) -> Result<Payslip, ClientError> {
        let payslip: Payslip = self.delete(self.item_endpoint(PAYSLIPS, payslip_id)?).await?;
        info!(payslip_id, "Payslip deleted");
        Ok(payslip)
    }

    // Payslip details

    /// Adds a detail line to an existing payslip.
    pub async fn create_payslip_detail(
        &self,
        detail: &PayslipDetailCreate,
    ) -> Result<PayslipDetail, ClientError> {
        self.post_json(self.endpoint(PAYSLIP_DETAILS)?, detail)
            .await
    }

    /// Lists detail lines across payslips.
    pub async fn list_payslip_details(
        &self,
        params: ListParams,
    ) -> Result<Vec<PayslipDetail>, ClientError> {
        self.get(self.list_endpoint(PAYSLIP_DETAILS, params)?)
            .await
    }

    /// Fetches one detail line.
    pub async fn get_payslip_detail(
        &self,
        payslip_detail_id: i64,
    ) -> Result<PayslipDetail, ClientError> {
        self.get(self.item_endpoint(PAYSLIP_DETAILS, payslip_detail_id)?)
            .await
    }

    /// Updates a detail line.
    pub async fn update_payslip_detail(
        &self,
        payslip_detail_id: i64,
        update: &PayslipDetailUpdate,
    ) -> Result<PayslipDetail, ClientError> {
        self.put_json(self.item_endpoint(PAYSLIP_DETAILS, payslip_detail_id)?, update)
            .await
    }

    /// Deletes a detail line and returns it.
    pub async fn delete_payslip_detail(
        &self,
        payslip_detail_id: i64,
    ) -> Result<PayslipDetail, ClientError> {
        self.delete(self.item_endpoint(PAYSLIP_DETAILS, payslip_detail_id)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveType, SalaryComponentType};
    use chrono::NaiveDate;
    use httpmock::Method::{DELETE, PUT};
    use httpmock::prelude::*;
    use reqwest::Client;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn client(server: &MockServer) -> HrApiClient {
        let base = Url::parse(&server.url("/")).expect("url");
        HrApiClient::new(base, Client::builder().build().expect("client")).with_token("tok")
    }

    fn payslip_json(id: i64) -> Value {
        json!({
            "id": id,
            "employee_id": 3,
            "pay_period_start_date": "2025-01-01",
            "pay_period_end_date": "2025-01-31",
            "payment_date": "2025-02-01",
            "total_earnings": 120,
            "total_deductions": 30,
            "net_pay": 90,
            "bank_account_number": null,
            "notes": null,
            "details": []
        })
    }

    fn leave_json(status: &str) -> Value {
        json!({
            "id": 5,
            "employee_id": 2,
            "start_date": "2025-06-02",
            "end_date": "2025-06-06",
            "leave_type": "ANNUAL",
            "reason": null,
            "status": status,
            "approver_id": 1
        })
    }

    #[tokio::test]
    async fn login_posts_form_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/token")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_contains("username=admin")
                    .body_contains("grant_type=password");
                then.status(200)
                    .json_body(json!({"access_token": "jwt", "token_type": "bearer"}));
            })
            .await;

        let token = client(&server)
            .login(&LoginCredentials::new("admin", "secret"))
            .await
            .expect("login");
        mock.assert_async().await;
        assert_eq!(token.access_token, "jwt");
    }

    #[tokio::test]
    async fn login_failure_carries_detail() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/token");
                then.status(401)
                    .json_body(json!({"detail": "Incorrect username or password"}));
            })
            .await;

        let err = client(&server)
            .login(&LoginCredentials::new("admin", "wrong"))
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect username or password");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_employees_sends_paging_and_bearer() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/employees/")
                    .query_param("skip", "0")
                    .query_param("limit", "100")
                    .header("authorization", "Bearer tok");
                then.status(200).json_body(json!([
                    {"id": 1, "emp_firstname": "Ada", "emp_lastname": "Lovelace"},
                    {"id": 2, "emp_firstname": "Alan"}
                ]));
            })
            .await;

        let employees = client(&server)
            .list_employees(ListParams::default())
            .await
            .expect("list employees");
        mock.assert_async().await;
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn update_employee_without_first_name_is_not_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT).path("/api/v1/employees/1");
                then.status(200);
            })
            .await;

        let err = client(&server)
            .update_employee(1, &EmployeeUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn list_leaves_applies_filters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/leave/")
                    .query_param("employee_id", "2")
                    .query_param("status", "PENDING");
                then.status(200).json_body(json!([leave_json("PENDING")]));
            })
            .await;

        let leaves = client(&server)
            .list_leaves(
                ListParams::default(),
                LeaveFilter {
                    employee_id: Some(2),
                    status: Some(LeaveStatus::Pending),
                },
            )
            .await
            .expect("list leaves");
        mock.assert_async().await;
        assert_eq!(leaves[0].leave_type, LeaveType::Annual);
        assert_eq!(leaves[0].days(), 5);
    }

    #[tokio::test]
    async fn approve_posts_to_approve_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/leave/5/approve");
                then.status(200).json_body(leave_json("APPROVED"));
            })
            .await;

        let leave = client(&server).approve_leave(5).await.expect("approve");
        mock.assert_async().await;
        assert_eq!(leave.status, LeaveStatus::Approved);
    }

    #[tokio::test]
    async fn approve_pending_leave_refuses_decided_requests() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/leave/5/approve");
                then.status(200).json_body(leave_json("APPROVED"));
            })
            .await;

        let rejected: Leave = serde_json::from_value(leave_json("REJECTED")).unwrap();
        let err = client(&server)
            .approve_pending_leave(&rejected)
            .await
            .unwrap_err();
        assert_eq!(err.user_message("fallback"), LEAVE_NOT_PENDING);
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn subdepartment_ids_by_code() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/departments/FIN/subdepartment-ids");
                then.status(200).json_body(json!([2, 4, 7]));
            })
            .await;

        let ids = client(&server)
            .subdepartment_ids("FIN")
            .await
            .expect("subdepartment ids");
        mock.assert_async().await;
        assert_eq!(ids, vec![2, 4, 7]);
    }

    #[tokio::test]
    async fn department_tree_parses_nested_nodes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/departments/tree");
                then.status(200).json_body(json!([
                    {"id": 1, "dept_name": "Head Office", "dept_code": "HO", "children": [
                        {"id": 2, "dept_name": "Finance", "dept_code": "FIN", "children": []}
                    ]}
                ]));
            })
            .await;

        let tree = client(&server).department_tree().await.expect("tree");
        assert_eq!(tree[0].subtree_ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn create_payslip_posts_numbers_and_details() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/hr-payslips/")
                    .json_body_partial(r#"{"employee_id": 3, "total_earnings": 120.0, "net_pay": 90.0}"#)
                    .body_contains(r#""component_name":"Basic""#);
                then.status(200).json_body(payslip_json(10));
            })
            .await;

        let body = PayslipCreate {
            employee_id: 3,
            pay_period_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            pay_period_end_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            total_earnings: Decimal::from(120),
            total_deductions: Decimal::from(30),
            net_pay: Decimal::from(90),
            bank_account_number: None,
            notes: None,
            details: vec![PayslipDetailCreate {
                payslip_id: None,
                component_id: 1,
                component_name: "Basic".to_string(),
                component_type: SalaryComponentType::Basic,
                is_earning: true,
                amount: Decimal::from(120),
            }],
        };

        let payslip = client(&server).create_payslip(&body).await.expect("create");
        mock.assert_async().await;
        assert_eq!(payslip.id, 10);
    }

    #[tokio::test]
    async fn validation_errors_are_flattened() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/api/v1/hr-payslips/10");
                then.status(422).json_body(json!({"detail": [
                    {"loc": ["body", "payment_date"], "msg": "invalid date format"}
                ]}));
            })
            .await;

        let err = client(&server)
            .update_payslip(10, &PayslipUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.user_message("fallback"),
            "body.payment_date: invalid date format"
        );
    }

    #[tokio::test]
    async fn delete_salary_component_returns_record() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/v1/hr-salary-components/4");
                then.status(200).json_body(json!({
                    "id": 4, "name": "Transport", "type": "allowance",
                    "is_earning": true, "description": null
                }));
            })
            .await;

        let removed = client(&server)
            .delete_salary_component(4)
            .await
            .expect("delete");
        mock.assert_async().await;
        assert_eq!(removed.component_type, SalaryComponentType::Allowance);
    }

    #[tokio::test]
    async fn list_employee_salaries_uses_custom_window() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/hr-employee-salaries/")
                    .query_param("skip", "10")
                    .query_param("limit", "5");
                then.status(200).json_body(json!([{
                    "id": 1, "employee_id": 2, "component_id": 3, "amount": 2500.5,
                    "effective_date": "2025-01-01", "end_date": null
                }]));
            })
            .await;

        let salaries = client(&server)
            .list_employee_salaries(ListParams::new(10, 5))
            .await
            .expect("list salaries");
        mock.assert_async().await;
        assert_eq!(salaries[0].amount, Decimal::new(25005, 1));
    }
}
