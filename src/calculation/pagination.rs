//! Client-side pagination and filtering of already-fetched lists.

use serde::{Deserialize, Serialize};

/// Default number of rows shown per page.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// A zero-based page window over an in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page. Zero is treated as one.
    pub rows_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Creates a window for the given page.
    pub fn new(page: usize, rows_per_page: usize) -> Self {
        Self {
            page,
            rows_per_page,
        }
    }

    fn per_page(&self) -> usize {
        self.rows_per_page.max(1)
    }

    /// Returns the rows of the current page; empty past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_payroll::calculation::Pagination;
    ///
    /// let rows: Vec<u32> = (1..=7).collect();
    /// assert_eq!(Pagination::new(1, 3).slice(&rows), &[4, 5, 6]);
    /// assert_eq!(Pagination::new(2, 3).slice(&rows), &[7]);
    /// assert!(Pagination::new(5, 3).slice(&rows).is_empty());
    /// ```
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.page.saturating_mul(self.per_page()).min(items.len());
        let end = start.saturating_add(self.per_page()).min(items.len());
        &items[start..end]
    }

    /// Number of pages needed for `total` rows, rounding up.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page())
    }

    /// Moves back to the first page when the list shrank below the current page.
    pub fn clamp_to(&mut self, total: usize) {
        let pages = self.page_count(total);
        if self.page >= pages {
            self.page = pages.saturating_sub(1);
        }
    }
}

/// Text an item exposes to the table search box.
pub trait Searchable {
    /// Concatenated searchable fields.
    fn search_text(&self) -> String;
}

/// Keeps the items whose search text contains `query`, ignoring case.
///
/// An empty or blank query keeps everything.
pub fn filter_by_text<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.search_text().to_lowercase().contains(&needle))
        .collect()
}

mod searchable_impls {
    use super::Searchable;
    use crate::models::{
        Department, Employee, EmployeeSalary, Leave, Payslip, SalaryComponent,
    };

    impl Searchable for Employee {
        fn search_text(&self) -> String {
            format!(
                "{} {} {}",
                self.id,
                self.display_name(),
                self.emp_email.as_deref().unwrap_or_default()
            )
        }
    }

    impl Searchable for Department {
        fn search_text(&self) -> String {
            format!(
                "{} {} {}",
                self.id,
                self.dept_name,
                self.dept_code.as_deref().unwrap_or_default()
            )
        }
    }

    impl Searchable for Leave {
        fn search_text(&self) -> String {
            format!(
                "{} {} {:?} {}",
                self.employee_id,
                self.status.as_str(),
                self.leave_type,
                self.reason.as_deref().unwrap_or_default()
            )
        }
    }

    impl Searchable for SalaryComponent {
        fn search_text(&self) -> String {
            format!(
                "{} {} {}",
                self.name,
                self.component_type.as_str(),
                self.description.as_deref().unwrap_or_default()
            )
        }
    }

    impl Searchable for EmployeeSalary {
        fn search_text(&self) -> String {
            format!(
                "{} {} {}",
                self.employee_id, self.component_id, self.effective_date
            )
        }
    }

    impl Searchable for Payslip {
        fn search_text(&self) -> String {
            format!(
                "{} {} {} {} {}",
                self.id,
                self.employee_id,
                self.pay_period_start_date,
                self.pay_period_end_date,
                self.notes.as_deref().unwrap_or_default()
            )
        }
    }
}
