//! HTTP preview service for payslip drafts.
//!
//! This module provides stateless endpoints that compute totals for draft
//! detail lines and validate complete payslip drafts, returning the exact
//! body the REST API would receive.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayslipDraftRequest, TotalsRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
