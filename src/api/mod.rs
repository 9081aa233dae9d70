//! HTTP API module for the reconciliation engine.
//!
//! This module provides the REST endpoints the admin front end calls:
//! earnings and payroll summaries, the obligation ledger, and the bonus,
//! vacation and expense-lookup writes.

mod handlers;
mod principal;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use principal::{PRINCIPAL_ID_HEADER, PRINCIPAL_ROLE_HEADER, Principal, Role};
pub use request::{MonthQuery, PeriodQuery};
pub use response::{Acknowledgement, ApiError, ApiErrorResponse, HealthResponse};
pub use state::AppState;
