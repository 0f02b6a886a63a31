//! Dashboard session for the retention workspace.
//!
//! [`DashboardSession`] ties ingestion, mapping, transformation and packaging
//! together behind one explicit state object. Front ends (the CLI today)
//! mutate the session in response to user input and render the
//! [`DashboardView`] it returns.

pub mod error;
pub mod session;
pub mod view;

pub use error::{Result, SessionError};
pub use session::DashboardSession;
pub use view::{DashboardView, EmployeePackage};
