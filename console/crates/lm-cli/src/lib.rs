//! lm-cli library
//!
//! The admin gateway, the console workflows and the terminal surface used by
//! the `lm` binary. Exported for integration tests.

pub mod error;
pub mod gateway;
pub mod logger;
pub mod output;
pub mod session_store;
pub mod terminal;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use error::{CliError, Result as CliResult};
pub use gateway::{AdminGateway, GatewayError, GatewayResult, HttpGateway, Session};
pub use output::{IssuedRow, LicenseRow, ReportRow, UserRow};
pub use session_store::SessionStore;
pub use terminal::{TerminalNavigator, TerminalNotifier};
pub use workflow::{
    Console, InFlight, InFlightGuard, Navigator, Notifier, RENEW_PROMPT, RenewOutcome, Route,
    UserPicker, ViewScope, ViewTicket, WorkflowError, WorkflowResult,
};
