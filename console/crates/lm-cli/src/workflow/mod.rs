pub(crate) mod console;
pub(crate) mod error;
pub(crate) mod in_flight;
pub(crate) mod surface;
pub(crate) mod user_picker;
pub(crate) mod view_scope;

pub use console::{Console, RENEW_PROMPT, RenewOutcome};
pub use error::{Result as WorkflowResult, WorkflowError};
pub use in_flight::{InFlight, InFlightGuard};
pub use surface::{Navigator, Notifier, Route};
pub use user_picker::UserPicker;
pub use view_scope::{ViewScope, ViewTicket};
