pub(crate) mod admin_gateway;
pub(crate) mod error;
pub(crate) mod http_gateway;
pub(crate) mod session;

pub use admin_gateway::AdminGateway;
pub use error::{GatewayError, Result as GatewayResult};
pub use http_gateway::HttpGateway;
pub use session::Session;
