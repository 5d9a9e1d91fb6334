use crate::GatewayResult;

use async_trait::async_trait;
use lm_core::{
    EntityId, IssuedLicense, License, NewUser, OnlinePlan, ReportPeriod, ReportStats, User,
    UserUpdate,
};

/// Remote operations of the licensing backend.
///
/// Every call is independent; callers decide what to do with the outcome.
#[async_trait]
pub trait AdminGateway: Send + Sync {
    /// Exchange admin credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> GatewayResult<String>;

    /// Reachability check against `GET /ping`.
    async fn ping(&self) -> GatewayResult<()>;

    async fn list_users(&self) -> GatewayResult<Vec<User>>;

    async fn get_user(&self, id: &EntityId) -> GatewayResult<User>;

    /// Create a user. The response body is ignored.
    async fn create_user(&self, user: &NewUser) -> GatewayResult<()>;

    /// Replace the editable fields of a user. The response body is ignored.
    async fn update_user(&self, id: &EntityId, update: &UserUpdate) -> GatewayResult<()>;

    /// Flip the active flag; returns the user as the backend now stores it.
    async fn toggle_user_active(&self, id: &EntityId) -> GatewayResult<User>;

    async fn list_licenses(&self) -> GatewayResult<Vec<License>>;

    /// Issue a LOCAL license bound to one machine.
    async fn create_offline_license(
        &self,
        user_id: &EntityId,
        machine_id: &str,
    ) -> GatewayResult<IssuedLicense>;

    async fn create_online_license(
        &self,
        user_id: &EntityId,
        plan: OnlinePlan,
    ) -> GatewayResult<IssuedLicense>;

    /// Renew the monthly license of a user. The response body is ignored.
    async fn renew_license(&self, user_id: &EntityId) -> GatewayResult<()>;

    async fn get_report_stats(&self, period: ReportPeriod) -> GatewayResult<ReportStats>;
}
