use crate::{AdminGateway, GatewayError, GatewayResult, Session};

use std::time::Duration;

use async_trait::async_trait;
use lm_core::{
    EntityId, IssuedLicense, License, NewUser, OnlinePlan, ReportPeriod, ReportStats, User,
    UserUpdate,
};
use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP client for the licensing backend REST API
pub struct HttpGateway {
    pub base_url: String,
    session: Session,
    client: ReqwestClient,
}

impl HttpGateway {
    /// Create a new gateway
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://localhost:4443")
    /// * `session` - Shared credential; its token is read on every request
    pub fn new(base_url: &str, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            client: ReqwestClient::new(),
        }
    }

    /// Create a gateway whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: &str,
        session: Session,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            client,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build a request, attaching the bearer token when signed in
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Send the request and return the raw body of a successful response
    async fn send(&self, req: RequestBuilder) -> GatewayResult<Vec<u8>> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let message = error_message(&body);
            warn!(
                "Backend answered {}: {}",
                status,
                message.as_deref().unwrap_or("no message")
            );
            return Err(GatewayError::from_status(status.as_u16(), message));
        }

        Ok(body)
    }

    /// Send the request and decode the JSON body
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> GatewayResult<T> {
        let body = self.send(req).await?;
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };
        Ok(serde_json::from_slice(body)?)
    }

    /// Send the request and only check its status
    async fn execute_discarding(&self, req: RequestBuilder) -> GatewayResult<()> {
        self.send(req).await.map(|_| ())
    }
}

/// Extract the operator-facing message from an error body.
///
/// Understands `{"error": "msg"}`, `{"error": {"code", "message"}}` and a
/// top-level `{"message": "msg"}`.
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    let from_error = match value.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
        None => None,
    };

    from_error
        .or_else(|| value.get("message").and_then(Value::as_str).map(String::from))
        .filter(|message| !message.trim().is_empty())
}

/// Some endpoints answer with the record, others wrap it as `{"user": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserBody {
    Wrapped { user: User },
    Bare(User),
}

impl From<UserBody> for User {
    fn from(body: UserBody) -> Self {
        match body {
            UserBody::Wrapped { user } | UserBody::Bare(user) => user,
        }
    }
}

#[async_trait]
impl AdminGateway for HttpGateway {
    // =========================================================================
    // Session Operations
    // =========================================================================

    async fn login(&self, email: &str, password: &str) -> GatewayResult<String> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct LoginResponse {
            token: String,
        }

        let body = LoginRequest { email, password };
        let req = self.request(Method::POST, "/admin/login").json(&body);
        let response: LoginResponse = self.execute(req).await?;
        Ok(response.token)
    }

    async fn ping(&self) -> GatewayResult<()> {
        let req = self.request(Method::GET, "/ping");
        self.execute_discarding(req).await
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let req = self.request(Method::GET, "/users");
        self.execute(req).await
    }

    async fn get_user(&self, id: &EntityId) -> GatewayResult<User> {
        let req = self.request(Method::GET, &format!("/users/{}", id));
        let body: UserBody = self.execute(req).await?;
        Ok(body.into())
    }

    async fn create_user(&self, user: &NewUser) -> GatewayResult<()> {
        let req = self.request(Method::POST, "/users").json(user);
        self.execute_discarding(req).await
    }

    async fn update_user(&self, id: &EntityId, update: &UserUpdate) -> GatewayResult<()> {
        let req = self
            .request(Method::PUT, &format!("/users/{}", id))
            .json(update);
        self.execute_discarding(req).await
    }

    async fn toggle_user_active(&self, id: &EntityId) -> GatewayResult<User> {
        let req = self.request(Method::PUT, &format!("/users/{}/toggle-active", id));
        let body: UserBody = self.execute(req).await?;
        Ok(body.into())
    }

    // =========================================================================
    // License Operations
    // =========================================================================

    async fn list_licenses(&self) -> GatewayResult<Vec<License>> {
        let req = self.request(Method::GET, "/licenses");
        self.execute(req).await
    }

    async fn create_offline_license(
        &self,
        user_id: &EntityId,
        machine_id: &str,
    ) -> GatewayResult<IssuedLicense> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct OfflineRequest<'a> {
            user_id: &'a EntityId,
            machine_id: &'a str,
            #[serde(rename = "type")]
            license_type: &'static str,
        }

        let body = OfflineRequest {
            user_id,
            machine_id,
            license_type: "LOCAL",
        };
        let req = self
            .request(Method::POST, "/licenses/generate-offline")
            .json(&body);
        self.execute(req).await
    }

    async fn create_online_license(
        &self,
        user_id: &EntityId,
        plan: OnlinePlan,
    ) -> GatewayResult<IssuedLicense> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct OnlineRequest<'a> {
            user_id: &'a EntityId,
            plan_type: OnlinePlan,
        }

        let body = OnlineRequest {
            user_id,
            plan_type: plan,
        };
        let req = self
            .request(Method::POST, "/licenses-online/create")
            .json(&body);
        self.execute(req).await
    }

    async fn renew_license(&self, user_id: &EntityId) -> GatewayResult<()> {
        let req = self.request(Method::POST, &format!("/licenses/renew/{}", user_id));
        self.execute_discarding(req).await
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    async fn get_report_stats(&self, period: ReportPeriod) -> GatewayResult<ReportStats> {
        let path = format!("/reports?month={}&year={}", period.month(), period.year());
        let req = self.request(Method::GET, &path);
        self.execute(req).await
    }
}
