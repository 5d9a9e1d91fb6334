mod terminal;

use crate::{
    AdminGateway, Console, GatewayError, GatewayResult, Navigator, Notifier, Route, Session,
};

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lm_core::{
    EntityId, IssuedLicense, License, LicenseOwner, LicenseType, NewUser, OnlinePlan,
    ReportPeriod, ReportStats, User, UserUpdate,
};

// =========================================================================
// Fixtures
// =========================================================================

pub(crate) fn user(id: i64, email: &str, active: bool) -> User {
    User {
        id: EntityId::Number(id),
        email: email.to_string(),
        name: None,
        last_name: None,
        phone: None,
        notes: None,
        plan: None,
        active,
        created_at: None,
        licenses: Vec::new(),
    }
}

pub(crate) fn license(
    id: i64,
    owner: i64,
    license_type: LicenseType,
    expires_at: Option<DateTime<Utc>>,
) -> License {
    License {
        id: EntityId::Number(id),
        user_id: Some(EntityId::Number(owner)),
        license_type,
        expires_at,
        token: None,
        short_code: None,
        notes: None,
        created_at: None,
        user: Some(LicenseOwner {
            id: EntityId::Number(owner),
            email: Some(format!("user{owner}@example.com")),
        }),
    }
}

pub(crate) fn ids(users: &[User]) -> Vec<i64> {
    users
        .iter()
        .map(|u| match u.id {
            EntityId::Number(n) => n,
            EntityId::Text(_) => -1,
        })
        .collect()
}

// =========================================================================
// Scripted gateway
// =========================================================================

/// In-memory backend that records every call as a short string.
#[derive(Default)]
pub(crate) struct FakeGateway {
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) users: Mutex<Vec<User>>,
    pub(crate) licenses: Mutex<Vec<License>>,
    pub(crate) toggled: Mutex<Option<User>>,
    /// Every call fails with this status and message when set
    pub(crate) failure: Mutex<Option<(u16, Option<String>)>>,
    /// Only `renew_license` fails with this status when set
    pub(crate) renew_failure: Mutex<Option<u16>>,
    /// Runs inside every call, before it answers
    pub(crate) on_call: Mutex<Option<Box<dyn Fn() + Send>>>,
}

impl FakeGateway {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn fail_with(&self, status: u16, message: Option<&str>) {
        *self.failure.lock().unwrap() = Some((status, message.map(String::from)));
    }

    fn record(&self, call: impl Into<String>) -> GatewayResult<()> {
        self.calls.lock().unwrap().push(call.into());

        if let Some(hook) = self.on_call.lock().unwrap().as_ref() {
            hook();
        }

        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(GatewayError::from_status(status, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminGateway for FakeGateway {
    async fn login(&self, email: &str, _password: &str) -> GatewayResult<String> {
        self.record(format!("login {email}"))?;
        Ok("token-123".to_string())
    }

    async fn ping(&self) -> GatewayResult<()> {
        self.record("ping")
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        self.record("list_users")?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn get_user(&self, id: &EntityId) -> GatewayResult<User> {
        self.record(format!("get_user {id}"))?;
        let users = self.users.lock().unwrap();
        let found = users.iter().find(|u| &u.id == id).cloned();
        found.ok_or_else(|| GatewayError::from_status(404, Some("User not found".to_string())))
    }

    async fn create_user(&self, user: &NewUser) -> GatewayResult<()> {
        self.record(format!("create_user {}", user.email))
    }

    async fn update_user(&self, id: &EntityId, update: &UserUpdate) -> GatewayResult<()> {
        self.record(format!("update_user {id} {}", update.email))
    }

    async fn toggle_user_active(&self, id: &EntityId) -> GatewayResult<User> {
        self.record(format!("toggle {id}"))?;
        Ok(self
            .toggled
            .lock()
            .unwrap()
            .clone()
            .expect("toggle response not scripted"))
    }

    async fn list_licenses(&self) -> GatewayResult<Vec<License>> {
        self.record("list_licenses")?;
        Ok(self.licenses.lock().unwrap().clone())
    }

    async fn create_offline_license(
        &self,
        user_id: &EntityId,
        machine_id: &str,
    ) -> GatewayResult<IssuedLicense> {
        self.record(format!("offline {user_id} {machine_id}"))?;
        Ok(IssuedLicense {
            short_code: Some("OFF-1".to_string()),
            token: Some("offline-token".to_string()),
            expires_at: None,
        })
    }

    async fn create_online_license(
        &self,
        user_id: &EntityId,
        plan: OnlinePlan,
    ) -> GatewayResult<IssuedLicense> {
        self.record(format!("online {user_id} {}", LicenseType::from(plan)))?;
        Ok(IssuedLicense {
            short_code: Some("ON-1".to_string()),
            token: Some("online-token".to_string()),
            expires_at: None,
        })
    }

    async fn renew_license(&self, user_id: &EntityId) -> GatewayResult<()> {
        self.record(format!("renew {user_id}"))?;
        match *self.renew_failure.lock().unwrap() {
            Some(status) => Err(GatewayError::from_status(status, None)),
            None => Ok(()),
        }
    }

    async fn get_report_stats(&self, period: ReportPeriod) -> GatewayResult<ReportStats> {
        self.record(format!("report {}-{}", period.year(), period.month()))?;
        Ok(ReportStats {
            active_users: 3,
            ..ReportStats::default()
        })
    }
}

// =========================================================================
// Recording surface
// =========================================================================

pub(crate) struct RecordingNotifier {
    pub(crate) successes: Mutex<Vec<String>>,
    pub(crate) errors: Mutex<Vec<String>>,
    pub(crate) prompts: Mutex<Vec<String>>,
    pub(crate) answer: bool,
}

impl RecordingNotifier {
    pub(crate) fn answering(answer: bool) -> Self {
        Self {
            successes: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            answer,
        }
    }

    pub(crate) fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub(crate) routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub(crate) type TestConsole = Console<FakeGateway, RecordingNotifier, RecordingNavigator>;

pub(crate) fn console(gateway: FakeGateway) -> TestConsole {
    Console::new(
        gateway,
        Session::with_token("token-123"),
        RecordingNotifier::answering(true),
        RecordingNavigator::default(),
    )
}

pub(crate) fn console_answering(gateway: FakeGateway, answer: bool) -> TestConsole {
    Console::new(
        gateway,
        Session::with_token("token-123"),
        RecordingNotifier::answering(answer),
        RecordingNavigator::default(),
    )
}
