use crate::{
    AdminGateway, GatewayResult, InFlight, Navigator, Notifier, Route, Session, UserPicker,
    ViewScope, ViewTicket, WorkflowError, WorkflowResult,
};

use lm_core::{
    EntityId, IssuedLicense, License, LicenseDraft, LicenseRequest, NewUser, ReportPeriod,
    ReportStats, Roster, User, UserUpdate, ValidationError,
};
use log::{debug, info, warn};

pub const RENEW_PROMPT: &str = "Renew this license for 30 more days?";

/// Result of a renewal that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewOutcome {
    /// The operator said no; nothing was sent
    Declined,
    /// `refreshed` is false when the license list could not be re-fetched
    /// or the view was left meanwhile
    Renewed { refreshed: bool },
}

/// Sequences validation, backend calls, roster updates and operator
/// feedback for every console action.
///
/// Backend failures never escape unreported: each one is turned into a
/// notice before it is returned. A rejected credential also signs the
/// session out and sends the operator to the login view.
pub struct Console<G, N, V> {
    gateway: G,
    session: Session,
    notifier: N,
    navigator: V,
    in_flight: InFlight,
}

impl<G, N, V> Console<G, N, V>
where
    G: AdminGateway,
    N: Notifier,
    V: Navigator,
{
    pub fn new(gateway: G, session: Session, notifier: N, navigator: V) -> Self {
        Self {
            gateway,
            session,
            notifier,
            navigator,
            in_flight: InFlight::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn navigator(&self) -> &V {
        &self.navigator
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in and keep the token in the shared session. Returns the token
    /// so the caller can persist it.
    pub async fn login(&self, email: &str, password: &str) -> WorkflowResult<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail.into());
        }

        let token = self
            .gateway
            .login(email, password)
            .await
            .map_err(|e| self.fail(e.into(), "Failed to sign in"))?;

        self.session.set(token.clone());
        info!("Signed in as {}", email);
        self.navigator.navigate(Route::Dashboard);
        Ok(token)
    }

    pub fn logout(&self) {
        self.session.clear();
        info!("Signed out");
        self.navigator.navigate(Route::Login);
    }

    pub async fn ping(&self) -> WorkflowResult<()> {
        self.gateway
            .ping()
            .await
            .map_err(|e| self.fail(e.into(), "Backend unreachable"))
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub async fn load_users(&self, scope: &ViewScope) -> WorkflowResult<Roster<User>> {
        let users = self
            .fetch(scope, self.gateway.list_users(), "Failed to load users")
            .await?;
        info!("Loaded {} users", users.len());
        Ok(Roster::from_records(users))
    }

    pub async fn load_licenses(&self, scope: &ViewScope) -> WorkflowResult<Roster<License>> {
        let licenses = self
            .fetch(scope, self.gateway.list_licenses(), "Failed to load licenses")
            .await?;
        info!("Loaded {} licenses", licenses.len());
        Ok(Roster::from_records(licenses))
    }

    /// Load a user for the edit form.
    pub async fn load_user(&self, scope: &ViewScope, id: &EntityId) -> WorkflowResult<User> {
        self.fetch(scope, self.gateway.get_user(id), "Failed to load user")
            .await
    }

    pub async fn load_user_picker(&self, scope: &ViewScope) -> WorkflowResult<UserPicker> {
        let users = self
            .fetch(scope, self.gateway.list_users(), "Failed to load users")
            .await?;
        Ok(UserPicker::new(users))
    }

    pub async fn load_report(
        &self,
        scope: &ViewScope,
        period: ReportPeriod,
    ) -> WorkflowResult<ReportStats> {
        self.fetch(
            scope,
            self.gateway.get_report_stats(period),
            "Failed to load statistics",
        )
        .await
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn create_user(&self, new_user: &NewUser) -> WorkflowResult<()> {
        new_user.validate()?;

        self.gateway
            .create_user(new_user)
            .await
            .map_err(|e| self.fail(e.into(), "Failed to create user"))?;

        info!("Created user {}", new_user.email);
        self.notifier.success("User created");
        self.navigator.navigate(Route::Dashboard);
        Ok(())
    }

    pub async fn update_user(&self, id: &EntityId, update: &UserUpdate) -> WorkflowResult<()> {
        update.validate()?;

        self.gateway
            .update_user(id, update)
            .await
            .map_err(|e| self.fail(e.into(), "Failed to update user"))?;

        info!("Updated user {}", id);
        self.notifier.success("User updated");
        self.navigator.navigate(Route::Users);
        Ok(())
    }

    /// Flip a user's active flag and patch `users` with the record the
    /// backend returns.
    pub async fn toggle_user_active(
        &self,
        users: &mut Roster<User>,
        id: &EntityId,
    ) -> WorkflowResult<User> {
        let _guard = self.in_flight.acquire(format!("user {id}"))?;

        let updated = self
            .gateway
            .toggle_user_active(id)
            .await
            .map_err(|e| self.fail(e.into(), "Failed to change user state"))?;

        if !users.patch(id, updated.clone()) {
            debug!("User {} is not in the current roster", id);
        }

        info!("User {} is now {}", id, if updated.active { "active" } else { "inactive" });
        self.notifier.success(if updated.active {
            "User activated"
        } else {
            "User deactivated"
        });
        Ok(updated)
    }

    // =========================================================================
    // Licenses
    // =========================================================================

    /// Validate the form and issue the license through the endpoint that
    /// matches its type. Validation failures are returned without a notice.
    pub async fn create_license(&self, draft: LicenseDraft<'_>) -> WorkflowResult<IssuedLicense> {
        let request = draft.validate()?;

        let result = match &request {
            LicenseRequest::Offline {
                user_id,
                machine_id,
            } => {
                self.gateway
                    .create_offline_license(user_id, machine_id)
                    .await
            }
            LicenseRequest::Online { user_id, plan } => {
                self.gateway.create_online_license(user_id, *plan).await
            }
        };

        let issued = result.map_err(|e| self.fail(e.into(), "Failed to create license"))?;

        info!(
            "Issued {} license for user {}",
            request.license_type(),
            request.user_id()
        );
        self.notifier.success("License created");
        Ok(issued)
    }

    /// Renew a user's monthly license after confirmation, then reload
    /// `licenses` from the backend. The reload is skipped, and `licenses`
    /// left as is, once `scope` has been left.
    pub async fn renew_license(
        &self,
        scope: &ViewScope,
        licenses: &mut Roster<License>,
        user_id: &EntityId,
    ) -> WorkflowResult<RenewOutcome> {
        let ticket = scope.ticket();
        let _guard = self
            .in_flight
            .acquire(format!("license renewal for user {user_id}"))?;

        if !self.notifier.confirm(RENEW_PROMPT) {
            info!("Renewal for user {} declined", user_id);
            return Ok(RenewOutcome::Declined);
        }

        self.gateway
            .renew_license(user_id)
            .await
            .map_err(|e| self.fail(e.into(), "Failed to renew license"))?;

        info!("Renewed license for user {}", user_id);
        self.notifier.success("License renewed");

        if !ticket.is_current() {
            debug!("License view was left; not reloading");
            return Ok(RenewOutcome::Renewed { refreshed: false });
        }

        let reloaded = self.gateway.list_licenses().await;
        match self.settle(&ticket, reloaded, "Failed to load licenses") {
            Ok(fresh) => {
                licenses.load(fresh);
                Ok(RenewOutcome::Renewed { refreshed: true })
            }
            Err(_) => Ok(RenewOutcome::Renewed { refreshed: false }),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Await a read for `scope`, discarding the result if the view was left
    /// in the meantime.
    async fn fetch<T>(
        &self,
        scope: &ViewScope,
        request: impl Future<Output = GatewayResult<T>>,
        fallback: &str,
    ) -> WorkflowResult<T> {
        let ticket = scope.ticket();
        let result = request.await;
        self.settle(&ticket, result, fallback)
    }

    fn settle<T>(
        &self,
        ticket: &ViewTicket,
        result: GatewayResult<T>,
        fallback: &str,
    ) -> WorkflowResult<T> {
        if !ticket.is_current() {
            debug!("Discarding response for a view that was left");
            return Err(WorkflowError::stale_view());
        }

        result.map_err(|e| self.fail(e.into(), fallback))
    }

    /// Report a backend failure to the operator.
    fn fail(&self, error: WorkflowError, fallback: &str) -> WorkflowError {
        if error.is_unauthorized() {
            warn!("Session rejected by the backend");
            self.session.clear();
            self.navigator.navigate(Route::Login);
        }

        warn!("{}: {}", fallback, error);
        self.notifier.error(&error.user_message(fallback));
        error
    }
}
