/// Transient operator notices and blocking confirmations.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);

    /// Ask a yes/no question; `false` means the operator declined.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Views a workflow can send the operator to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Users,
    Licenses,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Dashboard => "dashboard",
            Route::Users => "users",
            Route::Licenses => "licenses",
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
