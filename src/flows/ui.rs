//! Navigation and notification seams between the flows and the shell.

use std::sync::{Arc, RwLock};
use tracing::info;

/// Routes the flows can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
}

impl Route {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::SignIn => "/sign-in",
            Self::SignUp => "/sign-up",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fire-and-forget navigation; the return value is never consumed.
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: Route);
}

/// Fire-and-forget user-visible notice.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str);
}

/// Navigator that only logs the route change. Used by the CLI, where there
/// is no router to drive.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn go_to(&self, route: Route) {
        info!(route = %route, "navigate");
    }
}

/// Notifier that logs the notice.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, message: &str) {
        info!(notice = %message, "notify");
    }
}

/// Navigator that records every route for later inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    routes: Arc<RwLock<Vec<Route>>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.routes.read().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: Route) {
        if let Ok(mut routes) = self.routes.write() {
            routes.push(route);
        }
    }
}

/// Notifier that records every notice for later inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    messages: Arc<RwLock<Vec<String>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.read().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str) {
        if let Ok(mut messages) = self.messages.write() {
            messages.push(message.to_string());
        }
    }
}
