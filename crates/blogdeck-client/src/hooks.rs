//! Seams between the gateway and the application around it.
//!
//! The gateway never owns session state or UI. It asks an [`AuthContext`]
//! for the bearer token, reports user-facing messages through a
//! [`Notifier`], and asks a [`Navigator`] to move to the login screen when
//! the backend rejects the session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two front-end applications a component behaves as.
///
/// The site and the console diverge in a few places (storage keys, login
/// endpoint, which 401 signal invalidates the session, where an admin
/// denial redirects to). Those differences are kept, not unified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Public blog site.
    #[default]
    Site,
    /// Administrative console.
    Console,
}

impl Flavor {
    /// Application name used in document titles.
    pub fn app_name(self) -> &'static str {
        match self {
            Flavor::Site => "blog-web",
            Flavor::Console => "blog-admin",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Site => f.write_str("site"),
            Flavor::Console => f.write_str("console"),
        }
    }
}

impl std::str::FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "site" | "web" => Ok(Flavor::Site),
            "console" | "admin" => Ok(Flavor::Console),
            other => Err(format!("unknown flavor '{}'", other)),
        }
    }
}

/// Severity of a transient user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Create an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Create a warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Create an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Source of the bearer token and owner of session invalidation.
pub trait AuthContext: Send + Sync {
    /// Current bearer token. `None` or an empty string means anonymous.
    fn bearer_token(&self) -> Option<String>;

    /// Drop the session after the backend rejected it.
    fn invalidate(&self);
}

/// Surface for transient user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Navigation side effects requested outside of the route guard.
pub trait Navigator: Send + Sync {
    /// Move the application to `path`.
    fn redirect(&self, path: &str);
}

/// Anonymous access: never sends a token, ignores invalidation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthContext for Anonymous {
    fn bearer_token(&self) -> Option<String> {
        None
    }

    fn invalidate(&self) {}
}

/// Notifier that forwards notices to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::error!(message = %notice.message, "notice"),
            NoticeLevel::Warning => tracing::warn!(message = %notice.message, "notice"),
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(message = %notice.message, "notice")
            }
        }
    }
}

/// Navigator that only records the request in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, path: &str) {
        tracing::info!(path = %path, "navigation requested");
    }
}
