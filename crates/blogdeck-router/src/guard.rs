//! Navigation guard.
//!
//! [`decide`] is a pure function of the flavor, the navigation, and a
//! session snapshot. Applying the outcome (notices, redirects) is left to
//! the caller; see [`Router`](crate::Router).

use blogdeck_client::{Flavor, LOGIN_PATH, Notice};
use blogdeck_session::Session;
use serde::Serialize;

use crate::route::ResolvedRoute;

/// Where signed-in users are sent instead of the login page.
pub const HOME_PATH: &str = "/";

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in first";
pub const NO_PERMISSION_MESSAGE: &str = "You do not have permission to access this page";

/// A navigation about to happen.
#[derive(Debug, Clone)]
pub struct Navigation {
    pub to: ResolvedRoute,
    /// Path being left, if any.
    pub from: Option<String>,
}

/// Outcome of the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proceed to the target.
    Allow,
    /// Go somewhere else instead, optionally telling the user why.
    RedirectTo { path: String, notice: Option<Notice> },
    /// Refuse the target, tell the user, and go to `redirect`.
    Deny { notice: Notice, redirect: String },
}

impl Decision {
    fn redirect(path: &str) -> Self {
        Decision::RedirectTo {
            path: path.to_string(),
            notice: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Path navigation ends up on instead of the target, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo { path, .. } => Some(path),
            Decision::Deny { redirect, .. } => Some(redirect),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo { notice, .. } => notice.as_ref(),
            Decision::Deny { notice, .. } => Some(notice),
        }
    }
}

/// Short machine-readable label, used in logs and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    Allow,
    Redirect,
    Deny,
}

impl From<&Decision> for DecisionKind {
    fn from(decision: &Decision) -> Self {
        match decision {
            Decision::Allow => DecisionKind::Allow,
            Decision::RedirectTo { .. } => DecisionKind::Redirect,
            Decision::Deny { .. } => DecisionKind::Deny,
        }
    }
}

/// Decide whether `navigation` may proceed.
///
/// Checks run in order and the first that applies wins:
/// 1. authentication, with flavor-specific rules for what requires it and
///    what counts as signed in;
/// 2. signed-in users asking for the login page go home;
/// 3. admin-only routes refuse non-administrators.
pub fn decide(flavor: Flavor, navigation: &Navigation, session: &Session) -> Decision {
    let to = &navigation.to;

    match flavor {
        Flavor::Site => {
            if to.meta.requires_auth != Some(false) && !session.is_login() {
                return Decision::RedirectTo {
                    path: LOGIN_PATH.to_string(),
                    notice: Some(Notice::warning(LOGIN_REQUIRED_MESSAGE)),
                };
            }
        }
        Flavor::Console => {
            let requires_auth = to.matched.iter().any(|m| m.requires_auth == Some(true))
                || to.meta.requires_auth == Some(true);
            if requires_auth && !session.has_token() {
                return Decision::redirect(LOGIN_PATH);
            }
        }
    }

    if to.path == LOGIN_PATH && session.has_token() {
        return Decision::redirect(HOME_PATH);
    }

    if to.meta.requires_admin && !session.is_admin() {
        let redirect = match flavor {
            Flavor::Site => LOGIN_PATH.to_string(),
            Flavor::Console => navigation
                .from
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| HOME_PATH.to_string()),
        };
        return Decision::Deny {
            notice: Notice::error(NO_PERMISSION_MESSAGE),
            redirect,
        };
    }

    Decision::Allow
}
