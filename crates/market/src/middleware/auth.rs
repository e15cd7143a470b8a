//! Route guard.
//!
//! Evaluated before a view is built. The guard only looks at the route and
//! the session state, so it never touches storage.

use crate::models::{SessionState, SessionUser};
use crate::routes::Route;

/// Notice shown alongside a guard redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardNotice {
    /// A protected view was requested without a session.
    SignInRequired,
    /// A student requested an admin-only view.
    AccessDenied,
}

impl GuardNotice {
    /// Text shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SignInRequired => "Please sign in to continue",
            Self::AccessDenied => "Access denied: admin privileges required",
        }
    }
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Build and show the requested view.
    Render(Route),
    /// Navigate somewhere else instead.
    Redirect {
        to: Route,
        notice: Option<GuardNotice>,
    },
}

impl RouteDecision {
    const fn redirect(to: Route) -> Self {
        Self::Redirect { to, notice: None }
    }

    /// Route that ends up on screen.
    #[must_use]
    pub const fn target(&self) -> &Route {
        match self {
            Self::Render(route) | Self::Redirect { to: route, .. } => route,
        }
    }
}

/// Decide whether `route` may be shown for `session`.
#[must_use]
pub fn guard(route: Route, session: SessionState) -> RouteDecision {
    if matches!(route, Route::NotFound(_)) {
        return RouteDecision::Render(route);
    }

    let Some(role) = session.role() else {
        return match route {
            Route::Index => RouteDecision::redirect(Route::SignIn),
            route if route.is_protected() => RouteDecision::Redirect {
                to: Route::SignIn,
                notice: Some(GuardNotice::SignInRequired),
            },
            route => RouteDecision::Render(route),
        };
    };

    match route {
        Route::Index => RouteDecision::redirect(Route::landing_for(role)),
        route if route.is_guest_only() => RouteDecision::redirect(Route::landing_for(role)),
        Route::Admin if !role.is_admin() => RouteDecision::Redirect {
            to: Route::Home,
            notice: Some(GuardNotice::AccessDenied),
        },
        route => RouteDecision::Render(route),
    }
}

/// Rejection returned by operations that need a particular session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    /// No one is signed in.
    #[error("sign in required")]
    SignInRequired,
    /// Signed in, but not as an admin.
    #[error("admin access required")]
    AccessDenied,
}

impl AuthRejection {
    /// Route a rejected caller should be sent to.
    #[must_use]
    pub const fn redirect(self) -> Route {
        match self {
            Self::SignInRequired => Route::SignIn,
            Self::AccessDenied => Route::Home,
        }
    }
}

/// Require a signed-in user.
///
/// # Errors
///
/// Returns `AuthRejection::SignInRequired` when no one is signed in.
pub fn require_auth(user: Option<&SessionUser>) -> Result<&SessionUser, AuthRejection> {
    user.filter(|user| user.is_authenticated)
        .ok_or(AuthRejection::SignInRequired)
}

/// Require a signed-in admin.
///
/// # Errors
///
/// Returns `AuthRejection::SignInRequired` when no one is signed in and
/// `AuthRejection::AccessDenied` for a student session.
pub fn require_admin(user: Option<&SessionUser>) -> Result<&SessionUser, AuthRejection> {
    let user = require_auth(user)?;
    if user.role.is_admin() {
        Ok(user)
    } else {
        Err(AuthRejection::AccessDenied)
    }
}
