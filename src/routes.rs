//! Client routes and the private-route gate.

use std::fmt;

use crate::session::AuthSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Movie browsing. Requires login.
    Browse,
    Login,
    Signup,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Browse, Route::Login, Route::Signup];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Browse => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
        }
    }

    /// Trailing slashes are ignored; unknown paths are `None`.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Route::Browse)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    /// An auth request is pending; show a placeholder.
    Loading,
    Redirect(Route),
}

pub fn gate(route: Route, session: &AuthSession) -> RouteDecision {
    if !route.is_private() {
        return RouteDecision::Render;
    }
    if session.is_loading() {
        RouteDecision::Loading
    } else if session.is_authenticated() {
        RouteDecision::Render
    } else {
        RouteDecision::Redirect(Route::Login)
    }
}
