//! Page routing and route guards
//!
//! Guards are pure functions of an `AuthContext` snapshot, evaluated
//! synchronously on every navigation.

use crate::auth::AuthContext;
use crate::languages::find_language;

/// A page-level destination
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Language picker
    Home,
    Login,
    Register,
    /// Account page (signed-in users only)
    Accounts,
    /// Editor view for a language identifier
    Editor(String),
    NotFound,
}

impl Route {
    /// Resolve a URL path to a route
    pub fn resolve(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/accounts" => Route::Accounts,
            other => other
                .strip_prefix('/')
                .and_then(find_language)
                .map(|lang| Route::Editor(lang.id.to_string()))
                .unwrap_or(Route::NotFound),
        }
    }

    /// URL path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Accounts => "/accounts".to_string(),
            Route::Editor(language) => format!("/{}", language),
            Route::NotFound => "/404".to_string(),
        }
    }
}

/// Outcome of a guarded navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    Render(T),
    Redirect(Route),
}

/// Render only for signed-in callers; everyone else goes to login
pub fn protect<T>(element: T, auth: &AuthContext) -> Guarded<T> {
    if auth.is_authenticated() {
        Guarded::Render(element)
    } else {
        Guarded::Redirect(Route::Login)
    }
}

/// Render only for anonymous callers; signed-in users go home
pub fn anonymous_only<T>(element: T, auth: &AuthContext) -> Guarded<T> {
    if auth.is_authenticated() {
        Guarded::Redirect(Route::Home)
    } else {
        Guarded::Render(element)
    }
}

/// Resolve a path and apply the guard its page requires
pub fn resolve_page(path: &str, auth: &AuthContext) -> Guarded<Route> {
    let route = Route::resolve(path);
    match route {
        Route::Login | Route::Register => anonymous_only(route, auth),
        Route::Accounts => protect(route, auth),
        _ => Guarded::Render(route),
    }
}
