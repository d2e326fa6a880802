//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::routes::Route;
use crate::session;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Session flag from the `is_auth` cookie - read
    pub session: ReadSignal<bool>,
    /// Session flag - write
    set_session: WriteSignal<bool>,
    /// Dark theme active - read
    pub dark_mode: ReadSignal<bool>,
    /// Dark theme active - write
    set_dark_mode: WriteSignal<bool>,
    /// Active screen - read
    pub route: ReadSignal<Route>,
    /// Active screen - write
    set_route: WriteSignal<Route>,
    api: StoredValue<ApiClient, LocalStorage>,
}

impl AppContext {
    /// Initial state from the cookie jar, local storage, and the location
    pub fn new(config: ApiConfig) -> Self {
        let dark = session::load_dark_mode();
        session::apply_dark_mode(dark);

        let (session, set_session) = signal(session::read_session_flag());
        let (dark_mode, set_dark_mode) = signal(dark);
        let (route, set_route) = signal(Route::current());

        Self {
            session,
            set_session,
            dark_mode,
            set_dark_mode,
            route,
            set_route,
            api: StoredValue::new_local(ApiClient::new(config)),
        }
    }

    /// Shared API client
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Go to `route`, adding a history entry
    pub fn navigate(&self, route: Route) {
        if self.route.get_untracked() == route {
            return;
        }
        let path = route.path();
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&path));
        }
        tracing::debug!(path = %path, "[ROUTE] navigate");
        self.set_route.set(route);
    }

    /// Go to `route` in place of the current entry (guard redirects)
    pub fn redirect(&self, route: Route) {
        let path = route.path();
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
        }
        tracing::debug!(path = %path, "[ROUTE] redirect");
        self.set_route.set(route);
    }

    /// Re-read the route after back/forward
    pub fn sync_route(&self) {
        self.set_route.set(Route::current());
    }

    /// Re-read the session cookie (after login)
    pub fn refresh_session(&self) {
        self.set_session.set(session::read_session_flag());
    }

    /// Forget the session locally: cookies, cached queries, flag
    pub fn clear_session(&self) {
        session::clear_session_cookies();
        self.api.with_value(|api| api.clear_cache());
        self.set_session.set(false);
    }

    pub fn toggle_theme(&self) {
        let dark = !self.dark_mode.get_untracked();
        session::store_dark_mode(dark);
        session::apply_dark_mode(dark);
        self.set_dark_mode.set(dark);
    }
}
