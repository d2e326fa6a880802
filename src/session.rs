//! Session and Theme Persistence
//!
//! The session flag is a cookie set by the server; the client only reads it
//! and clears it on logout. The theme is kept in local storage.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

pub const SESSION_COOKIE: &str = "is_auth";
pub const TOKEN_COOKIES: [&str; 2] = ["access_token", "refresh_token"];

pub const THEME_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

/// Value of cookie `name` in a `document.cookie` string
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| percent_decode_str(value.trim()).decode_utf8_lossy().into_owned())
    })
}

/// A non-empty `is_auth` cookie counts as a session
pub fn session_flag_from_cookies(header: &str) -> bool {
    cookie_value(header, SESSION_COOKIE).is_some_and(|v| !v.is_empty())
}

/// `Set-Cookie` string that deletes `name`
pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Max-Age=0; path=/", name)
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

pub fn read_session_flag() -> bool {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .map(|header| session_flag_from_cookies(&header))
        .unwrap_or(false)
}

/// Delete the session flag and token cookies
pub fn clear_session_cookies() {
    let Some(doc) = html_document() else {
        return;
    };
    for name in std::iter::once(SESSION_COOKIE).chain(TOKEN_COOKIES) {
        if let Err(err) = doc.set_cookie(&expired_cookie(name)) {
            tracing::warn!(cookie = name, error = ?err, "[SESSION] failed to clear cookie");
        }
    }
}

pub fn theme_from_storage(stored: Option<&str>) -> bool {
    stored == Some("dark")
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Saved theme; light when nothing was saved
pub fn load_dark_mode() -> bool {
    let stored = local_storage().and_then(|s| s.get_item(THEME_KEY).ok().flatten());
    theme_from_storage(stored.as_deref())
}

pub fn store_dark_mode(dark: bool) {
    let value = if dark { "dark" } else { "light" };
    if let Some(storage) = local_storage() {
        if storage.set_item(THEME_KEY, value).is_err() {
            tracing::warn!("[THEME] local storage rejected theme");
        }
    }
}

/// Toggle the `dark` class on the document element
pub fn apply_dark_mode(dark: bool) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.class_list().toggle_with_force(DARK_CLASS, dark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_lookup() {
        let header = "theme=x; is_auth=true;access_token=abc%3D%3D";
        assert_eq!(cookie_value(header, "is_auth").as_deref(), Some("true"));
        assert_eq!(cookie_value(header, "access_token").as_deref(), Some("abc=="));
        assert_eq!(cookie_value(header, "refresh_token"), None);
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        assert_eq!(cookie_value("not_is_auth=1", "is_auth"), None);
    }

    #[test]
    fn test_session_flag() {
        assert!(session_flag_from_cookies("is_auth=true"));
        assert!(!session_flag_from_cookies("is_auth="));
        assert!(!session_flag_from_cookies(""));
        assert!(!session_flag_from_cookies("other=1"));
    }

    #[test]
    fn test_expired_cookie() {
        assert_eq!(expired_cookie("is_auth"), "is_auth=; Max-Age=0; path=/");
    }

    #[test]
    fn test_theme_from_storage() {
        assert!(theme_from_storage(Some("dark")));
        assert!(!theme_from_storage(Some("light")));
        assert!(!theme_from_storage(None));
    }
}
