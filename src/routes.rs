//! Client Routes
//!
//! Path-based screens. The active route lives in the app context and is
//! mirrored to the browser history.

use std::time::Duration;

use percent_encoding::percent_decode_str;

use crate::api::path_segment;
use crate::config::REDIRECT_DELAY;

/// Delayed navigation after an account flow succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    VerifyEmail,
    ResendOtp,
    ResetPasswordLink,
    ResetPasswordConfirm { id: String, token: String },
    Tasks,
    Profile,
    ChangePassword,
    NotFound,
}

impl Route {
    /// Resolve a location path; unknown paths map to `NotFound`
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["account", "login"] => Route::Login,
            ["account", "register"] => Route::Register,
            ["account", "verify-email"] => Route::VerifyEmail,
            ["account", "resend-otp"] => Route::ResendOtp,
            ["account", "reset-password-link"] => Route::ResetPasswordLink,
            ["account", "reset-password-confirm", id, token] => Route::ResetPasswordConfirm {
                id: decode_segment(id),
                token: decode_segment(token),
            },
            ["user", "task"] => Route::Tasks,
            ["user", "profile"] => Route::Profile,
            ["user", "change-password"] => Route::ChangePassword,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/account/login".to_string(),
            Route::Register => "/account/register".to_string(),
            Route::VerifyEmail => "/account/verify-email".to_string(),
            Route::ResendOtp => "/account/resend-otp".to_string(),
            Route::ResetPasswordLink => "/account/reset-password-link".to_string(),
            Route::ResetPasswordConfirm { id, token } => format!(
                "/account/reset-password-confirm/{}/{}",
                path_segment(id),
                path_segment(token)
            ),
            Route::Tasks => "/user/task".to_string(),
            Route::Profile => "/user/profile".to_string(),
            Route::ChangePassword => "/user/change-password".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Tasks | Route::Profile | Route::ChangePassword)
    }

    /// Account screens that make no sense once signed in
    pub fn guest_only(&self) -> bool {
        matches!(
            self,
            Route::Login
                | Route::Register
                | Route::VerifyEmail
                | Route::ResendOtp
                | Route::ResetPasswordLink
                | Route::ResetPasswordConfirm { .. }
        )
    }

    /// Where the guard sends this route, if anywhere
    pub fn redirect_for(&self, has_session: bool) -> Option<Route> {
        if self.requires_session() && !has_session {
            Some(Route::Login)
        } else if self.guest_only() && has_session {
            Some(Route::Tasks)
        } else {
            None
        }
    }

    /// Follow-up screen once this screen's form succeeds, if it moves on
    pub fn after_success(&self) -> Option<Redirect> {
        let to = match self {
            Route::Register | Route::ResendOtp => Route::VerifyEmail,
            Route::VerifyEmail | Route::ResetPasswordConfirm { .. } => Route::Login,
            _ => return None,
        };
        Some(Redirect { to, delay: REDIRECT_DELAY })
    }

    /// Route of the current browser location
    pub fn current() -> Route {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .map(|path| Route::parse(&path))
            .unwrap_or(Route::Home)
    }
}

fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/account/login"), Route::Login);
        assert_eq!(Route::parse("/account/verify-email/"), Route::VerifyEmail);
        assert_eq!(Route::parse("/user/task?tab=1"), Route::Tasks);
        assert_eq!(Route::parse("/user/change-password"), Route::ChangePassword);
    }

    #[test]
    fn test_reset_confirm_captures_params() {
        let route = Route::parse("/account/reset-password-confirm/65ab12/tok%2Den");
        assert_eq!(
            route,
            Route::ResetPasswordConfirm {
                id: "65ab12".to_string(),
                token: "tok-en".to_string(),
            }
        );
        assert_eq!(route.path(), "/account/reset-password-confirm/65ab12/tok%2Den");
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/user"), Route::NotFound);
        assert_eq!(Route::parse("/account/reset-password-confirm/only-id"), Route::NotFound);
        assert_eq!(Route::parse("/admin"), Route::NotFound);
    }

    #[test]
    fn test_paths_parse_back() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::VerifyEmail,
            Route::ResendOtp,
            Route::ResetPasswordLink,
            Route::Tasks,
            Route::Profile,
            Route::ChangePassword,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guards() {
        assert_eq!(Route::Tasks.redirect_for(false), Some(Route::Login));
        assert_eq!(Route::Tasks.redirect_for(true), None);
        assert_eq!(Route::Register.redirect_for(true), Some(Route::Tasks));
        assert_eq!(Route::Register.redirect_for(false), None);
        assert_eq!(Route::Home.redirect_for(false), None);
        assert_eq!(Route::NotFound.redirect_for(true), None);
    }

    #[test]
    fn test_registration_moves_on_to_verify_email_after_delay() {
        let next = Route::Register.after_success().unwrap();
        assert_eq!(next.to, Route::VerifyEmail);
        assert_eq!(next.delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_follow_up_screens() {
        let reset = Route::ResetPasswordConfirm {
            id: "1".to_string(),
            token: "t".to_string(),
        };
        assert_eq!(Route::VerifyEmail.after_success().map(|r| r.to), Some(Route::Login));
        assert_eq!(Route::ResendOtp.after_success().map(|r| r.to), Some(Route::VerifyEmail));
        assert_eq!(reset.after_success().map(|r| r.to), Some(Route::Login));
        assert_eq!(Route::ChangePassword.after_success(), None);
        assert_eq!(Route::ResetPasswordLink.after_success(), None);
    }
}
