//! Auth Endpoints
//!
//! Account lifecycle calls against `{api}/auth/*`.

use serde_json::Value;

use super::{path_segment, Ack, ApiClient, ApiError, ApiResult, CacheTag};
use crate::forms::{EmailForm, LoginForm, PasswordForm, RegisterForm, VerifyEmailForm};
use crate::models::User;

impl ApiClient {
    pub async fn login(&self, form: &LoginForm) -> ApiResult<Ack> {
        let request = self.http.post(self.config.auth_url("login")).json(form);
        let envelope = self.send::<Value>(request).await?;
        self.invalidate(CacheTag::User);
        tracing::info!("[AUTH] login succeeded");
        Ok(envelope.into())
    }

    pub async fn register(&self, form: &RegisterForm) -> ApiResult<Ack> {
        let request = self.http.post(self.config.auth_url("register")).json(form);
        Ok(self.send::<Value>(request).await?.into())
    }

    pub async fn verify_email(&self, form: &VerifyEmailForm) -> ApiResult<Ack> {
        let request = self.http.post(self.config.auth_url("verify-email")).json(form);
        Ok(self.send::<Value>(request).await?.into())
    }

    pub async fn resend_otp(&self, form: &EmailForm) -> ApiResult<Ack> {
        let request = self.http.post(self.config.auth_url("resend-otp")).json(form);
        Ok(self.send::<Value>(request).await?.into())
    }

    pub async fn reset_password_link(&self, form: &EmailForm) -> ApiResult<Ack> {
        let request = self
            .http
            .post(self.config.auth_url("reset-password-link"))
            .json(form);
        Ok(self.send::<Value>(request).await?.into())
    }

    /// Complete a reset started from an emailed link
    pub async fn reset_password(&self, id: &str, token: &str, form: &PasswordForm) -> ApiResult<Ack> {
        let path = format!("reset-password/{}/{}", path_segment(id), path_segment(token));
        let request = self.http.post(self.config.auth_url(&path)).json(form);
        Ok(self.send::<Value>(request).await?.into())
    }

    pub async fn change_password(&self, form: &PasswordForm) -> ApiResult<Ack> {
        let request = self.http.post(self.config.auth_url("change-password")).json(form);
        Ok(self.send::<Value>(request).await?.into())
    }

    /// Server-side logout; the local cache is dropped either way
    pub async fn logout(&self) -> ApiResult<Ack> {
        let request = self.http.post(self.config.auth_url("logout"));
        let result = self.send::<Value>(request).await;
        self.clear_cache();
        Ok(result?.into())
    }

    /// Profile of the signed-in user, served from cache until invalidated
    pub async fn current_user(&self) -> ApiResult<User> {
        let cached = self.with_cache(|cache| (cache.user().cloned(), cache.generation(CacheTag::User)));
        let generation = match cached {
            Some((Some(user), _)) => return Ok(user),
            Some((None, generation)) => generation,
            None => 0,
        };

        let request = self.http.get(self.config.auth_url("user"));
        let user = self
            .send::<User>(request)
            .await?
            .data
            .ok_or_else(|| ApiError::Decode("response has no user".to_string()))?;

        self.with_cache(|cache| cache.store_user(user.clone(), generation));
        Ok(user)
    }
}

/// Message for a failed registration, by status code
pub fn registration_error_message(err: &ApiError) -> String {
    match err.status() {
        Some(400) => err.user_message("Validation error"),
        Some(409) => "Email already registered".to_string(),
        Some(500) => "Server error. Please try again later.".to_string(),
        _ => err.user_message("Registration failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(status: u16, message: Option<&str>) -> ApiError {
        ApiError::Server {
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_registration_messages_by_status() {
        assert_eq!(
            registration_error_message(&server(400, Some("All fields are required"))),
            "All fields are required"
        );
        assert_eq!(registration_error_message(&server(400, None)), "Validation error");
        assert_eq!(
            registration_error_message(&server(409, Some("Email already exists"))),
            "Email already registered"
        );
        assert_eq!(
            registration_error_message(&server(500, Some("boom"))),
            "Server error. Please try again later."
        );
        assert_eq!(
            registration_error_message(&ApiError::Network("offline".to_string())),
            "Registration failed"
        );
    }
}
