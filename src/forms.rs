//! Form Values and Submission State
//!
//! Value objects posted by the account screens, and the shared
//! `Editing -> Submitting -> {Redirecting | Editing}` state machine.

use serde::Serialize;

use crate::config::OTP_RESEND_COOLDOWN_SECS;
use crate::validation::{FieldErrors, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VerifyEmailForm {
    pub email: String,
    pub otp: String,
}

/// Single-email forms (resend OTP, reset link)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EmailForm {
    pub email: String,
}

/// New password plus confirmation (reset, change)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PasswordForm {
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Redirecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Banner message shown above a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Per-screen submission state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    phase: FormPhase,
    notice: Option<Notice>,
    errors: FieldErrors,
}

impl FormState {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn field_error(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(str::to_string)
    }

    /// Submitting or redirecting; further submits are ignored
    pub fn is_busy(&self) -> bool {
        self.phase != FormPhase::Editing
    }

    /// Validate `form` and enter `Submitting`.
    ///
    /// Returns false (and sends nothing) when busy or when validation fails,
    /// in which case the field errors are recorded.
    pub fn begin<F: Validate>(&mut self, form: &F) -> bool {
        if self.is_busy() {
            return false;
        }
        match form.validate() {
            Err(errors) => {
                self.errors = errors;
                false
            }
            Ok(()) => {
                self.errors = FieldErrors::default();
                self.notice = None;
                self.phase = FormPhase::Submitting;
                true
            }
        }
    }

    /// Request succeeded; stay on the screen
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::success(message));
        self.phase = FormPhase::Editing;
    }

    /// Request succeeded; a redirect is scheduled
    pub fn succeed_and_redirect(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::success(message));
        self.phase = FormPhase::Redirecting;
    }

    /// Request failed; input is kept for a retry
    pub fn fail(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::error(message));
        self.phase = FormPhase::Editing;
    }

    /// Show a banner without changing phase
    pub fn show(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}

/// Client-side throttle of the resend-OTP action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OtpCooldown {
    remaining: u32,
    sending: bool,
}

impl OtpCooldown {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0 && !self.sending
    }

    /// Claim the action; false while sending or cooling down
    pub fn begin_send(&mut self) -> bool {
        if !self.can_resend() {
            return false;
        }
        self.sending = true;
        true
    }

    /// Only a successful send starts the cooldown window
    pub fn finish_send(&mut self, sent: bool) {
        self.sending = false;
        if sent {
            self.remaining = OTP_RESEND_COOLDOWN_SECS;
        }
    }

    /// One second elapsed
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn label(&self) -> String {
        if self.sending {
            "Sending...".to_string()
        } else if self.remaining > 0 {
            format!("Resend OTP ({}s)", self.remaining)
        } else {
            "Resend OTP".to_string()
        }
    }
}
