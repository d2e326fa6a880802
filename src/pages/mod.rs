//! Screens
//!
//! One component per route. Account screens share the submission helpers
//! below.

mod account;
mod home;
mod not_found;
mod profile;
mod tasks;
mod verify_email;

pub use account::{
    ChangePasswordPage, LoginPage, RegisterPage, ResendOtpPage, ResetPasswordConfirmPage,
    ResetPasswordLinkPage,
};
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
pub use tasks::TasksPage;
pub use verify_email::VerifyEmailPage;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::AppContext;
use crate::forms::{FormState, Notice};
use crate::routes::Route;
use crate::timers::TimerSlot;
use crate::validation::Validate;

/// Validate and claim the form; false means nothing should be sent
fn begin_submit(state: RwSignal<FormState>, form: &impl Validate) -> bool {
    state.try_update(|s| s.begin(form)).unwrap_or(false)
}

fn field_error(state: RwSignal<FormState>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || state.with(|s| s.field_error(field)))
}

fn form_notice(state: RwSignal<FormState>) -> Signal<Option<Notice>> {
    Signal::derive(move || state.with(|s| s.notice().cloned()))
}

fn form_busy(state: RwSignal<FormState>) -> Signal<bool> {
    Signal::derive(move || state.with(FormState::is_busy))
}

/// Schedule the follow-up navigation for a successful form on `screen`
fn redirect_after_success(ctx: AppContext, slot: TimerSlot<Timeout>, screen: &Route) {
    if let Some(next) = screen.after_success() {
        slot.schedule(next.delay, move || ctx.navigate(next.to));
    }
}
