//! Verify Email Screen
//!
//! OTP confirmation with an inline, rate-limited "Resend OTP" action.

use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{begin_submit, field_error, form_busy, form_notice, redirect_after_success};
use crate::components::{FormField, NavLink, NoticeBanner};
use crate::context::AppContext;
use crate::forms::{EmailForm, FormState, Notice, OtpCooldown, VerifyEmailForm};
use crate::routes::Route;
use crate::timers::TimerSlot;
use crate::validation::is_valid_email;

const COOLDOWN_TICK: Duration = Duration::from_secs(1);

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());
    let busy = form_busy(state);
    let redirect = TimerSlot::<Timeout>::new();

    let cooldown = RwSignal::new(OtpCooldown::default());
    let ticker = TimerSlot::<Interval>::new();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = VerifyEmailForm {
            email: email.get_untracked().trim().to_string(),
            otp: otp.get_untracked().trim().to_string(),
        };
        if !begin_submit(state, &form) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            match api.verify_email(&form).await {
                Ok(ack) => {
                    state.try_update(|s| s.succeed_and_redirect(ack.message_or("Email verified successfully")));
                    redirect_after_success(ctx, redirect, &Route::VerifyEmail);
                }
                Err(err) => {
                    state.try_update(|s| s.fail(err.user_message("Verification failed")));
                }
            }
        });
    };

    let resend = move |_| {
        let address = email.get_untracked().trim().to_string();
        if !is_valid_email(&address) {
            state.update(|s| s.show(Notice::error("Please enter a valid email address")));
            return;
        }
        if !cooldown.try_update(OtpCooldown::begin_send).unwrap_or(false) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            let result = api.resend_otp(&EmailForm { email: address }).await;
            cooldown.try_update(|c| c.finish_send(result.is_ok()));

            match result {
                Ok(ack) => {
                    state.try_update(|s| s.show(Notice::success(ack.message_or("New OTP sent successfully"))));
                    ticker.every(COOLDOWN_TICK, move || {
                        let finished = cooldown
                            .try_update(|c| {
                                c.tick();
                                c.remaining() == 0
                            })
                            .unwrap_or(true);
                        if finished {
                            ticker.cancel();
                        }
                    });
                }
                Err(err) => {
                    state.try_update(|s| s.show(Notice::error(err.user_message("Failed to resend OTP"))));
                }
            }
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Verify Email"</h1>
            <NoticeBanner notice=form_notice(state) />
            <form class="auth-form" on:submit=submit>
                <FormField label="Email" name="email" input_type="email" value=email error=field_error(state, "email") />
                <FormField
                    label="OTP"
                    name="otp"
                    value=otp
                    error=field_error(state, "otp")
                    placeholder="4-digit code"
                />
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {move || if busy.get() { "Verifying..." } else { "Verify" }}
                </button>
            </form>
            <button
                type="button"
                class="resend-btn"
                disabled=move || !cooldown.with(OtpCooldown::can_resend)
                on:click=resend
            >
                {move || cooldown.with(OtpCooldown::label)}
            </button>
            <div class="auth-links">
                <NavLink route=Route::Login label="Back to login" />
            </div>
        </div>
    }
}
