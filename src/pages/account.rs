//! Account Screens
//!
//! Login, registration and password flows. Each follows the same shape:
//! validate, post, then show the outcome or redirect after a short pause.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{begin_submit, field_error, form_busy, form_notice, redirect_after_success};
use crate::api::registration_error_message;
use crate::components::{FormField, NavLink, NoticeBanner};
use crate::context::AppContext;
use crate::forms::{EmailForm, FormState, LoginForm, PasswordForm, RegisterForm};
use crate::routes::Route;
use crate::timers::TimerSlot;

fn submit_label(busy: Signal<bool>, idle: &'static str, working: &'static str) -> impl Fn() -> &'static str {
    move || if busy.get() { working } else { idle }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());
    let busy = form_busy(state);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if !begin_submit(state, &form) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            match api.login(&form).await {
                Ok(ack) => {
                    state.try_update(|s| s.succeed_and_redirect(ack.message_or("Login successful")));
                    ctx.refresh_session();
                    ctx.navigate(Route::Tasks);
                }
                Err(err) => {
                    state.try_update(|s| s.fail(err.user_message("Login failed")));
                }
            }
        });
    };

    let google = move |_| {
        let url = ctx.api().config().google_oauth_url();
        if let Some(window) = web_sys::window() {
            if window.location().set_href(&url).is_err() {
                tracing::warn!(url = %url, "[AUTH] could not open Google sign-in");
            }
        }
    };

    view! {
        <div class="auth-card">
            <h1>"Login"</h1>
            <NoticeBanner notice=form_notice(state) />
            <form class="auth-form" on:submit=submit>
                <FormField label="Email" name="email" input_type="email" value=email error=field_error(state, "email") />
                <FormField label="Password" name="password" input_type="password" value=password error=field_error(state, "password") />
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {submit_label(busy, "Login", "Logging in...")}
                </button>
            </form>
            <button type="button" class="google-btn" on:click=google>"Continue with Google"</button>
            <div class="auth-links">
                <NavLink route=Route::ResetPasswordLink label="Forgot password?" />
                <NavLink route=Route::Register label="Create an account" />
                <NavLink route=Route::VerifyEmail label="Verify your email" />
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());
    let busy = form_busy(state);
    let redirect = TimerSlot::<Timeout>::new();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterForm {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            password_confirmation: confirmation.get_untracked(),
        };
        if !begin_submit(state, &form) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            match api.register(&form).await {
                Ok(ack) => {
                    state.try_update(|s| s.succeed_and_redirect(ack.message_or("Registration Success")));
                    redirect_after_success(ctx, redirect, &Route::Register);
                }
                Err(err) => {
                    state.try_update(|s| s.fail(registration_error_message(&err)));
                }
            }
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Registration"</h1>
            <NoticeBanner notice=form_notice(state) />
            <form class="auth-form" on:submit=submit>
                <FormField label="Name" name="name" value=name error=field_error(state, "name") />
                <FormField label="Email" name="email" input_type="email" value=email error=field_error(state, "email") />
                <FormField label="Password" name="password" input_type="password" value=password error=field_error(state, "password") />
                <FormField
                    label="Confirm Password"
                    name="password_confirmation"
                    input_type="password"
                    value=confirmation
                    error=field_error(state, "password_confirmation")
                />
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {submit_label(busy, "Register", "Registering...")}
                </button>
            </form>
            <div class="auth-links">
                <NavLink route=Route::Login label="Already have an account? Login" />
            </div>
        </div>
    }
}

#[component]
pub fn ResendOtpPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let email = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());
    let busy = form_busy(state);
    let redirect = TimerSlot::<Timeout>::new();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = EmailForm { email: email.get_untracked().trim().to_string() };
        if !begin_submit(state, &form) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            match api.resend_otp(&form).await {
                Ok(ack) => {
                    state.try_update(|s| s.succeed_and_redirect(ack.message_or("OTP sent successfully")));
                    redirect_after_success(ctx, redirect, &Route::ResendOtp);
                }
                Err(err) => {
                    state.try_update(|s| s.fail(err.user_message("Failed to resend OTP")));
                }
            }
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Resend OTP"</h1>
            <NoticeBanner notice=form_notice(state) />
            <form class="auth-form" on:submit=submit>
                <FormField label="Email" name="email" input_type="email" value=email error=field_error(state, "email") />
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {submit_label(busy, "Send OTP", "Sending...")}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn ResetPasswordLinkPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let email = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());
    let busy = form_busy(state);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = EmailForm { email: email.get_untracked().trim().to_string() };
        if !begin_submit(state, &form) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            match api.reset_password_link(&form).await {
                Ok(ack) => {
                    state.try_update(|s| s.succeed(ack.message_or("Password reset email sent. Please check your email.")));
                    email.try_set(String::new());
                }
                Err(err) => {
                    state.try_update(|s| s.fail(err.user_message("Failed to send reset link")));
                }
            }
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Reset Password"</h1>
            <NoticeBanner notice=form_notice(state) />
            <form class="auth-form" on:submit=submit>
                <FormField label="Email" name="email" input_type="email" value=email error=field_error(state, "email") />
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {submit_label(busy, "Send Reset Link", "Sending...")}
                </button>
            </form>
            <div class="auth-links">
                <NavLink route=Route::Login label="Back to login" />
            </div>
        </div>
    }
}

#[component]
pub fn ResetPasswordConfirmPage(id: String, token: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());
    let busy = form_busy(state);
    let redirect = TimerSlot::<Timeout>::new();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = PasswordForm {
            password: password.get_untracked(),
            password_confirmation: confirmation.get_untracked(),
        };
        if !begin_submit(state, &form) {
            return;
        }

        let api = ctx.api();
        let (id, token) = (id.clone(), token.clone());
        spawn_local(async move {
            match api.reset_password(&id, &token, &form).await {
                Ok(ack) => {
                    state.try_update(|s| s.succeed_and_redirect(ack.message_or("Password reset successfully")));
                    redirect_after_success(ctx, redirect, &Route::ResetPasswordConfirm { id, token });
                }
                Err(err) => {
                    state.try_update(|s| s.fail(err.user_message("Password reset failed")));
                }
            }
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Choose a New Password"</h1>
            <NoticeBanner notice=form_notice(state) />
            <form class="auth-form" on:submit=submit>
                <FormField label="New Password" name="password" input_type="password" value=password error=field_error(state, "password") />
                <FormField
                    label="Confirm New Password"
                    name="password_confirmation"
                    input_type="password"
                    value=confirmation
                    error=field_error(state, "password_confirmation")
                />
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {submit_label(busy, "Reset Password", "Resetting...")}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let state = RwSignal::new(FormState::default());
    let busy = form_busy(state);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = PasswordForm {
            password: password.get_untracked(),
            password_confirmation: confirmation.get_untracked(),
        };
        if !begin_submit(state, &form) {
            return;
        }

        let api = ctx.api();
        spawn_local(async move {
            match api.change_password(&form).await {
                Ok(ack) => {
                    state.try_update(|s| s.succeed(ack.message_or("Password changed successfully")));
                    password.try_set(String::new());
                    confirmation.try_set(String::new());
                }
                Err(err) => {
                    state.try_update(|s| s.fail(err.user_message("Failed to change password")));
                }
            }
        });
    };

    view! {
        <div class="auth-card">
            <h1>"Change Password"</h1>
            <NoticeBanner notice=form_notice(state) />
            <form class="auth-form" on:submit=submit>
                <FormField label="New Password" name="password" input_type="password" value=password error=field_error(state, "password") />
                <FormField
                    label="Confirm New Password"
                    name="password_confirmation"
                    input_type="password"
                    value=confirmation
                    error=field_error(state, "password_confirmation")
                />
                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {submit_label(busy, "Change Password", "Saving...")}
                </button>
            </form>
        </div>
    }
}
