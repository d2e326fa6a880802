//! Taskflow Frontend App
//!
//! Root component: context, history sync, route guards and the screen switch.

use leptos::prelude::*;

use crate::components::Navbar;
use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::pages::{
    ChangePasswordPage, HomePage, LoginPage, NotFoundPage, ProfilePage, RegisterPage, ResendOtpPage,
    ResetPasswordConfirmPage, ResetPasswordLinkPage, TasksPage, VerifyEmailPage,
};
use crate::routes::Route;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(ApiConfig::from_build_env());
    // Provide context to all children
    provide_context(ctx);
    tracing::info!(api = %ctx.api().config().base_url(), "[APP] started");

    // Browser back/forward
    let popstate = StoredValue::new_local(Some(window_event_listener(
        leptos::ev::popstate,
        move |_| ctx.sync_route(),
    )));
    on_cleanup(move || {
        if let Some(handle) = popstate.try_update_value(Option::take).flatten() {
            handle.remove();
        }
    });

    // Session guards
    Effect::new(move |_| {
        let route = ctx.route.get();
        if let Some(target) = route.redirect_for(ctx.session.get()) {
            tracing::debug!(from = %route.path(), to = %target.path(), "[APP] guard redirect");
            ctx.redirect(target);
        }
    });

    let screen = move || {
        let route = ctx.route.get();
        if route.redirect_for(ctx.session.get()).is_some() {
            return ().into_any();
        }
        match route {
            Route::Home => view! { <HomePage /> }.into_any(),
            Route::Login => view! { <LoginPage /> }.into_any(),
            Route::Register => view! { <RegisterPage /> }.into_any(),
            Route::VerifyEmail => view! { <VerifyEmailPage /> }.into_any(),
            Route::ResendOtp => view! { <ResendOtpPage /> }.into_any(),
            Route::ResetPasswordLink => view! { <ResetPasswordLinkPage /> }.into_any(),
            Route::ResetPasswordConfirm { id, token } => {
                view! { <ResetPasswordConfirmPage id=id token=token /> }.into_any()
            }
            Route::Tasks => view! { <TasksPage /> }.into_any(),
            Route::Profile => view! { <ProfilePage /> }.into_any(),
            Route::ChangePassword => view! { <ChangePasswordPage /> }.into_any(),
            Route::NotFound => view! { <NotFoundPage /> }.into_any(),
        }
    };

    view! {
        <div class=move || if ctx.dark_mode.get() { "app-layout dark" } else { "app-layout" }>
            <Navbar />
            <main class="main-content">{screen}</main>
        </div>
    }
}
