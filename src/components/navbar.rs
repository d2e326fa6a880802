//! Navigation Bar Component
//!
//! Brand, route links for the current session state, theme toggle, logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::routes::Route;

/// In-app link; pushes history instead of reloading the page
#[component]
pub fn NavLink(route: Route, #[prop(into)] label: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let href = route.path();
    let target = route.clone();

    view! {
        <a
            href=href
            class=move || if ctx.route.with(|r| *r == route) { "nav-link active" } else { "nav-link" }
            on:click=move |ev| {
                ev.prevent_default();
                ctx.navigate(target.clone());
            }
        >
            {label}
        </a>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (logging_out, set_logging_out) = signal(false);

    let logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        set_logging_out.set(true);
        let api = ctx.api();
        spawn_local(async move {
            if let Err(err) = api.logout().await {
                tracing::warn!(error = %err, "[AUTH] server logout failed, clearing local session anyway");
            }
            ctx.clear_session();
            set_logging_out.try_set(false);
            ctx.navigate(Route::Home);
        });
    };

    view! {
        <nav class="navbar">
            <span class="navbar-brand">"Taskflow"</span>
            <div class="navbar-links">
                <NavLink route=Route::Home label="Home" />
                <Show
                    when=move || ctx.session.get()
                    fallback=|| view! {
                        <NavLink route=Route::Login label="Login" />
                        <NavLink route=Route::Register label="Registration" />
                    }
                >
                    <NavLink route=Route::Tasks label="Tasks" />
                    <NavLink route=Route::Profile label="Profile" />
                    <NavLink route=Route::ChangePassword label="Change Password" />
                    <button class="nav-link logout-btn" disabled=move || logging_out.get() on:click=logout>
                        "Logout"
                    </button>
                </Show>
            </div>
            <button
                class="theme-toggle"
                title=move || if ctx.dark_mode.get() { "Switch to light mode" } else { "Switch to dark mode" }
                on:click=move |_| ctx.toggle_theme()
            >
                {move || if ctx.dark_mode.get() { "☀" } else { "☾" }}
            </button>
        </nav>
    }
}
