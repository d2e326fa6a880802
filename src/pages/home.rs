//! Landing Screen

use leptos::prelude::*;

use crate::components::NavLink;
use crate::context::AppContext;
use crate::routes::Route;

const FEATURES: &[(&str, &str, &str)] = &[
    ("🗃️", "Smart Organization", "Drag-and-drop board with pending, completed and done columns"),
    ("🔐", "Secure Accounts", "Email verification and password reset built in"),
    ("🌓", "Light and Dark", "Pick the theme that suits you; it is remembered"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <section class="hero">
            <h1 class="hero-title">"Transform Your Productivity"</h1>
            <p class="hero-subtitle">
                "Taskflow helps you organize, prioritize, and conquer your tasks with an intuitive drag-and-drop board."
            </p>
            <div class="hero-actions">
                <Show
                    when=move || ctx.session.get()
                    fallback=|| view! {
                        <NavLink route=Route::Register label="Get Started" />
                        <NavLink route=Route::Login label="Login" />
                    }
                >
                    <NavLink route=Route::Tasks label="Open your board" />
                </Show>
            </div>
            <div class="feature-grid">
                {FEATURES.iter().map(|(icon, title, description)| view! {
                    <div class="feature-card">
                        <div class="feature-icon">{*icon}</div>
                        <h3>{*title}</h3>
                        <p>{*description}</p>
                    </div>
                }).collect_view()}
            </div>
        </section>
    }
}
