use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiError;
use crate::components::LoadingSpinner;
use crate::context::AppContext;
use crate::models::User;

/// Signed-in user's details
#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (profile, set_profile) = signal::<Option<Result<User, ApiError>>>(None);
    let (log_lines, set_log_lines) = signal(rolling_logger::recent_lines());

    Effect::new(move |_| {
        let api = ctx.api();
        spawn_local(async move {
            let loaded = api.current_user().await;
            if let Err(err) = &loaded {
                tracing::warn!(error = %err, "[PROFILE] load failed");
            }
            set_profile.try_set(Some(loaded));
        });
    });

    view! {
        <div class="profile-card">
            <h1>"Profile"</h1>
            {move || match profile.get() {
                None => view! { <LoadingSpinner label="Loading profile..." /> }.into_any(),
                Some(Err(err)) => view! {
                    <p class="notice notice-error">{err.user_message("Failed to load profile")}</p>
                }.into_any(),
                Some(Ok(user)) => {
                    let (badge_class, badge) = if user.is_verified {
                        ("badge verified", "Verified")
                    } else {
                        ("badge pending", "Pending Verification")
                    };
                    view! {
                        <dl class="profile-details">
                            <dt>"Name"</dt>
                            <dd>{user.name}</dd>
                            <dt>"Email"</dt>
                            <dd>{user.email}</dd>
                            <dt>"Status"</dt>
                            <dd><span class=badge_class>{badge}</span></dd>
                        </dl>
                    }.into_any()
                }
            }}
            <details class="diagnostics">
                <summary>"Recent activity"</summary>
                <button type="button" class="refresh-btn" on:click=move |_| set_log_lines.set(rolling_logger::recent_lines())>
                    "Refresh"
                </button>
                <pre class="log-lines">{move || log_lines.with(|lines| lines.join("\n"))}</pre>
            </details>
        </div>
    }
}
