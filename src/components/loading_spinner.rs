use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="loading" aria-busy="true">
            <span class="spinner"></span>
            <span class="loading-label">{label.unwrap_or_else(|| "Loading...".to_string())}</span>
        </div>
    }
}
