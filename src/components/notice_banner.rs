//! Notice Banner Component

use leptos::prelude::*;

use crate::forms::Notice;

/// Success / error banner shown above a form or the board
#[component]
pub fn NoticeBanner(
    #[prop(into)] notice: Signal<Option<Notice>>,
    #[prop(optional, into)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        notice.get().map(|notice| {
            let class = if notice.is_error() { "notice notice-error" } else { "notice notice-success" };
            view! {
                <div class=class role="alert">
                    <span class="notice-text">{notice.text}</span>
                    {on_dismiss.map(|dismiss| view! {
                        <button type="button" class="notice-dismiss" on:click=move |_| dismiss.run(())>
                            "×"
                        </button>
                    })}
                </div>
            }
        })
    }
}
