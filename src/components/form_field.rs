//! Form Field Component
//!
//! Labelled input bound to a string signal, with its field error underneath.

use leptos::prelude::*;

#[component]
pub fn FormField(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let input_id = format!("field-{}", name);

    view! {
        <div class=move || if error.with(Option::is_some) { "form-field has-error" } else { "form-field" }>
            <label for=input_id.clone()>{label}</label>
            <input
                id=input_id
                name=name
                type=input_type
                placeholder=placeholder
                disabled=move || disabled.get().unwrap_or(false)
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
        </div>
    }
}

/// Multi-line variant for task descriptions
#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] max_len: Option<usize>,
) -> impl IntoView {
    let input_id = format!("field-{}", name);

    view! {
        <div class=move || if error.with(Option::is_some) { "form-field has-error" } else { "form-field" }>
            <label for=input_id.clone()>{label}</label>
            <textarea
                id=input_id
                name=name
                rows="4"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
            {max_len.map(|max| view! {
                <p class="field-hint">{move || format!("{}/{}", value.with(|v| v.chars().count()), max)}</p>
            })}
            {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
        </div>
    }
}
