use leptos::prelude::*;

use crate::components::NavLink;
use crate::routes::Route;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"404"</h1>
            <p>"This page could not be found."</p>
            <NavLink route=Route::Home label="Back to home" />
        </section>
    }
}
