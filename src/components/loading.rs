//! Loading indicators.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <span class="spinner__ring" aria-hidden="true"></span>
            <span class="spinner__label">{label.unwrap_or_else(|| "Loading...".to_owned())}</span>
        </div>
    }
}

/// Whole-window indicator shown while the session is resolving.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <Spinner/>
        </div>
    }
}
