//! In-app link that routes through the navigator.

use leptos::prelude::*;

use crate::routing::navigation::use_navigator;

/// Anchor whose click calls `Navigator::navigate` instead of letting the
/// browser follow the fragment, so the drawer closes on every navigation.
#[component]
pub fn NavLink(#[prop(into)] path: String, #[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let navigator = use_navigator();
    let href = format!("#{path}");
    view! {
        <a
            class=class
            href=href
            on:click=move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                navigator.navigate(&path);
            }
        >
            {children()}
        </a>
    }
}
