//! Application frames: the sidebar + header shell and the bare full-page
//! frame.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app::Routed` picks one of these per screen from `ViewId::layout`. The
//! shell carries the mobile navigation drawer and the floating support-chat
//! control; full-page screens get only a slim top bar.

use leptos::prelude::*;

use crate::components::link::NavLink;
use crate::routing::ViewId;
use crate::routing::navigation::use_navigator;
use crate::routing::registry::{CHAT_PATH, SIDEBAR_ITEMS};
use crate::session::controller::use_session;

#[component]
pub fn AppShell(active: ViewId, children: Children) -> impl IntoView {
    let navigator = use_navigator();
    let session = use_session();

    let root_class = move || if navigator.drawer_open() { "shell shell--drawer-open" } else { "shell" };
    let user_name = move || session.session().map(|s| s.user.display_name()).unwrap_or_default();

    let links = SIDEBAR_ITEMS
        .iter()
        .map(|item| {
            let class = if item.is_active(active) { "shell__link shell__link--active" } else { "shell__link" };
            view! {
                <NavLink path=item.path class=class>
                    {item.label}
                </NavLink>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class=root_class>
            <aside class="shell__sidebar">
                <NavLink path="/home" class="shell__brand">
                    "Candle Academy"
                </NavLink>
                <nav class="shell__nav">{links}</nav>
            </aside>
            <div class="shell__backdrop" on:click=move |_| navigator.close_drawer()></div>
            <div class="shell__main">
                <header class="shell__header">
                    <button
                        class="shell__menu"
                        aria-label="Toggle navigation"
                        on:click=move |_| navigator.toggle_drawer()
                    >
                        "☰"
                    </button>
                    <h1 class="shell__title">{active.title()}</h1>
                    <NavLink path="/profile" class="shell__user">
                        {user_name}
                    </NavLink>
                </header>
                <main class="shell__content">{children()}</main>
            </div>
            <button class="chat-fab" title="Support chat" on:click=move |_| navigator.navigate(CHAT_PATH)>
                "💬"
            </button>
        </div>
    }
}

/// Frame for screens that own the whole window.
#[component]
pub fn FullPage(
    #[prop(into)] title: String,
    #[prop(default = "/home".to_owned(), into)] back_path: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="full-page">
            <header class="full-page__bar">
                <NavLink path=back_path class="full-page__back">
                    "← Back"
                </NavLink>
                <h1 class="full-page__title">{title}</h1>
            </header>
            <main class="full-page__content">{children()}</main>
        </div>
    }
}
