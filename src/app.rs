//! Root component: configuration, collaborators, navigation and the
//! session gate.
//!
//! ARCHITECTURE
//! ============
//! `App` builds the backend client from the compiled-in config, installs the
//! `Navigator` on the browser hash and the `SessionHandle` on the auth
//! backend, then renders by gate state: a spinner while resolving, the auth
//! screen when signed out, and the routed screen when signed in. The routed
//! screen is rebuilt whenever the navigator's render key changes.
//!
//! ERROR HANDLING
//! ==============
//! Invalid configuration is logged and the app still starts with an
//! unconfigured client; every backend call then fails, so the gate lands on
//! the auth screen.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::loading::LoadingScreen;
use crate::components::shell::AppShell;
use crate::config::AppConfig;
use crate::net::SupabaseClient;
use crate::net::auth::SupabaseAuth;
use crate::pages::auth::AuthPage;
use crate::routing::navigation::use_navigator;
use crate::routing::registry::render_screen;
use crate::routing::{HistoryBackend, Layout, Navigator};
use crate::session::{GateView, SessionHandle};

/// Backend collaborators shared by every screen.
#[derive(Clone, Copy)]
pub struct Services {
    client: StoredValue<SupabaseClient>,
    auth: StoredValue<Rc<SupabaseAuth>, LocalStorage>,
}

impl Services {
    #[must_use]
    pub fn client(&self) -> SupabaseClient {
        self.client.get_value()
    }

    #[must_use]
    pub fn auth(&self) -> Rc<SupabaseAuth> {
        self.auth.get_value()
    }

    /// Storage bucket for avatars, when configured.
    #[must_use]
    pub fn avatar_bucket(&self) -> Option<String> {
        self.client.with_value(|c| c.config().ok().map(|cfg| cfg.avatar_bucket.clone()))
    }
}

pub fn use_services() -> Services {
    expect_context::<Services>()
}

fn build_client() -> SupabaseClient {
    match AppConfig::from_build_env() {
        Ok(config) => SupabaseClient::new(config),
        Err(e) => {
            log::error!("configuration error, backend calls disabled: {e}");
            SupabaseClient::unconfigured(e)
        }
    }
}

fn history_backend() -> Rc<dyn HistoryBackend> {
    #[cfg(feature = "csr")]
    {
        Rc::new(crate::routing::history::HashHistory::new())
    }
    #[cfg(not(feature = "csr"))]
    {
        Rc::new(crate::routing::MemoryHistory::new(""))
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let client = build_client();
    let auth = Rc::new(SupabaseAuth::new(client.clone()));
    provide_context(Services { client: StoredValue::new(client), auth: StoredValue::new_local(Rc::clone(&auth)) });

    let navigator = Navigator::install(history_backend());
    provide_context(navigator);

    let session = SessionHandle::install(auth, navigator);
    provide_context(session);

    let gate = Memo::new(move |_| session.state().view());

    view! {
        <Title text="Candle Academy"/>
        {move || match gate.get() {
            GateView::Loading => view! { <LoadingScreen/> }.into_any(),
            GateView::Auth => view! { <AuthPage/> }.into_any(),
            GateView::Shell => view! { <Routed/> }.into_any(),
        }}
    }
}

/// The active screen in its layout, rebuilt on every navigation.
#[component]
fn Routed() -> impl IntoView {
    let screen = use_navigator().screen();

    move || {
        let (_, route) = screen.get();
        let view_id = route.view;
        let content = render_screen(&route);
        let framed = match view_id.layout() {
            Layout::FullPage => content,
            Layout::Shell => view! { <AppShell active=view_id>{content}</AppShell> }.into_any(),
        };
        view! {
            <Title text=format!("{} | Candle Academy", view_id.title())/>
            {framed}
        }
    }
}
