//! Account screen: details, display name, avatar and sign-out.
//!
//! The profile row is loaded once per visit. Name and avatar edits write
//! through to the backend and replace the loaded row with the saved one.

use leptos::prelude::*;

use crate::app::use_services;
use crate::components::link::NavLink;
use crate::components::load_gate::{load_gate, start_load};
use crate::net::auth::SupabaseAuth;
use crate::net::types::{Profile, Session};
use crate::net::{SupabaseClient, storage, store};
use crate::session::controller::use_session;
use crate::state::lazy::LoadState;
use crate::util::clock;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Notice {
    None,
    Info(String),
    Error(String),
}

async fn fetch_profile(client: SupabaseClient, session: Option<Session>) -> Result<Profile, String> {
    let session = session.ok_or_else(|| "Not signed in".to_owned())?;
    let row = store::load_profile(&client, &session.access_token, &session.user.id)
        .await
        .map_err(|e| e.to_string())?;
    Ok(row.unwrap_or_else(|| Profile { id: session.user.id.clone(), ..Profile::default() }))
}

fn replace_loaded(state: RwSignal<LoadState<Profile>>, saved: Profile) {
    let _ = state.try_update(|s| {
        if let Some(current) = s.ready_mut() {
            *current = saved;
        }
    });
}

/// Run one profile edit with the form disabled, then swap in the saved row
/// and report the outcome.
fn run_edit(
    profile: RwSignal<LoadState<Profile>>,
    busy: RwSignal<bool>,
    notice: RwSignal<Notice>,
    done: &'static str,
    edit: impl Future<Output = Result<Profile, String>> + 'static,
) {
    busy.set(true);
    notice.set(Notice::None);
    leptos::task::spawn_local(async move {
        match edit.await {
            Ok(saved) => {
                replace_loaded(profile, saved);
                let _ = notice.try_set(Notice::Info(done.to_owned()));
            }
            Err(message) => {
                log::warn!("profile edit failed: {message}");
                let _ = notice.try_set(Notice::Error(message));
            }
        }
        let _ = busy.try_set(false);
    });
}

fn profile_card(row: Profile, email: Signal<String>) -> impl IntoView {
    let active = row.has_active_plan();
    let avatar = row.avatar_url.map(|url| view! { <img class="avatar avatar--large" src=url alt="Avatar"/> });
    let plan = if active { row.plan.unwrap_or_default() } else { "Free".to_owned() };
    view! {
        <div class="profile__card card">
            {avatar}
            <dl class="profile__facts">
                <dt>"Email"</dt>
                <dd>{move || email.get()}</dd>
                <dt>"Plan"</dt>
                <dd>{plan}</dd>
                {row.plan_expires_at.map(|at| view! { <dt>"Renews"</dt><dd>{at}</dd> })}
            </dl>
            <Show when=move || !active>
                <NavLink path="/pricing" class="btn btn--primary">
                    "Upgrade to Pro"
                </NavLink>
            </Show>
        </div>
    }
}

fn notice_view(notice: Notice) -> AnyView {
    match notice {
        Notice::Info(message) => view! { <p class="notice notice--info">{message}</p> }.into_any(),
        Notice::Error(message) => view! { <p class="notice notice--error">{message}</p> }.into_any(),
        Notice::None => ().into_any(),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let services = use_services();
    let session = use_session();
    let profile = RwSignal::new(LoadState::<Profile>::default());
    let name_draft = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(Notice::None);

    let load = move || {
        let client = services.client();
        let current = session.session_untracked();
        start_load(profile, move || fetch_profile(client, current));
    };
    load();
    let on_retry = Callback::new(move |()| load());

    if let Some(current) = session.session_untracked() {
        name_draft.set(current.user.display_name());
    }

    let save_name = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = name_draft.get_untracked().trim().to_owned();
        if name.is_empty() {
            notice.set(Notice::Error("Name cannot be empty.".to_owned()));
            return;
        }
        let (Some(current), Some(row)) = (session.session_untracked(), profile.with_untracked(|s| s.ready().cloned())) else {
            return;
        };
        let auth = services.auth();
        let client = services.client();
        run_edit(profile, busy, notice, "Name updated.", async move {
            save_display_name(&auth, &client, &current, row, name).await
        });
    };

    let on_avatar = move |ev: leptos::ev::Event| {
        let (Some(current), Some(row)) = (session.session_untracked(), profile.with_untracked(|s| s.ready().cloned())) else {
            return;
        };
        let Some(bucket) = services.avatar_bucket() else {
            notice.set(Notice::Error("Avatar uploads are not configured.".to_owned()));
            return;
        };
        let client = services.client();
        run_edit(profile, busy, notice, "Avatar updated.", async move {
            upload_avatar(&client, &current, &bucket, row, ev).await
        });
    };

    let sign_out = move |_| {
        let auth = services.auth();
        let current = session.session_untracked();
        busy.set(true);
        leptos::task::spawn_local(async move {
            auth.sign_out(current.as_ref()).await;
            let _ = busy.try_set(false);
        });
    };

    let email = Signal::derive(move || {
        session
            .session()
            .and_then(|s| s.user.email)
            .unwrap_or_else(|| "-".to_owned())
    });

    let details = load_gate(profile, on_retry, move |row: Profile| profile_card(row, email));

    view! {
        <section class="profile">
            <h2>"Your account"</h2>
            {details}
            <form class="profile__form" on:submit=save_name>
                <label class="field">
                    <span class="field__label">"Display name"</span>
                    <input
                        class="field__input"
                        type="text"
                        prop:value=move || name_draft.get()
                        on:input=move |ev| name_draft.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
            </form>
            <label class="field">
                <span class="field__label">"Avatar (PNG or JPEG, up to 2 MB)"</span>
                <input
                    class="field__input"
                    type="file"
                    accept="image/png,image/jpeg"
                    disabled=move || busy.get()
                    on:change=on_avatar
                />
            </label>
            {move || notice_view(notice.get())}
            <button class="btn btn--danger profile__sign-out" disabled=move || busy.get() on:click=sign_out>
                "Sign out"
            </button>
        </section>
    }
}

async fn save_display_name(
    auth: &SupabaseAuth,
    client: &SupabaseClient,
    session: &Session,
    row: Profile,
    name: String,
) -> Result<Profile, String> {
    let refreshed = auth.update_display_name(session, &name).await.map_err(|e| e.to_string())?;
    let next = Profile { full_name: Some(name), ..row };
    store::save_profile(client, &refreshed.access_token, &next).await.map_err(|e| e.to_string())
}

/// Upload the file picked in `ev`'s input and point the profile at it.
async fn upload_avatar(
    client: &SupabaseClient,
    session: &Session,
    bucket: &str,
    row: Profile,
    ev: leptos::ev::Event,
) -> Result<Profile, String> {
    let (file_name, content_type, bytes) = picked_file(ev).await?;
    let path = storage::avatar_object_path(&session.user.id, &file_name, clock::now_millis());
    storage::upload(client, &session.access_token, bucket, &path, &bytes, &content_type)
        .await
        .map_err(|e| e.to_string())?;
    let url = storage::public_url(client, bucket, &path).map_err(|e| e.to_string())?;
    let previous = row.avatar_url.clone();
    let next = Profile { avatar_url: Some(url), ..row };
    let saved = store::save_profile(client, &session.access_token, &next).await.map_err(|e| e.to_string())?;
    if let Some(previous) = previous {
        remove_previous_avatar(client, session, bucket, &previous).await;
    }
    Ok(saved)
}

/// Failures are logged and otherwise ignored.
async fn remove_previous_avatar(client: &SupabaseClient, session: &Session, bucket: &str, url: &str) {
    let stale = match storage::object_path_of(client, bucket, url) {
        Ok(Some(path)) if path.starts_with(&format!("{}/", session.user.id)) => path,
        Ok(_) => return,
        Err(e) => {
            log::warn!("previous avatar not removed: {e}");
            return;
        }
    };
    if let Err(e) = storage::remove(client, &session.access_token, bucket, &[stale]).await {
        log::warn!("previous avatar not removed: {e}");
    }
}

#[cfg(feature = "csr")]
async fn picked_file(ev: leptos::ev::Event) -> Result<(String, String, Vec<u8>), String> {
    use wasm_bindgen::JsCast;

    let file = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
        .ok_or_else(|| "No file selected.".to_owned())?;
    #[allow(clippy::cast_precision_loss)]
    let limit = storage::MAX_AVATAR_BYTES as f64;
    if file.size() > limit {
        return Err("File is larger than 2 MB.".to_owned());
    }
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("could not read file: {e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let content_type = if file.type_().is_empty() { "application/octet-stream".to_owned() } else { file.type_() };
    Ok((file.name(), content_type, bytes))
}

#[cfg(not(feature = "csr"))]
async fn picked_file(_ev: leptos::ev::Event) -> Result<(String, String, Vec<u8>), String> {
    Err("File uploads need a browser.".to_owned())
}
