//! Customer-support conversation.
//!
//! SYSTEM CONTEXT
//! ==============
//! History is loaded once on mount, then new rows for this user arrive over
//! a realtime insert subscription that lives as long as the screen. Our own
//! sends come back both as the insert response and as a realtime event;
//! `ChatState::merge` collapses the duplicates.

use leptos::prelude::*;

use crate::app::use_services;
use crate::components::loading::Spinner;
use crate::components::shell::FullPage;
use crate::net::SupabaseClient;
use crate::net::realtime::{self, InsertFilter};
use crate::net::store::{self, SUPPORT_MESSAGES};
use crate::net::types::{MessageSender, SupportMessage};
use crate::session::controller::{SessionHandle, use_session};
use crate::state::chat::{self, ChatState, MAX_MESSAGE_CHARS};
use crate::subscription::Subscription;

fn load_history(client: SupabaseClient, session: SessionHandle, chat: RwSignal<ChatState>) {
    let Some(current) = session.session_untracked() else {
        return;
    };
    chat.update(|c| c.loading = true);
    leptos::task::spawn_local(async move {
        let result = store::load_support_messages(&client, &current.access_token, &current.user.id).await;
        let _ = chat.try_update(|c| {
            c.loading = false;
            match result {
                Ok(rows) => {
                    c.merge(rows);
                }
                Err(e) => {
                    log::warn!("support history load failed: {e}");
                    if e.is_unauthorized() {
                        session.refresh_now();
                    }
                    c.error = Some(e.to_string());
                }
            }
        });
    });
}

/// Realtime inserts for the signed-in user, re-joined with each new access
/// token. Replacing the handle leaves the old channel.
fn follow_inserts(client: SupabaseClient, session: SessionHandle, chat: RwSignal<ChatState>) {
    let subscription = StoredValue::new_local(None::<Subscription>);
    let credentials = Memo::new(move |_| session.session().map(|s| (s.user.id, s.access_token)));
    Effect::new(move || {
        let next = credentials.get().map(|(user_id, token)| {
            let filter = InsertFilter::table(SUPPORT_MESSAGES).column_eq("user_id", &user_id);
            realtime::subscribe_inserts(&client, Some(token), filter, move |row: SupportMessage| {
                let _ = chat.try_update(|c| c.merge([row]));
            })
        });
        subscription.set_value(next);
    });
    on_cleanup(move || subscription.dispose());
}

fn send_draft(client: SupabaseClient, session: SessionHandle, chat: RwSignal<ChatState>, draft: RwSignal<String>) {
    if chat.with_untracked(|c| c.sending) {
        return;
    }
    let Some(current) = session.session_untracked() else {
        return;
    };
    let message = match chat::outgoing_message(&current.user.id, &draft.get_untracked()) {
        Ok(message) => message,
        Err(reason) => {
            chat.update(|c| c.error = Some(reason));
            return;
        }
    };
    chat.update(|c| {
        c.sending = true;
        c.error = None;
    });
    leptos::task::spawn_local(async move {
        let result = store::send_support_message(&client, &current.access_token, &message).await;
        let sent = result.is_ok();
        let _ = chat.try_update(|c| {
            c.sending = false;
            match result {
                Ok(row) => {
                    c.merge([row]);
                }
                Err(e) => {
                    log::warn!("support message send failed: {e}");
                    if e.is_unauthorized() {
                        session.refresh_now();
                    }
                    c.error = Some("Message not sent. Try again.".to_owned());
                }
            }
        });
        if sent {
            let _ = draft.try_set(String::new());
        }
    });
}

fn message_list(state: ChatState) -> AnyView {
    if state.loading {
        return view! { <Spinner label="Loading conversation..."/> }.into_any();
    }
    if state.messages.is_empty() {
        return view! { <div class="chat__empty">"Ask us anything about your account, plans or lessons."</div> }
            .into_any();
    }
    state
        .messages
        .into_iter()
        .map(|msg| {
            let mine = msg.sender == MessageSender::User;
            let time = chat::short_time(&msg.created_at).to_owned();
            view! {
                <div class="chat__message" class:chat__message--mine=mine>
                    <p class="chat__body">{msg.body}</p>
                    <span class="chat__time">{time}</span>
                </div>
            }
        })
        .collect::<Vec<_>>()
        .into_any()
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let services = use_services();
    let session = use_session();
    let chat = RwSignal::new(ChatState::default());
    let draft = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    load_history(services.client(), session, chat);
    follow_inserts(services.client(), session, chat);

    Effect::new(move || {
        let _ = chat.with(|c| c.messages.len());

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
        #[cfg(not(feature = "csr"))]
        let _ = messages_ref;
    });

    let on_send = Callback::new(move |()| send_draft(services.client(), session, chat, draft));
    let sending = Signal::derive(move || chat.with(|c| c.sending));

    view! {
        <FullPage title="Support">
            <div class="chat">
                <div class="chat__messages" node_ref=messages_ref>
                    {move || message_list(chat.get())}
                </div>

                {move || chat.with(|c| c.error.clone()).map(|e| view! { <p class="chat__error">{e}</p> })}

                <ChatComposer draft=draft sending=sending on_send=on_send/>
            </div>
        </FullPage>
    }
}

#[component]
fn ChatComposer(draft: RwSignal<String>, sending: Signal<bool>, on_send: Callback<()>) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            on_send.run(());
        }
    };
    let can_send = move || !draft.get().trim().is_empty() && !sending.get();

    view! {
        <div class="chat__input-row">
            <textarea
                class="chat__input"
                placeholder="Write a message..."
                maxlength=MAX_MESSAGE_CHARS.to_string()
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
                on:keydown=on_keydown
            ></textarea>
            <button class="btn btn--primary chat__send" on:click=move |_| on_send.run(()) disabled=move || !can_send()>
                {move || if sending.get() { "Sending..." } else { "Send" }}
            </button>
        </div>
    }
}
