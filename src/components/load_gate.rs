//! Async load wiring for `LoadState` screens.
//!
//! `start_load` moves the state into `Loading` and spawns the fetch;
//! `load_gate` renders a spinner, an error with retry, or the loaded value.

use std::future::Future;

use leptos::prelude::*;

use crate::components::loading::Spinner;
use crate::state::lazy::LoadState;

/// Begin loading unless a load is already in flight or done.
pub fn start_load<T, Fut>(state: RwSignal<LoadState<T>>, load: impl FnOnce() -> Fut + 'static)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    if state.try_update(LoadState::begin) != Some(true) {
        return;
    }
    leptos::task::spawn_local(async move {
        let result = load().await;
        if let Err(message) = &result {
            log::warn!("screen load failed: {message}");
        }
        // The screen may have been unmounted meanwhile.
        let _ = state.try_update(|s| s.finish(result));
    });
}

pub fn load_gate<T, V>(
    state: RwSignal<LoadState<T>>,
    on_retry: Callback<()>,
    ready: impl Fn(T) -> V + Send + Sync + 'static,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || match state.get() {
        LoadState::NotLoaded | LoadState::Loading => view! { <Spinner/> }.into_any(),
        LoadState::Failed(message) => view! {
            <div class="load-error">
                <p class="load-error__message">{message}</p>
                <button class="btn" on:click=move |_| on_retry.run(())>
                    "Try again"
                </button>
            </div>
        }
        .into_any(),
        LoadState::Ready(value) => ready(value).into_any(),
    }
}
