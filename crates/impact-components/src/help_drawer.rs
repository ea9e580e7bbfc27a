//! Slide-in help drawer bound to `UiState::help`

use impact_state::use_app_state;
use leptos::{ev, prelude::*};

#[component]
pub fn HelpDrawer() -> impl IntoView {
    let state = use_app_state();
    let ui = state.ui;
    let is_open = Memo::new(move |_| ui.with(|u| u.help.is_some()));
    let content = Memo::new(move |_| ui.with(|u| u.help.map(|k| k.content())));

    let handle = window_event_listener(ev::keydown, move |e| {
        if is_open.get_untracked() && matches!(e.key().as_str(), "Escape" | "Esc") {
            tracing::trace!("help drawer closed from keyboard");
            state.close_help();
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <Show when=move || is_open.get()>
            <div class="drawer-backdrop" aria-hidden="true" on:click=move |_| state.close_help() />
        </Show>
        <aside
            class="drawer"
            role="dialog"
            aria-modal="true"
            aria-label=move || content.get().map_or("Help", |c| c.title)
            data-open=move || is_open.get().then_some("true")
        >
            <header class="drawer-head">
                <h3 class="drawer-title">{move || content.get().map_or("Help", |c| c.title)}</h3>
                <button class="icon-btn" aria-label="Close help" on:click=move |_| state.close_help()>
                    "✕"
                </button>
            </header>
            <div class="drawer-body">
                {move || match content.get() {
                    Some(c) => view! {
                        <section><h4>"What it is"</h4><p>{c.what}</p></section>
                        <section><h4>"Why it matters"</h4><p>{c.why}</p></section>
                        <section><h4>"How to read this chart"</h4><p>{c.how}</p></section>
                    }
                    .into_any(),
                    None => view! { <p class="caption">"No details available."</p> }.into_any(),
                }}
            </div>
        </aside>
    }
}
