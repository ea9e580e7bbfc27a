//! Section tab bar

use impact_state::{DashboardTab, use_app_state};
use leptos::prelude::*;

#[component]
pub fn TabBar() -> impl IntoView {
    let state = use_app_state();
    let active = Memo::new(move |_| state.ui.with(|u| u.tab));

    view! {
        <div class="tabbar" role="tablist" aria-label="Dashboard Sections">
            {DashboardTab::all()
                .iter()
                .copied()
                .map(|tab| {
                    view! {
                        <button
                            id=format!("tab-{}", tab.id())
                            role="tab"
                            class="tab"
                            aria-selected=move || (active.get() == tab).to_string()
                            aria-controls="dashboard-panel"
                            on:click=move |_| state.select_tab(tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
