//! Section chrome: headers with help buttons, badges and legends

use impact_core::{HelpKey, MetricFamily, Thresholds, Tone};
use impact_state::use_app_state;
use leptos::prelude::*;

/// Section title with a "?" button that opens the help drawer on `help`
#[component]
pub fn SectionHeader(#[prop(into)] title: String, #[prop(into)] help: HelpKey) -> impl IntoView {
    let state = use_app_state();
    let aria = format!("About {title}");

    view! {
        <div class="section-head">
            <h3 class="section-title">{title}</h3>
            <button class="icon-btn" aria-label=aria on:click=move |_| state.open_help(help)>
                "?"
            </button>
        </div>
    }
}

#[component]
pub fn PillBadge(children: Children) -> impl IntoView {
    view! { <span class="badge">{children()}</span> }
}

/// Metric family colour chips
#[component]
pub fn FamilyLegend() -> impl IntoView {
    view! {
        <div class="legend" aria-label="Legend: metric families">
            <div class="legend-col" aria-label="Metric families">
                {MetricFamily::all()
                    .iter()
                    .map(|f| view! {
                        <span class="legend-chip">
                            <i class=format!("legend-dot {}", f.css_class()) />
                            {format!(" {}", f.label())}
                        </span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Band legend for a thresholded ratio
#[component]
pub fn ToneLegend(thresholds: Thresholds, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="legend" aria-label=format!("Legend: {label}")>
            <div class="legend-col">
                {Tone::all()
                    .iter()
                    .map(|t| view! {
                        <span class="legend-chip">
                            <i class=format!("legend-dot {}", t.css_class()) style=format!("background:{}", t.color()) />
                            {format!(" {}", t.band_label(&thresholds))}
                        </span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
