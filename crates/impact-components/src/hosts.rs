//! Chart hosts.
//!
//! Each host owns the container `NodeRef`, observes its width and hands the
//! signal to a pure-geometry chart. Charts never measure the DOM themselves.

use crate::config::HostWidth;
use impact_charts::{
    FunnelConfig, InvestmentFlows, JobsButterfly, LocalContentMini, LocalContentRibbon, SlopeCard,
    SmeFunnel, use_container_width,
};
use impact_core::{FlowEdge, JobsByDemoItem, LocalContentPoint, MetricDatum, SmeFunnelItem};
use impact_state::use_app_state;
use leptos::{html::Div, prelude::*};

/// Headline card with its own width observer and a metric help button
#[component]
pub fn SlopeCardHost(datum: MetricDatum, size: HostWidth) -> impl IntoView {
    let state = use_app_state();
    let node = NodeRef::<Div>::new();
    let width = use_container_width(node, size.observer());
    let key = datum.key;
    let label = format!("About {}", datum.label);
    let datum = Signal::derive(move || datum.clone());

    view! {
        <div class="card slope-card" node_ref=node>
            <button class="icon-btn card-help" aria-label=label on:click=move |_| state.open_help(key)>
                "?"
            </button>
            <SlopeCard datum=datum width=width />
        </div>
    }
}

/// Responsive row of headline cards honouring the compare toggle
#[component]
pub fn SlopeCardRow(size: HostWidth) -> impl IntoView {
    let state = use_app_state();
    let headline = Memo::new(move |_| state.headline());

    view! {
        <div class="row">
            <For
                each=move || headline.get()
                key=|d| (d.key, d.previous.to_bits(), d.current.to_bits())
                children=move |d| view! { <SlopeCardHost datum=d size=size /> }
            />
        </div>
    }
}

#[component]
pub fn FunnelHost(
    #[prop(into)] items: Signal<Vec<SmeFunnelItem>>,
    #[prop(into)] per_million: Signal<Option<f64>>,
    config: FunnelConfig,
    size: HostWidth,
) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let width = use_container_width(node, size.observer());

    view! {
        <div class="chart-host" node_ref=node>
            <SmeFunnel items=items width=width per_million=per_million config=config />
        </div>
    }
}

#[component]
pub fn FlowsHost(#[prop(into)] edges: Signal<Vec<FlowEdge>>, size: HostWidth) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let width = use_container_width(node, size.observer());

    view! {
        <div class="chart-host" node_ref=node>
            <InvestmentFlows edges=edges width=width />
        </div>
    }
}

#[component]
pub fn RibbonHost(#[prop(into)] points: Signal<Vec<LocalContentPoint>>, size: HostWidth) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let width = use_container_width(node, size.observer());

    view! {
        <div class="chart-host" node_ref=node>
            <LocalContentRibbon points=points width=width />
        </div>
    }
}

#[component]
pub fn MiniRibbonHost(
    #[prop(into)] points: Signal<Vec<LocalContentPoint>>,
    size: HostWidth,
    #[prop(optional, into)] title: Option<String>,
) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let width = use_container_width(node, size.observer());
    let title = title.unwrap_or_else(|| "Local content (share)".into());

    view! {
        <div class="chart-host mini" node_ref=node>
            <LocalContentMini points=points width=width title=title />
        </div>
    }
}

#[component]
pub fn JobsHost(#[prop(into)] items: Signal<Vec<JobsByDemoItem>>, size: HostWidth) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let width = use_container_width(node, size.observer());

    view! {
        <div class="chart-host" node_ref=node>
            <JobsButterfly items=items width=width />
        </div>
    }
}
