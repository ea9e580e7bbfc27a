//! Slope/dumbbell cards: previous period on the left, current on the right

use crate::{
    chartkit::{LinearScale, Scale},
    colors,
};
use impact_core::{DeltaDirection, MetricDatum};
use leptos::prelude::*;

/// Slope card configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeConfig {
    pub height: f64,
    /// Inner padding of the SVG
    pub padding: f64,
    /// Extra inset of the two dots from the padding
    pub dot_inset: f64,
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self {
            height: 110.0,
            padding: 16.0,
            dot_inset: 6.0,
        }
    }
}

/// Computed slope geometry
#[derive(Debug, Clone, PartialEq)]
pub struct SlopeLayout {
    pub width: f64,
    pub height: f64,
    pub x_prev: f64,
    pub x_curr: f64,
    pub y_prev: f64,
    pub y_curr: f64,
    pub prev_label_dy: f64,
    pub curr_label_dy: f64,
    pub prev_label: String,
    pub curr_label: String,
    pub delta_percent: f64,
    pub direction: DeltaDirection,
    pub badge: String,
    pub accent: &'static str,
}

/// Lay out one metric at the observed `width`
pub fn layout_slope(datum: &MetricDatum, width: f64, config: &SlopeConfig) -> SlopeLayout {
    let h = config.height;
    let x_prev = config.padding + config.dot_inset;
    let x_curr = width - config.padding - config.dot_inset;

    let lo = datum.current.min(datum.previous);
    let hi = datum.current.max(datum.previous);
    let pad = (hi - lo).max(hi) * 0.12;
    let y = LinearScale::new()
        .domain(lo - pad, hi + pad)
        .range(h - 20.0, 18.0);

    let y_prev = y.scale(datum.previous);
    let y_curr = y.scale(datum.current);

    SlopeLayout {
        width,
        height: h,
        x_prev,
        x_curr,
        y_prev,
        y_curr,
        prev_label_dy: if y_prev < 30.0 { 12.0 } else { -8.0 },
        curr_label_dy: if y_curr > h - 30.0 { -10.0 } else { 16.0 },
        prev_label: datum.format_value(datum.previous),
        curr_label: datum.format_value(datum.current),
        delta_percent: datum.delta_percent(),
        direction: datum.direction(),
        badge: datum.delta_label(),
        accent: datum.family.accent(),
    }
}

/// Slope SVG for one metric. The host passes the observed card width.
#[component]
pub fn SlopeCard(
    #[prop(into)] datum: Signal<MetricDatum>,
    #[prop(into)] width: Signal<f64>,
    #[prop(optional)] config: Option<SlopeConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let layout = Memo::new(move |_| {
        let l = layout_slope(&datum.get(), width.get(), &config);
        tracing::debug!(width = l.width, "slope layout");
        l
    });

    view! {
        <div class="card-head">
            <strong class="card-title" title=move || datum.with(|d| d.label.clone())>
                {move || datum.with(|d| d.label.clone())}
            </strong>
            <span
                class=move || format!("badge {}", layout.with(|l| l.direction.css_class()))
                title=move || layout.with(|l| format!("Δ {:.1}%", l.delta_percent.abs()))
            >
                {move || layout.with(|l| l.badge.clone())}
            </span>
        </div>
        {move || {
            let l = layout.get();
            let label = datum.with(|d| d.label.clone());
            view! {
                <svg
                    class="slope-svg"
                    viewBox=format!("0 0 {} {}", l.width, l.height)
                    width="100%"
                    height=l.height
                    role="img"
                    aria-label=format!("{}: previous vs current", label)
                >
                    <line x1=l.x_prev y1="10" x2=l.x_prev y2=l.height - 10.0
                        stroke=colors::TEAL_600 stroke-dasharray="2,4" />
                    <line x1=l.x_curr y1="10" x2=l.x_curr y2=l.height - 10.0
                        stroke=colors::TEAL_600 stroke-dasharray="2,4" />

                    <line
                        x1=l.x_prev y1=l.y_prev
                        x2=l.x_curr y2=l.y_curr
                        stroke=l.accent
                        stroke-width="3"
                        stroke-linecap="round"
                    />

                    <circle cx=l.x_prev cy=l.y_prev r="5"
                        fill=colors::PANEL stroke=colors::MUTED stroke-width="2" />
                    <text x=l.x_prev y=l.y_prev + l.prev_label_dy text-anchor="start" class="caption">
                        {l.prev_label.clone()}
                    </text>

                    <circle cx=l.x_curr cy=l.y_curr r="6" fill=l.accent />
                    <text x=l.x_curr y=l.y_curr + l.curr_label_dy text-anchor="end" class="caption">
                        {l.curr_label.clone()}
                    </text>
                </svg>
            }
        }}
    }
}
