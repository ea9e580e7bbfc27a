//! Chord-style investment flows between regions.
//!
//! Regions sit evenly on a ring; each directed edge is a quadratic Bézier
//! pulled toward the centre. When both directions of a pair are visible the
//! two curves are pushed apart so they never coincide.

use crate::{
    chartkit::{PathBuilder, TextAnchor, clamp01, polar},
    colors,
};
use impact_core::{FlowEdge, Region, format_currency_compact};
use impact_state::{FlowInteraction, FlowQuery, NavKey, slider_max, slider_step};
use leptos::prelude::*;
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::sync::atomic::{AtomicUsize, Ordering};
use wasm_bindgen::JsCast;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// How strongly control points are pulled toward the centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BundleMode {
    /// Same factor for every link
    Fixed(f64),
    /// `0.68 + 0.22 * span/π`: long spans bundle tighter
    SpanAware,
}

impl BundleMode {
    pub fn factor(&self, span: f64) -> f64 {
        match *self {
            Self::Fixed(f) => f,
            Self::SpanAware => 0.68 + 0.22 * (span.abs().min(PI) / PI),
        }
    }
}

impl Default for BundleMode {
    fn default() -> Self {
        Self::Fixed(0.82)
    }
}

/// Flow chart configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    pub min_inner: f64,
    pub max_inner: f64,
    pub margin: f64,
    /// Ring radius is `inner/2 - ring_inset`
    pub ring_inset: f64,
    /// Control point radius as a fraction of the ring radius
    pub control_ratio: f64,
    pub bundle: BundleMode,
    /// Arrow markers instead of destination dots
    pub show_arrows: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            min_inner: 320.0,
            max_inner: 600.0,
            margin: 56.0,
            ring_inset: 36.0,
            control_ratio: 0.7,
            bundle: BundleMode::default(),
            show_arrows: false,
        }
    }
}

// ============================================================================
// LAYOUT TYPES
// ============================================================================

/// One rendered link
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLink {
    pub from: Region,
    pub to: Region,
    pub amount: f64,
    pub start: (f64, f64),
    pub control: (f64, f64),
    pub end: (f64, f64),
    pub path: String,
    pub thickness: f64,
    /// `-1`/`+1` for bidirectional pairs, `0` otherwise
    pub side: i8,
    pub dimmed: bool,
    pub dot: (f64, f64),
    pub dot_radius: f64,
    pub title: String,
}

impl FlowLink {
    pub fn opacity(&self) -> f64 {
        if self.dimmed { 0.16 } else { 0.85 }
    }

    pub fn dot_opacity(&self) -> f64 {
        if self.dimmed { 0.28 } else { 0.98 }
    }
}

/// In/out totals over visible edges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionTotals {
    pub in_us: f64,
    pub out_us: f64,
}

impl RegionTotals {
    pub fn label(&self) -> String {
        format!(
            "out {} · in {}",
            format_currency_compact(self.out_us),
            format_currency_compact(self.in_us)
        )
    }
}

/// Region marker on the ring
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAnchor {
    pub region: Region,
    pub angle: f64,
    pub dot: (f64, f64),
    pub tick_end: (f64, f64),
    pub label: (f64, f64),
    pub anchor: TextAnchor,
    pub dimmed: bool,
    pub totals: RegionTotals,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowStats {
    pub total_shown: f64,
    /// Largest amount over all edges, before filtering
    pub max_link: f64,
    pub link_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    pub size: f64,
    pub center: (f64, f64),
    pub radius: f64,
    pub regions: Vec<Region>,
    pub links: Vec<FlowLink>,
    pub anchors: Vec<RegionAnchor>,
    pub stats: FlowStats,
}

// ============================================================================
// FILTERING
// ============================================================================

/// Largest link amount, 0 for an empty set
pub fn flow_max(edges: &[FlowEdge]) -> f64 {
    edges
        .iter()
        .map(|e| e.amount_us)
        .filter(|a| a.is_finite())
        .fold(0.0, f64::max)
}

/// Edges at or above the threshold, self-loops dropped
pub fn visible_edges(edges: &[FlowEdge], threshold: f64) -> Vec<&FlowEdge> {
    edges
        .iter()
        .filter(|e| e.amount_us >= threshold && !e.is_self_loop())
        .collect()
}

/// Visible edges restricted to the focus when `hide_others` is on, largest first
pub fn shown_edges<'a>(visible: &[&'a FlowEdge], query: &FlowQuery) -> Vec<&'a FlowEdge> {
    let mut shown: Vec<&FlowEdge> = match (query.focus, query.hide_others) {
        (Some(focus), true) => visible.iter().copied().filter(|e| e.touches(focus)).collect(),
        _ => visible.to_vec(),
    };
    shown.sort_by(|a, b| b.amount_us.total_cmp(&a.amount_us));
    shown
}

/// Regions in first-seen order without duplicates
pub fn ring_regions(order: &[Region]) -> Vec<Region> {
    let mut out = Vec::with_capacity(order.len());
    for r in order {
        if !out.contains(r) {
            out.push(*r);
        }
    }
    out
}

/// Side of each directed edge whose reverse is also visible.
/// The direction leaving the earlier ring region gets `-1`.
pub fn pair_sides(visible: &[&FlowEdge], regions: &[Region]) -> HashMap<(Region, Region), i8> {
    let index = |r: Region| regions.iter().position(|x| *x == r);
    let present: Vec<(Region, Region)> = visible.iter().map(|e| (e.from, e.to)).collect();
    let mut sides = HashMap::new();
    for &(a, b) in &present {
        if !present.contains(&(b, a)) {
            continue;
        }
        let side = match (index(a), index(b)) {
            (Some(ia), Some(ib)) if ia < ib => -1,
            _ => 1,
        };
        sides.insert((a, b), side);
    }
    sides
}

/// Stroke width in `[2, 12]`
pub fn stroke_width(amount: f64, threshold: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 2.0;
    }
    let denom = (max - threshold).max(1.0);
    let t = clamp01((amount - threshold) / denom);
    2.0 + t.powf(0.6) * 10.0
}

/// Signed angular difference wrapped into `[-π, π]`
fn wrap_angle(da: f64) -> f64 {
    let mut da = da % TAU;
    if da > PI {
        da -= TAU;
    } else if da < -PI {
        da += TAU;
    }
    da
}

// ============================================================================
// GEOMETRY
// ============================================================================

struct Ring {
    center: (f64, f64),
    radius: f64,
    control_ratio: f64,
    bundle: BundleMode,
}

impl Ring {
    fn point(&self, angle: f64) -> (f64, f64) {
        polar(self.center, angle, self.radius)
    }

    /// Mid-angle control point at `control_ratio * R`, pulled toward the centre
    fn control(&self, a1: f64, a2: f64) -> (f64, f64) {
        let da = wrap_angle(a2 - a1);
        let mid = a1 + da / 2.0;
        let (mx, my) = polar(self.center, mid, self.radius * self.control_ratio);
        let k = self.bundle.factor(da);
        let (cx, cy) = self.center;
        (cx + (mx - cx) * k, cy + (my - cy) * k)
    }

    /// Directed curve between two ring angles.
    ///
    /// Offsets are taken in the pair's canonical frame (earlier ring region
    /// first) so the two directions land on opposite sides of the chord.
    fn link(
        &self,
        a_from: f64,
        a_to: f64,
        from_first: bool,
        side: i8,
        thick: f64,
    ) -> ((f64, f64), (f64, f64), (f64, f64)) {
        let s = f64::from(side);
        let delta = if side != 0 {
            (3.0 + (thick * 0.5).min(8.0)).to_radians()
        } else {
            0.0
        };

        let (lo, hi) = if from_first { (a_from, a_to) } else { (a_to, a_from) };
        let lo = lo - s * delta;
        let hi = hi + s * delta;

        let p_lo = self.point(lo);
        let p_hi = self.point(hi);
        let (bx, by) = self.control(lo, hi);

        let (dx, dy) = (p_hi.0 - p_lo.0, p_hi.1 - p_lo.1);
        let len = dx.hypot(dy);
        let len = if len > 0.0 { len } else { 1.0 };
        let (nx, ny) = (-dy / len, dx / len);
        let sep = (4.0 + thick * 0.35) * s;
        let control = (bx + nx * sep, by + ny * sep);

        if from_first {
            (p_lo, control, p_hi)
        } else {
            (p_hi, control, p_lo)
        }
    }
}

/// Lay out the flow ring at the observed `width`
pub fn layout_flows(
    edges: &[FlowEdge],
    order: &[Region],
    width: f64,
    query: &FlowQuery,
    config: &FlowConfig,
) -> FlowLayout {
    let w = if width.is_finite() { width } else { config.min_inner };
    let inner = w.clamp(config.min_inner, config.max_inner);
    let size = inner + config.margin * 2.0;
    let radius = (inner / 2.0 - config.ring_inset).max(0.0);
    let c = config.margin + inner / 2.0;
    let ring = Ring {
        center: (c, c),
        radius,
        control_ratio: config.control_ratio,
        bundle: config.bundle,
    };

    let regions = ring_regions(order);
    let step = if regions.is_empty() {
        0.0
    } else {
        TAU / regions.len() as f64
    };
    let angles: HashMap<Region, (usize, f64)> = regions
        .iter()
        .enumerate()
        .map(|(i, r)| (*r, (i, -FRAC_PI_2 + i as f64 * step)))
        .collect();

    let max = flow_max(edges);
    let threshold = query.threshold;
    let visible = visible_edges(edges, threshold);
    let shown = shown_edges(&visible, query);
    let sides = pair_sides(&visible, &regions);

    let mut totals: HashMap<Region, RegionTotals> = HashMap::new();
    for e in &visible {
        totals.entry(e.from).or_default().out_us += e.amount_us;
        totals.entry(e.to).or_default().in_us += e.amount_us;
    }

    let links: Vec<FlowLink> = shown
        .iter()
        .filter_map(|e| {
            let (Some(&(i_from, a_from)), Some(&(i_to, a_to))) =
                (angles.get(&e.from), angles.get(&e.to))
            else {
                tracing::trace!(from = %e.from, to = %e.to, "flow edge outside ring skipped");
                return None;
            };
            let thickness = stroke_width(e.amount_us, threshold, max);
            let side = sides.get(&(e.from, e.to)).copied().unwrap_or(0);
            let (start, control, end) = ring.link(a_from, a_to, i_from < i_to, side, thickness);
            let path = PathBuilder::new()
                .move_to(start.0, start.1)
                .quadratic_to(control.0, control.1, end.0, end.1)
                .build();

            Some(FlowLink {
                from: e.from,
                to: e.to,
                amount: e.amount_us,
                start,
                control,
                end,
                path,
                thickness,
                side,
                dimmed: query.focus.is_some_and(|f| !e.touches(f)),
                dot: polar(ring.center, a_to, radius - 2.0),
                dot_radius: (thickness * 0.28).clamp(1.5, 2.8),
                title: format!(
                    "{} → {}: {}",
                    e.from,
                    e.to,
                    format_currency_compact(e.amount_us)
                ),
            })
        })
        .collect();

    let anchors = regions
        .iter()
        .map(|r| {
            let angle = angles.get(r).map(|&(_, a)| a).unwrap_or(-FRAC_PI_2);
            RegionAnchor {
                region: *r,
                angle,
                dot: polar(ring.center, angle, radius),
                tick_end: polar(ring.center, angle, radius + 14.0),
                label: polar(ring.center, angle, radius + 28.0),
                anchor: TextAnchor::for_angle(angle),
                dimmed: query.focus.is_some_and(|f| f != *r),
                totals: totals.get(r).copied().unwrap_or_default(),
            }
        })
        .collect();

    let stats = FlowStats {
        total_shown: shown.iter().map(|e| e.amount_us).sum(),
        max_link: max,
        link_count: shown.len(),
    };

    tracing::debug!(size, links = stats.link_count, threshold, "flow layout");

    FlowLayout {
        size,
        center: ring.center,
        radius,
        regions,
        links,
        anchors,
        stats,
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

static NEXT_FLOW_ID: AtomicUsize = AtomicUsize::new(0);

/// Move DOM focus to the `index`-th sibling of the event's button
fn focus_sibling(ev: &web_sys::KeyboardEvent, index: usize) {
    let Some(parent) = ev
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.parent_element())
    else {
        return;
    };
    if let Some(el) = parent
        .children()
        .item(index as u32)
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}

/// Investment flow ring with region badges, threshold slider and focus controls
#[component]
pub fn InvestmentFlows(
    #[prop(into)] edges: Signal<Vec<FlowEdge>>,
    #[prop(into)] width: Signal<f64>,
    /// Ring order; defaults to the canonical region order
    #[prop(optional)]
    regions: Option<Vec<Region>>,
    #[prop(optional)] config: Option<FlowConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let order = ring_regions(&regions.unwrap_or_else(|| Region::ring_order().to_vec()));
    let uid = NEXT_FLOW_ID.fetch_add(1, Ordering::Relaxed);

    let max = Memo::new(move |_| edges.with(|e| flow_max(e)));
    let state = RwSignal::new(FlowInteraction::new(max.get_untracked()));

    Effect::new(move |_| {
        let m = max.get();
        state.update(|s| s.reconcile(m));
    });

    let layout = {
        let order = order.clone();
        Memo::new(move |_| {
            let query = state.with(|s| s.query());
            edges.with(|e| layout_flows(e, &order, width.get(), &query, &config))
        })
    };

    let badges = {
        let order = order.clone();
        move || {
            let order_for_keys = order.clone();
            order
                .iter()
                .copied()
                .enumerate()
                .map(|(i, r)| {
                    let keys = order_for_keys.clone();
                    let totals = move || {
                        layout.with(|l| {
                            l.anchors
                                .iter()
                                .find(|a| a.region == r)
                                .map(|a| a.totals)
                                .unwrap_or_default()
                        })
                    };
                    view! {
                        <button
                            class="badge"
                            aria-pressed=move || state.with(|s| s.is_selected(r)).to_string()
                            data-selected=move || state.with(|s| s.is_selected(r)).then_some("true")
                            tabindex=move || {
                                if state.with(|s| s.tab_stop(keys.len())) == i { "0" } else { "-1" }
                            }
                            on:focus=move |_| state.update(|s| s.focus_index = i)
                            on:keydown={
                                let keys = order_for_keys.clone();
                                move |ev: web_sys::KeyboardEvent| {
                                    let Some(key) = NavKey::from_key(&ev.key()) else {
                                        return;
                                    };
                                    ev.prevent_default();
                                    let mut next = None;
                                    state.update(|s| next = s.handle_key(key, i, &keys));
                                    if let Some(n) = next {
                                        focus_sibling(&ev, n);
                                    }
                                }
                            }
                            on:mouseenter=move |_| state.update(|s| s.set_hover(Some(r)))
                            on:mouseleave=move |_| state.update(|s| s.set_hover(None))
                            on:click=move |_| state.update(|s| s.toggle_pin(r))
                            title=move || {
                                let t = totals();
                                format!(
                                    "{} - Out: {} · In: {}",
                                    r,
                                    format_currency_compact(t.out_us),
                                    format_currency_compact(t.in_us)
                                )
                            }
                        >
                            {r.name()}
                            <span class="caption badge-sub">{move || totals().label()}</span>
                        </button>
                    }
                })
                .collect_view()
        }
    };

    let arrow_id = format!("flow-arrow-{uid}");
    let slider_id = format!("flow-min-{uid}");

    view! {
        <div class="flow-controls">
            <div class="legend">
                <svg width="44" height="14" aria-hidden="true">
                    <path d="M2,10 Q22,-8 42,10" fill="none" stroke=colors::ACCENT_2 stroke-width="4" opacity="0.9" />
                </svg>
                <span class="caption">"Flow ~ thickness"</span>
                <span class="caption">"• Two arcs = opposite directions • Dot marks destination"</span>
            </div>

            <div class="hstack wrap">{badges}</div>

            <div class="hstack">
                <span class="caption">"Total shown:"</span>
                <strong class="caption">
                    {move || layout.with(|l| format_currency_compact(l.stats.total_shown))}
                </strong>
                <span class="caption">"Max link:"</span>
                <strong class="caption">
                    {move || layout.with(|l| format_currency_compact(l.stats.max_link))}
                </strong>
                <span class="caption">"• Links:"</span>
                <strong class="caption">{move || layout.with(|l| l.stats.link_count)}</strong>
            </div>

            <div class="hstack">
                <label class="caption" for=slider_id.clone()>"Min flow"</label>
                <input
                    id=slider_id
                    type="range"
                    min="0"
                    max=move || slider_max(max.get())
                    step=move || slider_step(max.get())
                    prop:value=move || state.with(|s| s.threshold).min(max.get().round())
                    aria-label="Minimum flow threshold"
                    aria-valuemin="0"
                    aria-valuemax=move || max.get().round()
                    aria-valuenow=move || state.with(|s| s.threshold)
                    on:input=move |ev| {
                        if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                            state.update(|s| s.set_threshold(v, max.get_untracked()));
                        }
                    }
                />
                <span class="caption">{move || state.with(|s| format_currency_compact(s.threshold))}</span>
                <button
                    class="badge"
                    disabled=move || state.with(|s| s.focus().is_none())
                    aria-label="Clear focus region"
                    title="Clear focus"
                    on:click=move |_| state.update(|s| s.clear_focus())
                >
                    "Clear focus"
                </button>
                <label class="hstack caption">
                    <input
                        type="checkbox"
                        prop:checked=move || state.with(|s| s.hide_others)
                        aria-label="Only show focused region"
                        on:change=move |ev| state.update(|s| s.set_hide_others(event_target_checked(&ev)))
                    />
                    "dim rest"
                </label>
            </div>
        </div>

        <div class="flow-chart">
            {move || {
                let l = layout.get();
                let (cx, cy) = l.center;
                let arrow_id = arrow_id.clone();
                let marker = config.show_arrows.then(|| format!("url(#{arrow_id})"));
                view! {
                    <svg width=l.size height=l.size role="img" aria-label="Chord-like flow between regions">
                        {config.show_arrows.then(|| view! {
                            <defs>
                                <marker id=arrow_id.clone() viewBox="0 0 10 10" refX="9" refY="5"
                                    markerWidth="9" markerHeight="9" orient="auto" markerUnits="userSpaceOnUse">
                                    <path d="M0,0 L10,5 L0,10 z" fill=colors::ACCENT_2 />
                                </marker>
                            </defs>
                        })}

                        <circle cx=cx cy=cy r=l.radius fill="none" stroke=colors::RING stroke-dasharray="4 6" />

                        <g>
                            {l.links
                                .into_iter()
                                .map(|link| {
                                    let to = link.to;
                                    let label = format!("{} to {}", link.from, link.to);
                                    view! {
                                        <g aria-label=label>
                                            <path
                                                d=link.path.clone()
                                                fill="none"
                                                stroke=colors::ACCENT_2
                                                stroke-width=link.thickness
                                                opacity=link.opacity()
                                                marker-end=marker.clone()
                                                on:mouseenter=move |_| state.update(|s| s.hover_link(Some(to)))
                                                on:mouseleave=move |_| state.update(|s| s.hover_link(None))
                                            >
                                                <title>{link.title.clone()}</title>
                                            </path>
                                            {(!config.show_arrows).then(|| view! {
                                                <circle cx=link.dot.0 cy=link.dot.1 r=link.dot_radius
                                                    fill=colors::ACCENT_2 opacity=link.dot_opacity()>
                                                    <title>{link.title.clone()}</title>
                                                </circle>
                                            })}
                                        </g>
                                    }
                                })
                                .collect_view()}
                        </g>

                        <g>
                            {l.anchors
                                .into_iter()
                                .map(|a| {
                                    let label_opacity = if a.dimmed { 0.6 } else { 1.0 };
                                    view! {
                                        <g aria-label=format!("{} label", a.region)>
                                            <circle cx=a.dot.0 cy=a.dot.1 r="3.5" fill=colors::REGION_DOT
                                                stroke=colors::INK stroke-opacity="0.2" />
                                            <line x1=a.dot.0 y1=a.dot.1 x2=a.tick_end.0 y2=a.tick_end.1
                                                stroke=colors::INK stroke-opacity={if a.dimmed { 0.25 } else { 0.45 }} />
                                            <text x=a.label.0 y=a.label.1 text-anchor=a.anchor.as_str()
                                                class="caption" aria-hidden="true" fill=colors::INK opacity=label_opacity>
                                                {a.region.name()}
                                            </text>
                                            <text x=a.label.0 y=a.label.1 + 12.0 text-anchor=a.anchor.as_str()
                                                class="caption" fill=colors::MUTED opacity=label_opacity>
                                                {a.totals.label()}
                                            </text>
                                        </g>
                                    }
                                })
                                .collect_view()}
                        </g>
                    </svg>
                }
            }}
        </div>
    }
}
