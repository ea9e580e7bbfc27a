//! Ratio gauges: catalytic leverage rings and government-revenue thermometers

use crate::{
    chartkit::{LinearScale, Scale, clamp01, polar},
    colors,
};
use impact_core::{
    GovRevBreakdown, GovRevItem, LeverageItem, Thresholds, Tone, format_currency_compact,
    format_multiplier,
};
use leptos::prelude::*;
use std::f64::consts::{FRAC_PI_2, TAU};

// ============================================================================
// RINGS
// ============================================================================

/// Leverage ring configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    pub thresholds: Thresholds,
    pub outer_radius: f64,
    pub outer_stroke: f64,
    pub inner_radius: f64,
    pub inner_stroke: f64,
    pub size: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::leverage(),
            outer_radius: 32.0,
            outer_stroke: 8.0,
            inner_radius: 22.0,
            inner_stroke: 6.0,
            size: 86.0,
        }
    }
}

/// Progress ring drawn as a dashed circle starting at 12 o'clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingArc {
    pub radius: f64,
    pub stroke: f64,
    pub progress: f64,
    pub circumference: f64,
    pub dash: f64,
    pub gap: f64,
}

impl RingArc {
    pub fn new(radius: f64, stroke: f64, progress: f64) -> Self {
        let circumference = TAU * radius;
        let progress = clamp01(progress);
        let dash = circumference * progress;
        Self {
            radius,
            stroke,
            progress,
            circumference,
            dash,
            gap: (circumference - dash).max(0.0001),
        }
    }

    pub fn dasharray(&self) -> String {
        format!("{:.3} {:.3}", self.dash, self.gap)
    }
}

/// Short radial mark on the outer ring at a threshold value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingMark {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeverageRing {
    pub id: String,
    pub name: String,
    pub leverage: f64,
    pub other_share: f64,
    pub tone: Tone,
    pub outer: RingArc,
    pub inner: RingArc,
    pub center_label: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingsLayout {
    pub scale_max: f64,
    pub rings: Vec<LeverageRing>,
    /// Threshold marks, shared by every ring (centred on the origin)
    pub marks: Vec<RingMark>,
}

/// Upper bound of the ring scale: headroom above the largest ratio and the
/// "good" threshold, rounded up to the next 0.5
pub fn ring_scale_max(leverages: impl IntoIterator<Item = f64>, thresholds: &Thresholds) -> f64 {
    let max_ratio = leverages.into_iter().fold(1.0_f64, f64::max);
    ((thresholds.good * 1.1).max(max_ratio * 1.1) * 2.0).ceil() / 2.0
}

pub fn layout_rings(items: &[LeverageItem], config: &RingConfig) -> RingsLayout {
    let t = config.thresholds;
    let scale_max = ring_scale_max(items.iter().map(LeverageItem::leverage), &t);

    let rings = items
        .iter()
        .map(|item| {
            let leverage = item.leverage();
            let other_share = item.other_share();
            LeverageRing {
                id: item.id.clone(),
                name: item.name.clone(),
                leverage,
                other_share,
                tone: t.classify(leverage),
                outer: RingArc::new(config.outer_radius, config.outer_stroke, leverage / scale_max),
                inner: RingArc::new(config.inner_radius, config.inner_stroke, other_share),
                center_label: format_multiplier(leverage, 1),
                caption: format!(
                    "Bank {} • Other {}",
                    format_currency_compact(item.bank()),
                    format_currency_compact(item.other())
                ),
            }
        })
        .collect();

    // 0 on the angle scale is 12 o'clock
    let angle = LinearScale::angle(0.0, scale_max);
    let r0 = config.outer_radius - config.outer_stroke / 2.0;
    let r1 = config.outer_radius + config.outer_stroke / 2.0;
    let marks = [(t.min, Tone::Caution), (t.good, Tone::Strong)]
        .into_iter()
        .filter(|(v, _)| *v > 0.0 && *v < scale_max)
        .map(|(v, tone)| {
            let a = angle.scale(v) - FRAC_PI_2;
            RingMark {
                from: polar((0.0, 0.0), a, r0),
                to: polar((0.0, 0.0), a, r1),
                tone,
            }
        })
        .collect();

    tracing::debug!(scale_max, count = items.len(), "ring layout");

    RingsLayout { scale_max, rings, marks }
}

/// Legend chip text and colour for each band
pub fn tone_legend(t: &Thresholds) -> Vec<(Tone, String)> {
    Tone::all().iter().map(|tone| (*tone, tone.band_label(t))).collect()
}

/// Leverage rings with threshold legend
#[component]
pub fn LeverageRings(
    #[prop(into)] items: Signal<Vec<LeverageItem>>,
    #[prop(optional)] config: Option<RingConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let layout = Memo::new(move |_| items.with(|i| layout_rings(i, &config)));
    let half = config.size / 2.0;

    view! {
        <div class="rings">
            <div class="ring-grid">
                {move || {
                    let l = layout.get();
                    let marks = l.marks.clone();
                    l.rings
                        .into_iter()
                        .map(|r| {
                            let marks = marks.clone();
                            view! {
                                <div class="panel ring-card">
                                    <svg
                                        width=config.size
                                        height=config.size
                                        role="img"
                                        aria-label=format!("{}: leverage {}", r.name, r.center_label)
                                    >
                                        <g transform=format!("translate({},{})", half, half)>
                                            <g transform="rotate(-90)">
                                                <circle r=r.outer.radius fill="none" stroke=colors::TRACK
                                                    stroke-width=r.outer.stroke />
                                                <circle
                                                    r=r.outer.radius
                                                    fill="none"
                                                    stroke=r.tone.color()
                                                    stroke-width=r.outer.stroke
                                                    stroke-linecap="round"
                                                    stroke-dasharray=r.outer.dasharray()
                                                />
                                                <circle r=r.inner.radius fill="none" stroke=colors::TRACK
                                                    stroke-width=r.inner.stroke />
                                                <circle
                                                    r=r.inner.radius
                                                    fill="none"
                                                    stroke=colors::TEAL_600
                                                    stroke-width=r.inner.stroke
                                                    stroke-linecap="round"
                                                    stroke-dasharray=r.inner.dasharray()
                                                />
                                            </g>
                                            {marks
                                                .into_iter()
                                                .map(|m| view! {
                                                    <line
                                                        x1=m.from.0 y1=m.from.1
                                                        x2=m.to.0 y2=m.to.1
                                                        stroke=m.tone.color()
                                                        stroke-width="1.5"
                                                    />
                                                })
                                                .collect_view()}
                                            <text x="0" y="4" text-anchor="middle" class="ring-center">
                                                {r.center_label.clone()}
                                            </text>
                                        </g>
                                    </svg>
                                    <div class="ring-text">
                                        <div class="ring-name" title=r.name.clone()>{r.name.clone()}</div>
                                        <div class="caption">{r.caption.clone()}</div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="legend caption">
                {tone_legend(&config.thresholds)
                    .into_iter()
                    .map(|(tone, label)| view! {
                        <span class=format!("legend-chip {}", tone.css_class())>
                            <i class="legend-dot" style=format!("background:{}", tone.color()) />
                            {label}
                        </span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

// ============================================================================
// THERMOMETERS
// ============================================================================

/// Thermometer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermometerConfig {
    pub thresholds: Thresholds,
    /// Minimum top of the scale
    pub max_clamp: f64,
    pub track_y: f64,
    pub track_h: f64,
}

impl Default for ThermometerConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::gov_revenue(),
            max_clamp: 6.0,
            track_y: 12.0,
            track_h: 112.0,
        }
    }
}

/// Axis tick as a percentage of the track height
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub percent: f64,
    pub label: String,
    pub tone: Option<Tone>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub label: &'static str,
    pub amount: String,
    pub share: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thermometer {
    pub id: String,
    pub name: String,
    pub multiplier: f64,
    pub tone: Tone,
    pub fill_percent: f64,
    pub fill_y: f64,
    pub fill_h: f64,
    pub multiplier_label: String,
    pub gov_revenue_label: String,
    pub bank_label: String,
    /// Empty when there is nothing to break down
    pub breakdown: Vec<BreakdownRow>,
    pub period: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermometerLayout {
    pub max_value: f64,
    pub ticks: Vec<AxisTick>,
    pub items: Vec<Thermometer>,
}

fn breakdown_rows(item: &GovRevItem) -> Vec<BreakdownRow> {
    let Some(b) = &item.breakdown else {
        return Vec::new();
    };
    if b.component_total() <= 0.0 {
        return Vec::new();
    }
    let total = item.breakdown_total();
    b.rows()
        .into_iter()
        .map(|(label, amount)| BreakdownRow {
            label,
            amount: format_currency_compact(amount),
            share: GovRevBreakdown::share_label(amount, total),
        })
        .collect()
}

pub fn layout_thermometers(items: &[GovRevItem], config: &ThermometerConfig) -> ThermometerLayout {
    let t = config.thresholds;
    let max_value = items
        .iter()
        .map(GovRevItem::multiplier)
        .fold(t.good.max(config.max_clamp), f64::max);
    let pct = LinearScale::new().domain(0.0, max_value).range(0.0, 100.0);
    let bottom = config.track_y + config.track_h;

    let ticks = vec![
        AxisTick {
            percent: t.min / max_value * 100.0,
            label: format!("≥ {:.1}×", t.min),
            tone: Some(Tone::Caution),
        },
        AxisTick {
            percent: t.good / max_value * 100.0,
            label: format!("≥ {:.1}×", t.good),
            tone: Some(Tone::Strong),
        },
        AxisTick {
            percent: 100.0,
            label: format_multiplier(max_value, 1),
            tone: None,
        },
        AxisTick {
            percent: 0.0,
            label: "0×".to_string(),
            tone: None,
        },
    ];

    let items = items
        .iter()
        .map(|item| {
            let multiplier = item.multiplier();
            let fill_percent = pct.scale(multiplier).clamp(0.0, 100.0);
            let fill_h = config.track_h * fill_percent / 100.0;
            Thermometer {
                id: item.id.clone(),
                name: item.name.clone(),
                multiplier,
                tone: t.classify(multiplier),
                fill_percent,
                fill_y: bottom - fill_h,
                fill_h,
                multiplier_label: format_multiplier(multiplier, 1),
                gov_revenue_label: format_currency_compact(item.gov_revenue_us),
                bank_label: format_currency_compact(item.bank_us),
                breakdown: breakdown_rows(item),
                period: item.breakdown.as_ref().and_then(|b| b.period.clone()),
                note: item.breakdown.as_ref().and_then(|b| b.note.clone()),
            }
        })
        .collect();

    ThermometerLayout { max_value, ticks, items }
}

/// Revenue multiplier thermometers with a shared threshold axis
#[component]
pub fn RevenueThermometers(
    #[prop(into)] items: Signal<Vec<GovRevItem>>,
    #[prop(optional)] config: Option<ThermometerConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let layout = Memo::new(move |_| items.with(|i| layout_thermometers(i, &config)));
    let open = RwSignal::new(None::<String>);
    let bulb_y = config.track_y + config.track_h + 2.0;

    view! {
        <div class="panel grm">
            <p class="caption">
                "Estimated government revenue generated per US$1 invested. Select a thermometer for a tax breakdown."
            </p>
            <div class="grm-shell">
                <div class="grm-axis" aria-hidden="true">
                    {move || {
                        layout
                            .get()
                            .ticks
                            .into_iter()
                            .map(|tick| view! {
                                <div class=format!("grm-tick {}", tick.tone.map_or("", |t| t.css_class()))
                                    style=format!("bottom:{:.2}%", tick.percent)>
                                    <span class="grm-label">{tick.label}</span>
                                </div>
                            })
                            .collect_view()
                    }}
                </div>
                <div class="grm-cards">
                    {move || {
                        layout
                            .get()
                            .items
                            .into_iter()
                            .map(|th| {
                                let id = th.id.clone();
                                let toggle_id = id.clone();
                                let key_id = id.clone();
                                let is_open = move || open.with(|o| o.as_deref() == Some(id.as_str()));
                                let color = th.tone.color();
                                let popover = th.clone();
                                view! {
                                    <div class="grm-card panel soft">
                                        <div
                                            class="grm-svg-wrap"
                                            role="button"
                                            tabindex="0"
                                            aria-haspopup="dialog"
                                            aria-label=format!("Open breakdown for {}", th.name)
                                            on:click=move |_| {
                                                let id = toggle_id.clone();
                                                open.update(|o| *o = if o.as_deref() == Some(id.as_str()) { None } else { Some(id) });
                                            }
                                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                                match ev.key().as_str() {
                                                    "Enter" | " " => {
                                                        ev.prevent_default();
                                                        let id = key_id.clone();
                                                        open.update(|o| *o = if o.as_deref() == Some(id.as_str()) { None } else { Some(id) });
                                                    }
                                                    "Escape" => open.set(None),
                                                    _ => {}
                                                }
                                            }
                                            on:mouseleave=move |_| open.set(None)
                                        >
                                            <svg viewBox="0 0 60 140" class="grm-svg" role="img"
                                                aria-label=format!("{} multiplier {}", th.name, th.multiplier_label)>
                                                <rect x="26" y=config.track_y width="8" height=config.track_h rx="4"
                                                    fill=colors::PANEL_SOFT stroke=colors::RING />
                                                <rect x="26" y=th.fill_y width="8" height=th.fill_h rx="4" fill=color />
                                                <circle cx="30" cy=bulb_y r="10" fill=color stroke=colors::RING />
                                            </svg>
                                            <Show when=is_open>
                                                <BreakdownPopover th=popover.clone() />
                                            </Show>
                                        </div>
                                        <div class="grm-meta">
                                            <div class="grm-name" title=th.name.clone()>{th.name.clone()}</div>
                                            <div class="grm-values caption">
                                                <strong class="grm-mult">{th.multiplier_label.clone()}</strong>
                                                <span>"Gov. rev: " {th.gov_revenue_label.clone()}</span>
                                                <span>"Bank: " {th.bank_label.clone()}</span>
                                            </div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn BreakdownPopover(th: Thermometer) -> impl IntoView {
    view! {
        <div class="popover" role="dialog" aria-label=format!("{} revenue breakdown", th.name)>
            <div class="popover-head">
                <strong>{th.name.clone()}</strong>
                <span class="tag">{th.period.clone().unwrap_or_default()}</span>
            </div>
            <div class="popover-body">
                <div class="kv"><span>"Multiplier"</span><strong>{format_multiplier(th.multiplier, 2)}</strong></div>
                <div class="kv"><span>"Gov. revenue"</span><strong>{th.gov_revenue_label.clone()}</strong></div>
                <div class="kv"><span>"Bank amount"</span><strong>{th.bank_label.clone()}</strong></div>
                {(!th.breakdown.is_empty()).then(|| view! { <hr /> })}
                {th
                    .breakdown
                    .iter()
                    .map(|row| view! {
                        <div class="kv">
                            <span>{row.label}</span>
                            <strong>{row.amount.clone()} " " <em class="muted">"(" {row.share.clone()} ")"</em></strong>
                        </div>
                    })
                    .collect_view()}
                {th.note.clone().map(|note| view! { <p class="caption">{note}</p> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lev(id: &str, bank: f64, other: f64) -> LeverageItem {
        LeverageItem {
            id: id.into(),
            name: id.to_uppercase(),
            bank_us: bank,
            other_us: other,
        }
    }

    #[test]
    fn test_leverage_scenario() {
        let l = layout_rings(&[lev("a", 120e6, 420e6)], &RingConfig::default());
        let r = &l.rings[0];
        assert!((r.leverage - 3.5).abs() < 1e-9);
        assert_eq!(r.tone, Tone::Caution);
        assert_eq!(r.tone.color(), colors::GOLD_500);
        assert_eq!(r.center_label, "3.5×");
        assert_eq!(r.caption, "Bank $120M • Other $420M");
        // max(4.95, 3.85) -> 5.0
        assert_eq!(l.scale_max, 5.0);
        assert!((r.outer.progress - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_scale_max_headroom() {
        let t = Thresholds::leverage();
        assert_eq!(ring_scale_max(std::iter::empty(), &t), 5.0);
        assert_eq!(ring_scale_max([6.0], &t), 7.0);
        assert_eq!(ring_scale_max([0.2], &t), 5.0);
    }

    #[test]
    fn test_zero_bank_ring() {
        let l = layout_rings(&[lev("z", 0.0, 50.0)], &RingConfig::default());
        let r = &l.rings[0];
        assert_eq!(r.leverage, 0.0);
        assert_eq!(r.tone, Tone::Warning);
        assert_eq!(r.outer.dash, 0.0);
        assert!(r.outer.gap > 0.0);
    }

    #[test]
    fn test_ring_arc_gap_floor() {
        let full = RingArc::new(32.0, 8.0, 3.0);
        assert_eq!(full.progress, 1.0);
        assert_eq!(full.gap, 0.0001);
        assert!((full.dash - TAU * 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_marks_on_ring() {
        let l = layout_rings(&[lev("a", 1.0, 1.0)], &RingConfig::default());
        assert_eq!(l.marks.len(), 2);
        for m in &l.marks {
            let r0 = (m.from.0.powi(2) + m.from.1.powi(2)).sqrt();
            let r1 = (m.to.0.powi(2) + m.to.1.powi(2)).sqrt();
            assert!((r0 - 28.0).abs() < 1e-9 && (r1 - 36.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_legend_bands() {
        let legend = tone_legend(&Thresholds::leverage());
        assert_eq!(legend[0].1, "≥ 4.5×");
        assert_eq!(legend[2].1, "< 3.0×");
    }

    fn gov(id: &str, bank: f64, rev: f64) -> GovRevItem {
        GovRevItem {
            id: id.into(),
            name: id.into(),
            bank_us: bank,
            gov_revenue_us: rev,
            breakdown: None,
        }
    }

    #[test]
    fn test_thermometer_fill() {
        let l = layout_thermometers(&[gov("a", 100.0, 300.0)], &ThermometerConfig::default());
        assert_eq!(l.max_value, 6.0);
        let th = &l.items[0];
        assert!((th.fill_percent - 50.0).abs() < 1e-9);
        assert!((th.fill_h - 56.0).abs() < 1e-9);
        assert!((th.fill_y - 68.0).abs() < 1e-9);
        assert_eq!(th.tone, Tone::Caution);
        assert!(th.breakdown.is_empty());
    }

    #[test]
    fn test_thermometer_scale_grows_with_data() {
        let l = layout_thermometers(
            &[gov("a", 100.0, 800.0), gov("b", 0.0, 50.0)],
            &ThermometerConfig::default(),
        );
        assert_eq!(l.max_value, 8.0);
        assert_eq!(l.items[0].fill_percent, 100.0);
        assert_eq!(l.items[1].multiplier, 0.0);
        assert_eq!(l.items[1].fill_h, 0.0);
        assert_eq!(l.ticks[0].percent, 25.0);
        assert_eq!(l.ticks[1].percent, 50.0);
    }

    #[test]
    fn test_thermometer_breakdown_rows() {
        let mut item = gov("ng", 100.0, 300.0);
        item.breakdown = Some(GovRevBreakdown {
            vat: Some(150.0),
            duties: Some(60.0),
            period: Some("FY2024".into()),
            ..Default::default()
        });
        let l = layout_thermometers(&[item], &ThermometerConfig::default());
        let rows = &l.items[0].breakdown;
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].share, "50%");
        assert_eq!(rows[1].share, "0%");
        assert_eq!(l.items[0].period.as_deref(), Some("FY2024"));
    }
}
