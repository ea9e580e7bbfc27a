//! Local content over time: a braided domestic/imported stream on wide
//! containers, 100% stacked share bars on narrow ones, plus a mini share
//! ribbon for cards.

use crate::{
    ChartDimensions, ChartMargin,
    chartkit::{LinearScale, Scale, TextAnchor, monotone_area_path, monotone_path},
    colors,
};
use impact_core::{LocalContentPoint, format_currency_compact};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Ribbon configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonConfig {
    pub height: f64,
    /// Below this width the ribbon switches to stacked bars
    pub stacked_below_width: f64,
    pub margin: ChartMargin,
    pub popover_width: f64,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            height: 180.0,
            stacked_below_width: 420.0,
            margin: ChartMargin::ribbon(),
            popover_width: 260.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RibbonMode {
    Stream,
    StackedBars,
}

impl RibbonMode {
    pub fn for_width(width: f64, stacked_below_width: f64) -> Self {
        if width < stacked_below_width {
            Self::StackedBars
        } else {
            Self::Stream
        }
    }
}

/// One 100% share bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareBar {
    pub x: f64,
    pub width: f64,
    pub domestic_y: f64,
    pub domestic_h: f64,
    pub imported_y: f64,
    pub imported_h: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub x: f64,
    pub text: String,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RibbonLayout {
    pub dims: ChartDimensions,
    pub mode: RibbonMode,
    pub bar_width: f64,
    /// Horizontal inset keeping bars and curve ends off the clip edge
    pub edge: f64,
    pub x: LinearScale,
    pub y: LinearScale,
    /// Sample x positions, inner coordinates
    pub xs: Vec<f64>,
    pub domestic_area: String,
    pub imported_area: String,
    pub split_line: String,
    pub bars: Vec<ShareBar>,
    pub labels: Vec<AxisLabel>,
    pub last_domestic_percent: u32,
    pub last_imported_percent: u32,
}

impl RibbonLayout {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index of the sample closest to `px` (inner coordinates)
    pub fn nearest_index(&self, px: f64) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        let v = self.x.invert(px).round();
        if !v.is_finite() {
            return Some(0);
        }
        Some(v.clamp(0.0, (n - 1) as f64) as usize)
    }

    /// Popover left offset for sample `i`, relative to the chart wrapper
    pub fn popover_left(&self, i: usize, popover_width: f64) -> f64 {
        let x = self.xs.get(i).copied().unwrap_or(0.0);
        (self.dims.margin.left + x + 8.0)
            .min(self.dims.width - popover_width)
            .max(6.0)
    }
}

fn round_percent(share: f64) -> u32 {
    (share * 100.0).round().clamp(0.0, 100.0) as u32
}

/// First, middle and last time labels
fn axis_labels(points: &[LocalContentPoint], xs: &[f64]) -> Vec<AxisLabel> {
    let n = points.len();
    let label = |i: usize, anchor| AxisLabel {
        x: xs[i],
        text: points[i].t.to_string(),
        anchor,
    };
    match n {
        0 => Vec::new(),
        1 => vec![label(0, TextAnchor::Middle)],
        2 => vec![label(0, TextAnchor::Start), label(1, TextAnchor::End)],
        _ => vec![
            label(0, TextAnchor::Start),
            label((n - 1) / 2, TextAnchor::Middle),
            label(n - 1, TextAnchor::End),
        ],
    }
}

/// Lay out the ribbon at the observed `width`
pub fn layout_ribbon(points: &[LocalContentPoint], width: f64, config: &RibbonConfig) -> RibbonLayout {
    let dims = ChartDimensions::new(width, config.height).with_margin(config.margin);
    let inner_w = dims.inner_width();
    let inner_h = dims.inner_height();
    let n = points.len();
    let mode = RibbonMode::for_width(width, config.stacked_below_width);

    let bar_width = (inner_w / (n as f64 * 1.4).max(6.0)).max(6.0);
    let edge = bar_width / 2.0 + 2.0;

    let x = LinearScale::new()
        .domain(0.0, n.saturating_sub(1) as f64)
        .range(edge, inner_w - edge);
    let max_total = points
        .iter()
        .map(LocalContentPoint::total)
        .filter(|t| t.is_finite())
        .fold(0.0, f64::max);
    let y = LinearScale::new()
        .domain(0.0, max_total)
        .nice(10)
        .range(inner_h, 0.0);

    let xs: Vec<f64> = (0..n).map(|i| x.scale(i as f64)).collect();

    let (domestic_area, imported_area, split_line, bars) = match mode {
        RibbonMode::Stream => {
            let baseline: Vec<(f64, f64)> = xs.iter().map(|&px| (px, y.scale(0.0))).collect();
            let domestic: Vec<(f64, f64)> = xs
                .iter()
                .zip(points)
                .map(|(&px, p)| (px, y.scale(p.domestic_us)))
                .collect();
            let stacked: Vec<(f64, f64)> = xs
                .iter()
                .zip(points)
                .map(|(&px, p)| (px, y.scale(p.total())))
                .collect();
            (
                monotone_area_path(&domestic, &baseline),
                monotone_area_path(&stacked, &domestic),
                monotone_path(&domestic),
                Vec::new(),
            )
        }
        RibbonMode::StackedBars => {
            let bars = xs
                .iter()
                .zip(points)
                .map(|(&px, p)| {
                    let (domestic_h, imported_h) = if p.total() > 0.0 {
                        let h = p.domestic_share() * inner_h;
                        (h, inner_h - h)
                    } else {
                        (0.0, 0.0)
                    };
                    ShareBar {
                        x: px - bar_width / 2.0,
                        width: bar_width,
                        domestic_y: inner_h - domestic_h,
                        domestic_h,
                        imported_y: inner_h - domestic_h - imported_h,
                        imported_h,
                    }
                })
                .collect();
            (String::new(), String::new(), String::new(), bars)
        }
    };

    let last_share = points.last().map_or(0.0, LocalContentPoint::domestic_share);

    tracing::debug!(width, ?mode, points = n, "ribbon layout");

    RibbonLayout {
        dims,
        mode,
        bar_width,
        edge,
        labels: axis_labels(points, &xs),
        x,
        y,
        xs,
        domestic_area,
        imported_area,
        split_line,
        bars,
        last_domestic_percent: round_percent(last_share),
        last_imported_percent: round_percent(1.0 - last_share),
    }
}

// ============================================================================
// MINI VARIANT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniRibbonConfig {
    pub height: f64,
    pub pad_x: f64,
    /// Space reserved for the title row
    pub title_row: f64,
}

impl Default for MiniRibbonConfig {
    fn default() -> Self {
        Self {
            height: 64.0,
            pad_x: 6.0,
            title_row: 22.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MiniRibbonLayout {
    pub inner_w: f64,
    pub inner_h: f64,
    pub domestic_area: String,
    pub imported_area: String,
    pub last_domestic_percent: u32,
    pub last_imported_percent: u32,
}

/// 100% domestic-share ribbon
pub fn layout_mini_ribbon(
    points: &[LocalContentPoint],
    width: f64,
    config: &MiniRibbonConfig,
) -> MiniRibbonLayout {
    let inner_w = (width - config.pad_x * 2.0).max(0.0);
    let inner_h = (config.height - config.title_row).max(0.0);
    let n = points.len();

    let x = LinearScale::new()
        .domain(0.0, n.saturating_sub(1) as f64)
        .range(0.0, inner_w);
    let y = LinearScale::new().domain(0.0, 1.0).range(inner_h, 0.0);

    let share_line: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (x.scale(i as f64), y.scale(p.domestic_share())))
        .collect();
    let baseline: Vec<(f64, f64)> = share_line.iter().map(|&(px, _)| (px, y.scale(0.0))).collect();
    let ceiling: Vec<(f64, f64)> = share_line.iter().map(|&(px, _)| (px, y.scale(1.0))).collect();

    let last_share = points.last().map_or(0.0, LocalContentPoint::domestic_share);

    MiniRibbonLayout {
        inner_w,
        inner_h,
        domestic_area: monotone_area_path(&share_line, &baseline),
        imported_area: monotone_area_path(&ceiling, &share_line),
        last_domestic_percent: round_percent(last_share),
        last_imported_percent: round_percent(1.0 - last_share),
    }
}

// ============================================================================
// COMPONENTS
// ============================================================================

#[component]
fn ShareChips(domestic: u32, imported: u32) -> impl IntoView {
    view! {
        <div class="legend-col caption" aria-label="Latest shares">
            <span class="legend-chip"><i class="legend-dot domestic" />{format!(" {domestic}%")}</span>
            <span class="legend-chip"><i class="legend-dot imported" />{format!(" {imported}%")}</span>
        </div>
    }
}

/// Domestic vs imported inputs over time
#[component]
pub fn LocalContentRibbon(
    #[prop(into)] points: Signal<Vec<LocalContentPoint>>,
    #[prop(into)] width: Signal<f64>,
    #[prop(optional)] config: Option<RibbonConfig>,
    #[prop(optional, into)] aria_label: Option<String>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let aria_label = aria_label.unwrap_or_else(|| "Domestic vs Imported inputs over time".into());
    let layout = Memo::new(move |_| points.with(|p| layout_ribbon(p, width.get(), &config)));
    let hover = RwSignal::new(None::<usize>);

    let on_move = move |ev: web_sys::MouseEvent| {
        let Some(rect) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(|el| el.get_bounding_client_rect())
        else {
            return;
        };
        let px = f64::from(ev.client_x()) - rect.left();
        let next = layout.with(|l| l.nearest_index(px));
        if hover.get_untracked() != next {
            hover.set(next);
        }
    };

    view! {
        <div class="legend legend-split">
            <div class="legend-col" aria-label="Series">
                <span class="legend-chip"><i class="legend-dot domestic" />" Domestic"</span>
                <span class="legend-chip"><i class="legend-dot imported" />" Imported"</span>
            </div>
            {move || layout.with(|l| view! {
                <ShareChips domestic=l.last_domestic_percent imported=l.last_imported_percent />
            })}
        </div>

        <div role="figure" aria-label=aria_label class="ribbon-figure">
            <div class="chart-clip">
                {move || {
                    let l = layout.get();
                    let inner_w = l.dims.inner_width();
                    let inner_h = l.dims.inner_height();
                    let (xs, y) = (l.xs.clone(), l.y.clone());
                    let body = match l.mode {
                        RibbonMode::Stream => view! {
                            <path d=l.imported_area.clone() fill=colors::GOLD_500 opacity="0.65" />
                            <path d=l.domestic_area.clone() fill=colors::TEAL_700 opacity="0.85" />
                            <path d=l.split_line.clone() fill="none" stroke=colors::SPLIT_LINE stroke-width="1.5" />
                        }
                        .into_any(),
                        RibbonMode::StackedBars => l
                            .bars
                            .iter()
                            .map(|b| view! {
                                <g>
                                    <rect x=b.x y=b.domestic_y width=b.width height=b.domestic_h
                                        fill=colors::TEAL_700 opacity="0.85" />
                                    <rect x=b.x y=b.imported_y width=b.width height=b.imported_h
                                        fill=colors::GOLD_500 opacity="0.65" />
                                </g>
                            })
                            .collect_view()
                            .into_any(),
                    };
                    view! {
                        <svg width=l.dims.width height=l.dims.height>
                            <g transform=l.dims.inner_transform()>
                                {body}
                                <g transform=format!("translate(0, {})", inner_h + 16.0) class="caption" aria-hidden="true">
                                    {l.labels
                                        .iter()
                                        .map(|a| view! { <text x=a.x text-anchor=a.anchor.as_str()>{a.text.clone()}</text> })
                                        .collect_view()}
                                </g>
                                <rect x="0" y="0" width=inner_w height=inner_h fill="transparent"
                                    on:mousemove=on_move
                                    on:mouseleave=move |_| hover.set(None) />
                                {move || hover.get().and_then(|i| {
                                    let px = xs.get(i).copied()?;
                                    let dot_y = points.with(|p| p.get(i).map(|p| y.scale(p.domestic_us)))?;
                                    Some(view! {
                                        <g transform=format!("translate({px},0)") pointer-events="none">
                                            <line y1="0" y2=inner_h stroke=colors::RING />
                                            <circle cy=dot_y r="3.5" fill=colors::INK />
                                        </g>
                                    })
                                })}
                            </g>
                        </svg>
                    }
                }}
            </div>
            {move || hover.get().and_then(|i| {
                let p = points.with(|p| p.get(i).cloned())?;
                let left = layout.with(|l| l.popover_left(i, config.popover_width));
                Some(view! {
                    <div class="popover" style=format!("left:{left}px;top:6px")>
                        <div class="caption"><strong>{p.t.to_string()}</strong></div>
                        <div class="hstack wrap">
                            <span class="legend-chip">
                                <i class="legend-dot domestic" />" " {format_currency_compact(p.domestic_us)}
                            </span>
                            <span class="legend-chip">
                                <i class="legend-dot imported" />" " {format_currency_compact(p.imported_us)}
                            </span>
                        </div>
                        <div class="caption">
                            "Domestic share: " <strong>{format!("{}%", round_percent(p.domestic_share()))}</strong>
                        </div>
                    </div>
                })
            })}
        </div>
    }
}

/// Compact 100% share ribbon with last-value chips
#[component]
pub fn LocalContentMini(
    #[prop(into)] points: Signal<Vec<LocalContentPoint>>,
    #[prop(into)] width: Signal<f64>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional)] config: Option<MiniRibbonConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let title = title.unwrap_or_else(|| "Local content (share)".into());
    let layout = Memo::new(move |_| points.with(|p| layout_mini_ribbon(p, width.get(), &config)));

    view! {
        <div class="hstack spread">
            <div class="caption">{title}</div>
            {move || layout.with(|l| view! {
                <ShareChips domestic=l.last_domestic_percent imported=l.last_imported_percent />
            })}
        </div>
        <div class="chart-clip" style=format!("margin-inline:{}px", config.pad_x)>
            {move || {
                let l = layout.get();
                view! {
                    <svg width=l.inner_w height=l.inner_h preserveAspectRatio="none">
                        <path d=l.imported_area.clone() fill=colors::GOLD_500 opacity="0.65" />
                        <path d=l.domestic_area.clone() fill=colors::TEAL_700 opacity="0.85" />
                    </svg>
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::TimeLabel;
    use proptest::prelude::*;

    fn point(year: i64, domestic: f64, imported: f64) -> LocalContentPoint {
        LocalContentPoint {
            t: TimeLabel::Year(year),
            domestic_us: domestic,
            imported_us: imported,
        }
    }

    fn series() -> Vec<LocalContentPoint> {
        vec![
            point(2019, 40.0, 60.0),
            point(2020, 45.0, 55.0),
            point(2021, 52.0, 58.0),
            point(2022, 60.0, 50.0),
            point(2023, 66.0, 44.0),
            point(2024, 72.0, 40.0),
        ]
    }

    #[test]
    fn test_mode_switch() {
        let cfg = RibbonConfig::default();
        assert_eq!(layout_ribbon(&series(), 600.0, &cfg).mode, RibbonMode::Stream);
        assert_eq!(layout_ribbon(&series(), 420.0, &cfg).mode, RibbonMode::Stream);
        assert_eq!(layout_ribbon(&series(), 419.0, &cfg).mode, RibbonMode::StackedBars);
    }

    #[test]
    fn test_edge_padding() {
        let l = layout_ribbon(&series(), 600.0, &RibbonConfig::default());
        // inner 580, n*1.4 = 8.4 → 580/8.4
        let bw = 580.0 / 8.4;
        assert!((l.bar_width - bw).abs() < 1e-9);
        assert!((l.edge - (bw / 2.0 + 2.0)).abs() < 1e-9);
        assert!((l.xs[0] - l.edge).abs() < 1e-9);
        assert!((l.xs[5] - (580.0 - l.edge)).abs() < 1e-9);

        let narrow = layout_ribbon(&series(), 240.0, &RibbonConfig::default());
        for b in &narrow.bars {
            assert!(b.x >= 2.0 - 1e-9);
            assert!(b.x + b.width <= narrow.dims.inner_width() - 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_minimum_bar_width() {
        let many: Vec<_> = (0..200).map(|i| point(1900 + i, 1.0, 1.0)).collect();
        let l = layout_ribbon(&many, 300.0, &RibbonConfig::default());
        assert_eq!(l.bar_width, 6.0);
        assert_eq!(l.edge, 5.0);
    }

    #[test]
    fn test_y_domain_is_nice() {
        let l = layout_ribbon(&series(), 600.0, &RibbonConfig::default());
        assert_eq!(l.y.domain_bounds(), (0.0, 120.0));
        assert_eq!(l.y.range_bounds(), (148.0, 0.0));
    }

    #[test]
    fn test_stream_paths_present() {
        let l = layout_ribbon(&series(), 600.0, &RibbonConfig::default());
        assert!(l.domestic_area.starts_with('M') && l.domestic_area.ends_with('Z'));
        assert!(l.imported_area.ends_with('Z'));
        assert!(!l.split_line.is_empty());
        assert!(l.bars.is_empty());
    }

    #[test]
    fn test_share_bars_fill_height() {
        let mut pts = series();
        pts.push(point(2025, 0.0, 0.0));
        let l = layout_ribbon(&pts, 300.0, &RibbonConfig::default());
        let h = l.dims.inner_height();
        let first = l.bars[0];
        assert!((first.domestic_h - 0.4 * h).abs() < 1e-9);
        assert!((first.domestic_h + first.imported_h - h).abs() < 1e-9);
        assert!((first.imported_y).abs() < 1e-9);

        let empty = l.bars[6];
        assert_eq!((empty.domestic_h, empty.imported_h), (0.0, 0.0));
    }

    #[test]
    fn test_axis_labels() {
        let l = layout_ribbon(&series(), 600.0, &RibbonConfig::default());
        let text: Vec<&str> = l.labels.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(text, vec!["2019", "2021", "2024"]);
        assert_eq!(l.labels[1].anchor, TextAnchor::Middle);

        let one = layout_ribbon(&series()[..1], 600.0, &RibbonConfig::default());
        assert_eq!(one.labels.len(), 1);
        assert!(layout_ribbon(&[], 600.0, &RibbonConfig::default()).labels.is_empty());
    }

    #[test]
    fn test_last_shares() {
        let l = layout_ribbon(&series(), 600.0, &RibbonConfig::default());
        assert_eq!((l.last_domestic_percent, l.last_imported_percent), (64, 36));

        let e = layout_ribbon(&[], 600.0, &RibbonConfig::default());
        assert_eq!((e.last_domestic_percent, e.last_imported_percent), (0, 100));
    }

    #[test]
    fn test_nearest_index() {
        let l = layout_ribbon(&series(), 600.0, &RibbonConfig::default());
        assert_eq!(l.nearest_index(-50.0), Some(0));
        assert_eq!(l.nearest_index(10_000.0), Some(5));
        assert_eq!(l.nearest_index(l.xs[3] + 1.0), Some(3));
        assert_eq!(l.nearest_index(f64::NAN), Some(0));

        let empty = layout_ribbon(&[], 600.0, &RibbonConfig::default());
        assert_eq!(empty.nearest_index(20.0), None);
    }

    #[test]
    fn test_popover_clamped() {
        let l = layout_ribbon(&series(), 600.0, &RibbonConfig::default());
        assert_eq!(l.popover_left(5, 260.0), 340.0);
        assert!((l.popover_left(0, 260.0) - (10.0 + l.xs[0] + 8.0)).abs() < 1e-9);

        let tiny = layout_ribbon(&series(), 220.0, &RibbonConfig::default());
        assert_eq!(tiny.popover_left(5, 260.0), 6.0);
    }

    #[test]
    fn test_single_point_is_centered() {
        let l = layout_ribbon(&series()[..1], 600.0, &RibbonConfig::default());
        assert!((l.xs[0] - 290.0).abs() < 1e-9);
    }

    #[test]
    fn test_mini_ribbon() {
        let m = layout_mini_ribbon(&series(), 240.0, &MiniRibbonConfig::default());
        assert_eq!((m.inner_w, m.inner_h), (228.0, 42.0));
        assert_eq!(m.last_domestic_percent, 64);
        assert!(m.domestic_area.ends_with('Z'));
        assert!(m.imported_area.ends_with('Z'));

        let e = layout_mini_ribbon(&[], 240.0, &MiniRibbonConfig::default());
        assert!(e.domestic_area.is_empty());
    }

    proptest! {
        #[test]
        fn prop_nearest_index_in_bounds(
            n in 1usize..40,
            width in 0.0f64..1600.0,
            px in -2000.0f64..4000.0,
        ) {
            let pts: Vec<_> = (0..n).map(|i| point(2000 + i as i64, i as f64, 1.0)).collect();
            let l = layout_ribbon(&pts, width, &RibbonConfig::default());
            let i = l.nearest_index(px);
            prop_assert!(matches!(i, Some(i) if i < n));
        }

        #[test]
        fn prop_layout_deterministic(width in 0.0f64..1600.0) {
            let a = layout_ribbon(&series(), width, &RibbonConfig::default());
            let b = layout_ribbon(&series(), width, &RibbonConfig::default());
            prop_assert_eq!(a, b);
        }
    }
}
