//! Inclusive jobs butterfly: women left (or up), men right (or down), youth
//! as a band centred on the axis

use crate::{
    chartkit::{LinearScale, Scale, TextAnchor},
    colors,
};
use impact_core::{JobsByDemoItem, format_thousands};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButterflySort {
    #[default]
    Total,
    WomenShare,
    YouthShare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterflyConfig {
    /// Below this width the mirror turns vertical
    pub vertical_below: f64,
    pub max_width: f64,
    /// Card padding subtracted from the observed width
    pub inset: f64,
    pub sort: ButterflySort,
}

impl Default for ButterflyConfig {
    fn default() -> Self {
        Self {
            vertical_below: 420.0,
            max_width: 420.0,
            inset: 24.0,
            sort: ButterflySort::Total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: TextAnchor,
}

/// Centre axis segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButterflyCard {
    pub scope_id: String,
    pub scope_name: String,
    pub period: Option<String>,
    pub women: BarRect,
    pub men: BarRect,
    pub youth: BarRect,
    pub women_label: BarLabel,
    pub men_label: BarLabel,
    pub youth_label: BarLabel,
    pub women_tip: String,
    pub men_tip: String,
    pub youth_tip: String,
    pub total: String,
    pub women_count: String,
    pub youth_count: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButterflyLayout {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
    pub thickness: f64,
    pub axis: Axis,
    pub cards: Vec<ButterflyCard>,
}

fn percent_label(share: f64) -> String {
    format!("{}%", (share * 100.0).round())
}

/// Items in display order
pub fn sort_jobs(items: &[JobsByDemoItem], sort: ButterflySort) -> Vec<JobsByDemoItem> {
    let mut sorted = items.to_vec();
    let key = |d: &JobsByDemoItem| match sort {
        ButterflySort::Total => d.total,
        ButterflySort::WomenShare => d.women_share(),
        ButterflySort::YouthShare => d.youth_share(),
    };
    sorted.sort_by(|a, b| key(b).total_cmp(&key(a)));
    sorted
}

pub fn layout_butterfly(items: &[JobsByDemoItem], width: f64, config: &ButterflyConfig) -> ButterflyLayout {
    let orientation = if width < config.vertical_below {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let vertical = orientation == Orientation::Vertical;

    let w = config.max_width.min(width - config.inset).max(0.0);
    let h: f64 = if vertical { 120.0 } else { 72.0 };
    let t: f64 = if vertical { 20.0 } else { 16.0 };
    let (cx, cy) = (w / 2.0, h / 2.0);

    // a full share fills one side, so bar length stays proportional above 50%
    let x = LinearScale::new()
        .domain(0.0, 1.0)
        .range(0.0, ((w - 80.0) / 2.0).max(0.0))
        .clamp(true);
    let y = LinearScale::new()
        .domain(0.0, 1.0)
        .range(0.0, ((h - 40.0) / 2.0).max(0.0))
        .clamp(true);

    let axis = if vertical {
        Axis { x1: cx - 30.0, y1: cy, x2: cx + 30.0, y2: cy }
    } else {
        Axis { x1: cx, y1: cy - 26.0, x2: cx, y2: cy + 26.0 }
    };

    let cards = sort_jobs(items, config.sort)
        .into_iter()
        .map(|d| {
            let women_share = d.women_share();
            let men_share = d.men_share();
            let youth = d.youth_share().min(1.0);
            let (wl, ml, yl) = (
                percent_label(women_share),
                percent_label(men_share),
                percent_label(youth),
            );

            let (women, men, youth_band, women_label, men_label, youth_label) = if vertical {
                let hw = y.scale(women_share);
                let hm = y.scale(men_share);
                let band = y.scale(youth / 2.0);
                (
                    BarRect { x: (w - t) / 2.0, y: cy - hw, width: t, height: hw },
                    BarRect { x: (w - t) / 2.0, y: cy, width: t, height: hm },
                    BarRect { x: (w - (t + 8.0)) / 2.0, y: cy - band, width: t + 8.0, height: band * 2.0 },
                    BarLabel { x: cx - t - 6.0, y: cy - hw - 4.0, text: wl.clone(), anchor: TextAnchor::End },
                    BarLabel { x: cx - t - 6.0, y: cy + hm + 12.0, text: ml.clone(), anchor: TextAnchor::End },
                    BarLabel { x: cx, y: cy - band - 6.0, text: format!("Youth {yl}"), anchor: TextAnchor::Middle },
                )
            } else {
                let wl_px = x.scale(women_share);
                let wr_px = x.scale(men_share);
                let band = x.scale(youth / 2.0);
                (
                    BarRect { x: cx - wl_px, y: (h - t) / 2.0, width: wl_px, height: t },
                    BarRect { x: cx, y: (h - t) / 2.0, width: wr_px, height: t },
                    BarRect { x: cx - band, y: (h - (t + 8.0)) / 2.0, width: band * 2.0, height: t + 8.0 },
                    BarLabel { x: cx - wl_px - 4.0, y: cy + 4.0, text: wl.clone(), anchor: TextAnchor::End },
                    BarLabel { x: cx + wr_px + 4.0, y: cy + 4.0, text: ml.clone(), anchor: TextAnchor::Start },
                    BarLabel { x: cx, y: cy - t - 6.0, text: format!("Youth {yl}"), anchor: TextAnchor::Middle },
                )
            };

            let total = format_thousands(d.total);
            ButterflyCard {
                women_tip: format!(
                    "{} — Women: {} ({}) of {} jobs",
                    d.scope_name,
                    format_thousands(d.women),
                    wl,
                    total
                ),
                men_tip: format!(
                    "{} — Men: {} ({}) of {} jobs",
                    d.scope_name,
                    format_thousands(d.men()),
                    ml,
                    total
                ),
                youth_tip: format!(
                    "{} — Youth (18–35): {} ({}) of {} jobs",
                    d.scope_name,
                    format_thousands(d.youth),
                    yl,
                    total
                ),
                women_count: format_thousands(d.women),
                youth_count: format_thousands(d.youth),
                total,
                scope_id: d.scope_id,
                scope_name: d.scope_name,
                period: d.period,
                women,
                men,
                youth: youth_band,
                women_label,
                men_label,
                youth_label,
            }
        })
        .collect();

    tracing::debug!(width, ?orientation, "butterfly layout");

    ButterflyLayout {
        width: w,
        height: h,
        orientation,
        thickness: t,
        axis,
        cards,
    }
}

#[component]
pub fn JobsButterfly(
    #[prop(into)] items: Signal<Vec<JobsByDemoItem>>,
    #[prop(into)] width: Signal<f64>,
    #[prop(optional)] config: Option<ButterflyConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let sort = RwSignal::new(config.sort);
    let layout = Memo::new(move |_| {
        let cfg = ButterflyConfig {
            sort: sort.get(),
            ..config
        };
        items.with(|i| layout_butterfly(i, width.get(), &cfg))
    });

    let sort_button = move |value: ButterflySort, label: &'static str| {
        view! {
            <button
                class="badge"
                aria-pressed=move || (sort.get() == value).to_string()
                on:click=move |_| sort.set(value)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="legend" aria-label="Legend: Women vs Men with Youth overlay">
            <div class="legend-col">
                <span class="legend-chip">
                    <i class="legend-dot jobs" style=format!("background:{}", colors::ACCENT_3) />" Women"
                </span>
                <span class="legend-chip">
                    <i class="legend-dot jobs" style=format!("background:{}", colors::ACCENT_4) />" Men"
                </span>
                <span class="legend-chip">
                    <i class="legend-dot jobs youth" style=format!("background:{}", colors::TEAL_300) />
                    " Youth (18–35) overlay"
                </span>
            </div>
            <div class="legend-col" role="group" aria-label="Sort by">
                {sort_button(ButterflySort::Total, "Total")}
                {sort_button(ButterflySort::WomenShare, "Women share")}
                {sort_button(ButterflySort::YouthShare, "Youth share")}
            </div>
        </div>

        <div class="bfly-grid">
            {move || {
                let l = layout.get();
                let (w, h) = (l.width, l.height);
                let a = l.axis;
                let suffix = match l.orientation {
                    Orientation::Horizontal => "",
                    Orientation::Vertical => " (vertical)",
                };
                l.cards
                    .into_iter()
                    .map(|c| {
                        let label = |b: &BarLabel| view! {
                            <text x=b.x y=b.y text-anchor=b.anchor.as_str() class="caption">{b.text.clone()}</text>
                        };
                        view! {
                            <div class="bfly-card panel">
                                <div class="card-head">
                                    <h4 class="card-title">{c.scope_name.clone()}</h4>
                                    {c.period.clone().map(|p| view! { <span class="badge">{p}</span> })}
                                </div>
                                <svg viewBox=format!("0 0 {w} {h}") width="100%" height=h role="img"
                                    aria-label=format!("Women vs Men with Youth overlay for {}{}", c.scope_name, suffix)>
                                    <line x1=a.x1 y1=a.y1 x2=a.x2 y2=a.y2 stroke=colors::RING />
                                    <rect x=c.women.x y=c.women.y width=c.women.width height=c.women.height
                                        fill=colors::ACCENT_3 rx="3">
                                        <title>{c.women_tip.clone()}</title>
                                    </rect>
                                    <rect x=c.men.x y=c.men.y width=c.men.width height=c.men.height
                                        fill=colors::ACCENT_4 rx="3">
                                        <title>{c.men_tip.clone()}</title>
                                    </rect>
                                    <rect x=c.youth.x y=c.youth.y width=c.youth.width height=c.youth.height
                                        fill=colors::TEAL_300 opacity="0.35" stroke=colors::TEAL_700
                                        stroke-dasharray="3,3" rx="4">
                                        <title>{c.youth_tip.clone()}</title>
                                    </rect>
                                    {label(&c.women_label)}
                                    {label(&c.men_label)}
                                    {label(&c.youth_label)}
                                </svg>
                                <div class="grid cols-3 bfly-footer">
                                    <div class="caption"><strong>"Total"</strong><br />{c.total.clone()}</div>
                                    <div class="caption"><strong>"Women"</strong><br />{c.women_count.clone()}</div>
                                    <div class="caption"><strong>"Youth"</strong><br />{c.youth_count.clone()}</div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: &str, total: f64, women: f64, youth: f64) -> JobsByDemoItem {
        JobsByDemoItem {
            scope_id: id.into(),
            scope_name: id.to_uppercase(),
            total,
            women,
            youth,
            period: None,
        }
    }

    fn sample() -> Vec<JobsByDemoItem> {
        vec![
            item("agri", 12_000.0, 5_400.0, 6_000.0),
            item("mfg", 20_000.0, 6_000.0, 5_000.0),
            item("ict", 4_000.0, 2_400.0, 3_200.0),
        ]
    }

    #[test]
    fn test_orientation_switch() {
        let cfg = ButterflyConfig::default();
        let h = layout_butterfly(&sample(), 600.0, &cfg);
        assert_eq!(h.orientation, Orientation::Horizontal);
        assert_eq!((h.width, h.height, h.thickness), (420.0, 72.0, 16.0));

        let v = layout_butterfly(&sample(), 300.0, &cfg);
        assert_eq!(v.orientation, Orientation::Vertical);
        assert_eq!((v.width, v.height, v.thickness), (276.0, 120.0, 20.0));
    }

    #[test]
    fn test_sort_modes() {
        let ids = |s| {
            sort_jobs(&sample(), s)
                .into_iter()
                .map(|d| d.scope_id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(ButterflySort::Total), vec!["mfg", "agri", "ict"]);
        assert_eq!(ids(ButterflySort::WomenShare), vec!["ict", "agri", "mfg"]);
        assert_eq!(ids(ButterflySort::YouthShare), vec!["ict", "agri", "mfg"]);
    }

    #[test]
    fn test_horizontal_geometry() {
        let l = layout_butterfly(&sample(), 600.0, &ButterflyConfig::default());
        let agri = l.cards.iter().find(|c| c.scope_id == "agri").unwrap();
        // half span (420 - 80)/2 = 170 for a full share
        assert!((agri.women.width - 0.45 * 170.0).abs() < 1e-9);
        assert!((agri.men.width - 0.55 * 170.0).abs() < 1e-9);
        assert!((agri.women.x + agri.women.width - 210.0).abs() < 1e-9);
        assert_eq!(agri.men.x, 210.0);
        assert_eq!(agri.women_label.text, "45%");
        assert_eq!(agri.men_label.text, "55%");
        assert_eq!(agri.youth_label.text, "Youth 50%");
    }

    #[test]
    fn test_majority_shares_stay_distinct() {
        let scopes = [
            item("half", 100.0, 50.0, 0.0),
            item("most", 100.0, 70.0, 0.0),
            item("nearly", 100.0, 95.0, 0.0),
        ];
        for width in [300.0, 800.0] {
            let l = layout_butterfly(&scopes, width, &ButterflyConfig::default());
            let size = |id: &str| {
                let c = l.cards.iter().find(|c| c.scope_id == id).unwrap();
                match l.orientation {
                    Orientation::Horizontal => c.women.width,
                    Orientation::Vertical => c.women.height,
                }
            };
            assert!(size("half") < size("most"), "70% outgrows 50% at {width}");
            assert!(size("most") < size("nearly"), "95% outgrows 70% at {width}");
        }

        let l = layout_butterfly(&scopes, 800.0, &ButterflyConfig::default());
        let nearly = l.cards.iter().find(|c| c.scope_id == "nearly").unwrap();
        assert!((nearly.women.width - 0.95 * 170.0).abs() < 1e-9);
        assert!((nearly.men.width - 0.05 * 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_youth_band_symmetric() {
        for width in [300.0, 600.0] {
            let l = layout_butterfly(&sample(), width, &ButterflyConfig::default());
            for c in &l.cards {
                match l.orientation {
                    Orientation::Horizontal => {
                        let mid = c.youth.x + c.youth.width / 2.0;
                        assert!((mid - l.width / 2.0).abs() < 1e-9);
                    }
                    Orientation::Vertical => {
                        let mid = c.youth.y + c.youth.height / 2.0;
                        assert!((mid - l.height / 2.0).abs() < 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_total_guard() {
        let l = layout_butterfly(&[item("none", 0.0, 0.0, 0.0)], 600.0, &ButterflyConfig::default());
        let c = &l.cards[0];
        assert_eq!((c.women.width, c.men.width, c.youth.width), (0.0, 0.0, 0.0));
        assert_eq!(c.women_label.text, "0%");
    }

    #[test]
    fn test_tooltips() {
        let l = layout_butterfly(&sample(), 600.0, &ButterflyConfig::default());
        let mfg = &l.cards[0];
        assert_eq!(mfg.women_tip, "MFG — Women: 6,000 (30%) of 20,000 jobs");
        assert_eq!(mfg.men_tip, "MFG — Men: 14,000 (70%) of 20,000 jobs");
    }

    proptest! {
        #[test]
        fn prop_bars_within_half_span(
            total in 0.0f64..1e6,
            women_ratio in 0.0f64..1.0,
            youth_ratio in 0.0f64..1.5,
            width in 220.0f64..1200.0,
        ) {
            let d = item("x", total, total * women_ratio, total * youth_ratio);
            let l = layout_butterfly(&[d], width, &ButterflyConfig::default());
            let c = &l.cards[0];
            match l.orientation {
                Orientation::Horizontal => {
                    let half = ((l.width - 80.0) / 2.0).max(0.0);
                    prop_assert!(c.women.width <= half + 1e-9);
                    prop_assert!(c.men.width <= half + 1e-9);
                }
                Orientation::Vertical => {
                    let half = (l.height - 40.0) / 2.0;
                    prop_assert!(c.women.height <= half + 1e-9);
                    prop_assert!(c.men.height <= half + 1e-9);
                }
            }
        }
    }
}
