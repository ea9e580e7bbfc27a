//! SME participation funnel: one bar per stage, conversion between stages,
//! women-led and youth-led overlay strips

use crate::{
    ChartMargin,
    chartkit::{LinearScale, Scale},
    colors,
};
use impact_core::{SmeFunnelItem, SmeStage, format_number_compact, format_thousands};
use leptos::prelude::*;

/// Funnel configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunnelConfig {
    pub margin: ChartMargin,
    pub bar_height: f64,
    pub gap: f64,
    /// Stage used for the SMEs-per-$1M micro-stat
    pub rate_stage: SmeStage,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            margin: ChartMargin::funnel(),
            bar_height: 26.0,
            gap: 14.0,
            rate_stage: SmeStage::Active,
        }
    }
}

const CHIP_PAD_X: f64 = 6.0;
const CHIP_HEIGHT: f64 = 22.0;

/// Rough caption width, used to size the value chip
pub fn estimate_text_width(label: &str) -> f64 {
    (label.chars().count() as f64 * 7.2).max(28.0)
}

/// Where the value label of a bar goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValuePlacement {
    /// Inside the bar on a chip; text is end-anchored at `text_x`
    Inside {
        chip_x: f64,
        chip_y: f64,
        chip_w: f64,
        chip_h: f64,
        text_x: f64,
    },
    /// Right of the bar end, start-anchored
    Outside { x: f64 },
}

/// Dashed line from the previous bar end to this one, shown on hover
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunnelBar {
    pub stage: SmeStage,
    pub y: f64,
    pub x0: f64,
    pub width: f64,
    pub total: f64,
    pub value_label: String,
    /// Percent of the previous stage, `None` for the first stage or a zero previous
    pub conversion: Option<u32>,
    pub women_width: Option<f64>,
    pub youth_width: Option<f64>,
    pub placement: ValuePlacement,
    pub connector: Option<Connector>,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunnelLayout {
    pub width: f64,
    pub height: f64,
    pub label_col_w: f64,
    pub bar_area_w: f64,
    pub bars: Vec<FunnelBar>,
}

/// Stages in canonical order; missing stages are skipped
pub fn canonical_stages(items: &[SmeFunnelItem]) -> Vec<&SmeFunnelItem> {
    SmeStage::all()
        .iter()
        .filter_map(|s| items.iter().find(|i| i.stage == *s))
        .collect()
}

/// Conversion between consecutive stages
pub fn conversion(prev_total: f64, total: f64) -> Option<u32> {
    if prev_total > 0.0 {
        let pct = (total / prev_total * 100.0).round();
        pct.is_finite().then(|| pct.max(0.0) as u32)
    } else {
        None
    }
}

fn tooltip(item: &SmeFunnelItem, conversion: Option<u32>) -> String {
    let mut text = format!("{} — {} SMEs", item.stage.label(), format_thousands(item.total));
    if let Some(c) = conversion {
        text.push_str(&format!(" • Conversion from previous: {}%", c));
    }
    if let Some(w) = item.women_led {
        text.push_str(&format!(" • Women-led: {}", format_thousands(w)));
    }
    if let Some(y) = item.youth_led {
        text.push_str(&format!(" • Youth-led: {}", format_thousands(y)));
    }
    text
}

pub fn layout_funnel(items: &[SmeFunnelItem], width: f64, config: &FunnelConfig) -> FunnelLayout {
    let stages = canonical_stages(items);
    let m = config.margin;
    let bar_h = config.bar_height;

    let inner_w = (width - m.left - m.right).max(0.0);
    let label_col_w = (inner_w * 0.22).max(80.0).min(140.0);
    let bar_area_w = (inner_w - label_col_w).max(0.0);
    let inner_h = (stages.len() as f64 * (bar_h + config.gap) - config.gap).max(0.0);

    let max_total = stages.iter().map(|s| s.total).fold(1.0_f64, f64::max);
    let x = LinearScale::new().domain(0.0, max_total).range(0.0, bar_area_w);
    let x0 = m.left + label_col_w;

    let mut bars = Vec::with_capacity(stages.len());
    for (i, item) in stages.iter().enumerate() {
        let y = m.top + i as f64 * (bar_h + config.gap);
        let mid_y = y + bar_h / 2.0;
        let w = x.scale(item.total);
        let prev = i.checked_sub(1).map(|p| stages[p]);
        let conv = prev.and_then(|p| conversion(p.total, item.total));
        let value_label = format_thousands(item.total);

        let placement = if i == 0 || w > bar_area_w - 56.0 {
            let chip_w = estimate_text_width(&value_label) + CHIP_PAD_X * 2.0;
            let chip_x = (x0 + 2.0).max(x0 + w - chip_w - 6.0);
            ValuePlacement::Inside {
                chip_x,
                chip_y: mid_y - CHIP_HEIGHT / 2.0,
                chip_w,
                chip_h: CHIP_HEIGHT,
                text_x: chip_x + chip_w - CHIP_PAD_X,
            }
        } else {
            ValuePlacement::Outside { x: x0 + w + 6.0 }
        };

        let connector = prev.map(|p| {
            let prev_w = x.scale(p.total);
            Connector {
                x1: x0 + prev_w.min(w),
                x2: x0 + prev_w.max(w),
                y: mid_y,
                label_x: x0 + prev_w.min(w) + 6.0,
                label_y: mid_y - 6.0,
                label: conv.map(|c| format!("→ {}%", c)).unwrap_or_default(),
            }
        });

        bars.push(FunnelBar {
            stage: item.stage,
            y,
            x0,
            width: w,
            total: item.total,
            value_label,
            conversion: conv,
            women_width: item.women_led_capped().map(|v| x.scale(v)),
            youth_width: item.youth_led_capped().map(|v| x.scale(v)),
            placement,
            connector,
            tooltip: tooltip(item, conv),
        });
    }

    tracing::debug!(width, stages = bars.len(), "funnel layout");

    FunnelLayout {
        width,
        height: inner_h + m.top + m.bottom,
        label_col_w,
        bar_area_w,
        bars,
    }
}

/// SME funnel with hover conversion
#[component]
pub fn SmeFunnel(
    #[prop(into)] items: Signal<Vec<SmeFunnelItem>>,
    #[prop(into)] width: Signal<f64>,
    /// SMEs per US$1M at the configured stage, computed by the host
    #[prop(into)]
    per_million: Signal<Option<f64>>,
    #[prop(optional)] config: Option<FunnelConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let layout = Memo::new(move |_| items.with(|i| layout_funnel(i, width.get(), &config)));
    let hover = RwSignal::new(None::<usize>);
    let bar_h = config.bar_height;

    view! {
        <div class="card-head">
            <div class="caption muted">
                "SMEs per $1M " <span class="muted">"(" {config.rate_stage.label()} ")"</span>
            </div>
            {move || per_million.get().map(|v| view! { <span class="badge">{format_number_compact(v)}</span> })}
        </div>
        <div class="legend">
            <span class="legend-chip"><i class="legend-dot" style=format!("background:{}", colors::TEAL_700) />"Total SMEs"</span>
            <span class="legend-chip"><i class="legend-dot" style=format!("background:{}", colors::GOLD_500) />"Women-led"</span>
            <span class="legend-chip"><i class="legend-dot" style=format!("background:{}", colors::TEAL_600) />"Youth-led"</span>
        </div>
        {move || {
            let l = layout.get();
            view! {
                <svg width="100%" height=l.height viewBox=format!("0 0 {} {}", l.width, l.height)
                    role="img" aria-label="SME Participation Funnel">
                    {l.bars
                        .into_iter()
                        .enumerate()
                        .map(|(i, b)| {
                            let mid_y = b.y + bar_h / 2.0;
                            let connector = b.connector.clone();
                            view! {
                                <g
                                    on:mouseenter=move |_| hover.set(Some(i))
                                    on:mouseleave=move |_| hover.set(None)
                                >
                                    <text x=b.x0 - 8.0 y=mid_y class="caption" fill=colors::TEAL_700
                                        text-anchor="end" dominant-baseline="middle">
                                        {b.stage.label()}
                                    </text>
                                    {move || {
                                        (hover.get() == Some(i))
                                            .then(|| connector.clone())
                                            .flatten()
                                            .map(|c| view! {
                                                <line x1=c.x1 y1=c.y x2=c.x2 y2=c.y
                                                    stroke=colors::RING stroke-dasharray="4 3" />
                                                <text x=c.label_x y=c.label_y class="caption" fill=colors::TEAL_700>
                                                    {c.label}
                                                </text>
                                            })
                                    }}
                                    <rect x=b.x0 y=b.y width=b.width height=bar_h rx="5" fill=colors::TEAL_700>
                                        <title>{b.tooltip.clone()}</title>
                                    </rect>
                                    {b.women_width.map(|w| view! {
                                        <rect x=b.x0 y=b.y + 4.0 width=w height="3" rx="2"
                                            fill=colors::GOLD_500 pointer-events="none" />
                                    })}
                                    {b.youth_width.map(|w| view! {
                                        <rect x=b.x0 y=b.y + 8.0 width=w height="3" rx="2"
                                            fill=colors::TEAL_600 pointer-events="none" />
                                    })}
                                    {match b.placement {
                                        ValuePlacement::Inside { chip_x, chip_y, chip_w, chip_h, text_x } => view! {
                                            <rect x=chip_x y=chip_y width=chip_w height=chip_h rx="8"
                                                fill=colors::TEAL_700 pointer-events="none" />
                                            <text x=text_x y=mid_y class="caption value-chip" dominant-baseline="middle"
                                                text-anchor="end" fill=colors::ON_ACCENT pointer-events="none">
                                                {b.value_label.clone()}
                                            </text>
                                        }
                                        .into_any(),
                                        ValuePlacement::Outside { x } => view! {
                                            <text x=x y=mid_y class="caption" dominant-baseline="middle"
                                                text-anchor="start" fill=colors::FG pointer-events="none">
                                                {b.value_label.clone()}
                                            </text>
                                        }
                                        .into_any(),
                                    }}
                                </g>
                            }
                        })
                        .collect_view()}
                </svg>
            }
        }}
        <div class="caption muted">"Hover a stage to see conversion from the previous step."</div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stage(stage: SmeStage, total: f64) -> SmeFunnelItem {
        SmeFunnelItem {
            stage,
            total,
            women_led: None,
            youth_led: None,
        }
    }

    fn scenario() -> Vec<SmeFunnelItem> {
        vec![
            stage(SmeStage::Eligible, 1200.0),
            stage(SmeStage::Approved, 760.0),
            stage(SmeStage::Disbursed, 540.0),
            stage(SmeStage::Active, 480.0),
        ]
    }

    #[test]
    fn test_funnel_conversion_scenario() {
        let l = layout_funnel(&scenario(), 320.0, &FunnelConfig::default());
        let conv: Vec<Option<u32>> = l.bars.iter().map(|b| b.conversion).collect();
        assert_eq!(conv, vec![None, Some(63), Some(71), Some(89)]);
        assert_eq!(l.bars[1].connector.as_ref().map(|c| c.label.as_str()), Some("→ 63%"));
    }

    #[test]
    fn test_conversion_zero_previous() {
        assert_eq!(conversion(0.0, 10.0), None);
        let l = layout_funnel(
            &[stage(SmeStage::Eligible, 0.0), stage(SmeStage::Approved, 5.0)],
            320.0,
            &FunnelConfig::default(),
        );
        assert_eq!(l.bars[1].conversion, None);
    }

    #[test]
    fn test_canonical_order_skips_missing() {
        let items = vec![stage(SmeStage::Active, 10.0), stage(SmeStage::Eligible, 40.0)];
        let l = layout_funnel(&items, 320.0, &FunnelConfig::default());
        let stages: Vec<SmeStage> = l.bars.iter().map(|b| b.stage).collect();
        assert_eq!(stages, vec![SmeStage::Eligible, SmeStage::Active]);
        assert_eq!(l.bars[1].conversion, Some(25));
        assert_eq!(l.height, 10.0 + 2.0 * 40.0 - 14.0 + 8.0);
    }

    #[test]
    fn test_label_column_bounds() {
        let narrow = layout_funnel(&scenario(), 220.0, &FunnelConfig::default());
        assert_eq!(narrow.label_col_w, 80.0);
        let wide = layout_funnel(&scenario(), 1000.0, &FunnelConfig::default());
        assert_eq!(wide.label_col_w, 140.0);
        assert_eq!(wide.bar_area_w, 1000.0 - 16.0 - 140.0);
    }

    #[test]
    fn test_value_placement() {
        let l = layout_funnel(&scenario(), 320.0, &FunnelConfig::default());
        // first stage is always inside
        assert!(matches!(l.bars[0].placement, ValuePlacement::Inside { .. }));
        // 480 of 1200 is far from the right edge
        assert!(matches!(l.bars[3].placement, ValuePlacement::Outside { .. }));
        if let ValuePlacement::Inside { chip_w, chip_h, .. } = l.bars[0].placement {
            // "1,200" -> 5 * 7.2 = 36, plus padding
            assert!((chip_w - 48.0).abs() < 1e-9);
            assert_eq!(chip_h, 22.0);
        }
    }

    #[test]
    fn test_tooltip_text() {
        let mut items = scenario();
        items[1].women_led = Some(300.0);
        let l = layout_funnel(&items, 320.0, &FunnelConfig::default());
        assert_eq!(
            l.bars[1].tooltip,
            "Approved — 760 SMEs • Conversion from previous: 63% • Women-led: 300"
        );
    }

    #[test]
    fn test_empty_funnel() {
        let l = layout_funnel(&[], 320.0, &FunnelConfig::default());
        assert!(l.bars.is_empty());
        assert_eq!(l.height, 18.0);
    }

    proptest! {
        #[test]
        fn prop_overlay_never_exceeds_bar(
            total in 0.0f64..1e6,
            women in 0.0f64..2e6,
            youth in 0.0f64..2e6,
            width in 220.0f64..1600.0,
        ) {
            let item = SmeFunnelItem {
                stage: SmeStage::Approved,
                total,
                women_led: Some(women),
                youth_led: Some(youth),
            };
            let l = layout_funnel(&[item], width, &FunnelConfig::default());
            let bar = &l.bars[0];
            prop_assert!(bar.women_width.unwrap() <= bar.width + 1e-9);
            prop_assert!(bar.youth_width.unwrap() <= bar.width + 1e-9);
        }

        #[test]
        fn prop_layout_deterministic(width in 220.0f64..1600.0) {
            let a = layout_funnel(&scenario(), width, &FunnelConfig::default());
            let b = layout_funnel(&scenario(), width, &FunnelConfig::default());
            prop_assert_eq!(a, b);
        }
    }
}
