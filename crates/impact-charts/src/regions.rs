//! Region views: tile map, region cards and the intra-African trade share meter

use crate::{
    chartkit::{Scale, magnitude_scale},
    colors,
};
use impact_core::{
    Region, RegionImpact, TradeShareItem, format_currency_compact, format_number_compact, percent_of,
};
use leptos::prelude::*;

// ============================================================================
// TILE MAP
// ============================================================================

/// Grid cell `(col, row)` of a region on the tile map
pub fn tile_position(region: Region) -> (u32, u32) {
    match region {
        Region::West => (0, 1),
        Region::North => (1, 0),
        Region::Central => (1, 1),
        Region::East => (2, 1),
        Region::Southern => (1, 2),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMapConfig {
    pub tile: f64,
    pub gap: f64,
}

impl TileMapConfig {
    /// Bar length available inside a tile
    pub fn bar_span(&self) -> f64 {
        (self.tile - 20.0).max(0.0)
    }
}

impl Default for TileMapConfig {
    fn default() -> Self {
        Self {
            tile: 100.0,
            gap: 10.0,
        }
    }
}

/// Horizontal bar inside a tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBar {
    pub label: &'static str,
    pub label_y: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub region: Region,
    pub x: f64,
    pub y: f64,
    pub bars: Vec<TileBar>,
    pub projects_label: String,
    pub jobs_label: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileMapLayout {
    pub width: f64,
    pub height: f64,
    pub tile: f64,
    pub tiles: Vec<Tile>,
}

fn max_of(regions: &[RegionImpact], f: impl Fn(&RegionImpact) -> f64) -> f64 {
    regions.iter().map(f).filter(|v| v.is_finite()).fold(0.0, f64::max)
}

fn tile_tooltip(r: &RegionImpact) -> String {
    format!(
        "{}\nDisbursement: ${:.0}M\nIntra-African Trade: {}\nManufactured Exports: {}\nSMEs: {}\nJobs: {}",
        r.region,
        r.total_disbursement_m,
        format_currency_compact(r.intra_african_trade_us),
        format_currency_compact(r.manufactured_exports_us),
        r.smes_supported,
        r.jobs_created
    )
}

pub fn layout_tile_map(regions: &[RegionImpact], config: &TileMapConfig) -> TileMapLayout {
    let span = config.bar_span();
    let disb = magnitude_scale(max_of(regions, |r| r.total_disbursement_m), span);
    // intra-African trade and manufactured exports share one domain
    let trade = magnitude_scale(max_of(regions, RegionImpact::max_trade), span);
    let sme = magnitude_scale(max_of(regions, |r| r.smes_supported), span);

    let step = config.tile + config.gap;
    let mut cols = 0;
    let mut rows = 0;

    let tiles: Vec<Tile> = Region::ring_order()
        .iter()
        .filter_map(|region| {
            let r = regions.iter().find(|r| r.region == *region)?;
            let (col, row) = tile_position(*region);
            cols = cols.max(col + 1);
            rows = rows.max(row + 1);
            Some(Tile {
                region: *region,
                x: f64::from(col) * step,
                y: f64::from(row) * step,
                bars: vec![
                    TileBar {
                        label: "Disb ($M)",
                        label_y: 32.0,
                        y: 38.0,
                        width: disb.scale(r.total_disbursement_m),
                        height: 10.0,
                        color: colors::ACCENT,
                    },
                    TileBar {
                        label: "Intra-Afr Trade",
                        label_y: 58.0,
                        y: 64.0,
                        width: trade.scale(r.intra_african_trade_us),
                        height: 6.0,
                        color: colors::ACCENT_3,
                    },
                    TileBar {
                        label: "Manufactured Exports",
                        label_y: 78.0,
                        y: 84.0,
                        width: trade.scale(r.manufactured_exports_us),
                        height: 6.0,
                        color: colors::ACCENT_3,
                    },
                    TileBar {
                        label: "SMEs",
                        label_y: 98.0,
                        y: 104.0,
                        width: sme.scale(r.smes_supported),
                        height: 6.0,
                        color: colors::ACCENT_2,
                    },
                ],
                projects_label: format!("{} projects", r.projects),
                jobs_label: format!("{} jobs", format_number_compact(r.jobs_created)),
                tooltip: tile_tooltip(r),
            })
        })
        .collect();

    let extent = |n: u32| if n == 0 { 0.0 } else { f64::from(n) * step - config.gap };

    TileMapLayout {
        width: extent(cols),
        height: extent(rows),
        tile: config.tile,
        tiles,
    }
}

#[component]
pub fn RegionTileMap(
    #[prop(into)] regions: Signal<Vec<RegionImpact>>,
    #[prop(optional)] config: Option<TileMapConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let layout = Memo::new(move |_| regions.with(|r| layout_tile_map(r, &config)));

    move || {
        let l = layout.get();
        let tile = l.tile;
        view! {
            <div class="panel tile-map" style=format!("width:{}px", l.width)>
                <svg width=l.width height=l.height role="img" aria-label="Impact by Region">
                    {l.tiles
                        .into_iter()
                        .map(|t| view! {
                            <g transform=format!("translate({},{})", t.x, t.y)>
                                <rect width=tile height=tile rx="8" fill=colors::TILE stroke=colors::RING />
                                <text x="8" y="16" font-size="12" fill=colors::INK>{t.region.name()}</text>
                                {t.bars
                                    .iter()
                                    .map(|b| view! {
                                        <text x="8" y=b.label_y font-size="11" fill=colors::MUTED>{b.label}</text>
                                        <rect x="8" y=b.y width=b.width height=b.height fill=b.color />
                                    })
                                    .collect_view()}
                                <text x="8" y="122" font-size="11" fill=colors::MUTED>{t.projects_label.clone()}</text>
                                <text x=tile - 8.0 y="122" font-size="11" fill=colors::ACCENT_4 text-anchor="end">
                                    {t.jobs_label.clone()}
                                </text>
                                <title>{t.tooltip.clone()}</title>
                            </g>
                        })
                        .collect_view()}
                </svg>
            </div>
        }
    }
}

// ============================================================================
// REGION CARDS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RegionCard {
    pub region: Region,
    /// Bar widths as whole percentages of the largest region
    pub disbursement_pct: u32,
    pub intra_trade_pct: u32,
    pub exports_pct: u32,
    pub smes_pct: u32,
    pub projects: u32,
    pub jobs_label: String,
}

pub fn layout_region_cards(regions: &[RegionImpact]) -> Vec<RegionCard> {
    let max_disb = max_of(regions, |r| r.total_disbursement_m);
    let max_trade = max_of(regions, RegionImpact::max_trade);
    let max_sme = max_of(regions, |r| r.smes_supported);
    let pct = |v: f64, max: f64| percent_of(v, max).unwrap_or(0);

    regions
        .iter()
        .map(|r| RegionCard {
            region: r.region,
            disbursement_pct: pct(r.total_disbursement_m, max_disb),
            intra_trade_pct: pct(r.intra_african_trade_us, max_trade),
            exports_pct: pct(r.manufactured_exports_us, max_trade),
            smes_pct: pct(r.smes_supported, max_sme),
            projects: r.projects,
            jobs_label: format!("{} jobs", format_number_compact(r.jobs_created)),
        })
        .collect()
}

#[component]
fn CardRow(label: &'static str, pct: u32, #[prop(optional)] color: Option<&'static str>) -> impl IntoView {
    let style = match color {
        Some(c) => format!("--w:{pct}%;background:{c}"),
        None => format!("--w:{pct}%"),
    };
    view! {
        <div class="region-row">
            <span class="region-label">{label}</span>
            <div class="bar-frame"><div class="bar-fill" style=style /></div>
        </div>
    }
}

#[component]
pub fn RegionCards(#[prop(into)] regions: Signal<Vec<RegionImpact>>) -> impl IntoView {
    let cards = Memo::new(move |_| regions.with(|r| layout_region_cards(r)));

    view! {
        <div class="region-grid">
            {move || cards
                .get()
                .into_iter()
                .map(|c| view! {
                    <div class="panel region-card">
                        <h4 class="region-title">{c.region.name()}</h4>
                        <CardRow label="Disb ($M)" pct=c.disbursement_pct />
                        <CardRow label="Intra-Afr Trade" pct=c.intra_trade_pct color=colors::ACCENT_3 />
                        <CardRow label="Mfg Exports" pct=c.exports_pct color=colors::ACCENT_3 />
                        <CardRow label="SMEs" pct=c.smes_pct color=colors::ACCENT_2 />
                        <div class="region-footer">
                            <span class="muted">{format!("{} projects", c.projects)}</span>
                            <strong class="jobs-emph">{c.jobs_label.clone()}</strong>
                        </div>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

// ============================================================================
// TRADE SHARE METER
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ShareMeterRow {
    pub id: String,
    pub name: String,
    pub percent: u32,
    /// Segment widths in percent of the bar
    pub intra_width: f64,
    pub extra_width: f64,
    pub intra_label: String,
    pub total_label: String,
}

pub fn layout_share_meter(items: &[TradeShareItem]) -> Vec<ShareMeterRow> {
    items
        .iter()
        .map(|it| {
            let total = it.total();
            let denom = total.max(1.0);
            ShareMeterRow {
                id: it.id.clone(),
                name: it.name.clone(),
                percent: it.share_percent(),
                intra_width: it.intra() / denom * 100.0,
                extra_width: it.extra() / denom * 100.0,
                intra_label: format!("Intra: {}", format_currency_compact(it.intra())),
                total_label: format!("Total: {}", format_currency_compact(total)),
            }
        })
        .collect()
}

#[component]
pub fn TradeShareMeter(#[prop(into)] items: Signal<Vec<TradeShareItem>>) -> impl IntoView {
    let rows = Memo::new(move |_| items.with(|i| layout_share_meter(i)));

    view! {
        <div class="share-grid">
            {move || rows
                .get()
                .into_iter()
                .map(|r| view! {
                    <div class="share-card">
                        <div class="share-head">
                            <strong class="share-name" title=r.name.clone()>{r.name.clone()}</strong>
                            <span class="badge" title="Intra-African Share">{format!("{}%", r.percent)}</span>
                        </div>
                        <div class="share-bar">
                            <div class="share-intra" style=format!("width:{}%", r.intra_width) />
                            <div class="share-extra" style=format!("width:{}%", r.extra_width) />
                        </div>
                        <div class="share-vals caption">
                            <span>{r.intra_label.clone()}</span>
                            <span>{r.total_label.clone()}</span>
                        </div>
                    </div>
                })
                .collect_view()}
        </div>
        <div class="caption legend">
            <span class="dot" style=format!("background:{}", colors::ACCENT_3) />" Intra-African | "
            <span class="dot dot-outline" style=format!("background:{}", colors::PANEL_SOFT) />" Extra-African"
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(region: Region, disb: f64, intra: f64, exports: f64, smes: f64) -> RegionImpact {
        RegionImpact {
            region,
            total_disbursement_m: disb,
            projects: 12,
            intra_african_trade_us: intra,
            manufactured_exports_us: exports,
            smes_supported: smes,
            jobs_created: 15_400.0,
        }
    }

    fn sample() -> Vec<RegionImpact> {
        vec![
            region(Region::West, 400.0, 2.0e9, 1.0e9, 300.0),
            region(Region::North, 200.0, 1.0e9, 4.0e9, 150.0),
            region(Region::Central, 100.0, 0.5e9, 0.2e9, 75.0),
            region(Region::East, 300.0, 1.5e9, 0.8e9, 600.0),
            region(Region::Southern, 350.0, 3.0e9, 2.0e9, 0.0),
        ]
    }

    #[test]
    fn test_tile_positions() {
        let l = layout_tile_map(&sample(), &TileMapConfig::default());
        let at = |r: Region| l.tiles.iter().find(|t| t.region == r).map(|t| (t.x, t.y));
        assert_eq!(at(Region::West), Some((0.0, 110.0)));
        assert_eq!(at(Region::North), Some((110.0, 0.0)));
        assert_eq!(at(Region::East), Some((220.0, 110.0)));
        assert_eq!(at(Region::Southern), Some((110.0, 220.0)));
        assert_eq!((l.width, l.height), (320.0, 320.0));
    }

    #[test]
    fn test_trade_bars_share_domain() {
        let l = layout_tile_map(&sample(), &TileMapConfig::default());
        let north = l.tiles.iter().find(|t| t.region == Region::North).unwrap();
        // North has the largest export value of either trade series
        assert_eq!(north.bars[2].width, 80.0);
        assert_eq!(north.bars[1].width, 20.0);

        let west = &l.tiles[0];
        assert_eq!(west.bars[0].width, 80.0);
        let southern = l.tiles.iter().find(|t| t.region == Region::Southern).unwrap();
        assert_eq!(southern.bars[3].width, 0.0);
    }

    #[test]
    fn test_missing_region_and_zero_domain() {
        let only = vec![region(Region::Central, 0.0, 0.0, 0.0, 0.0)];
        let l = layout_tile_map(&only, &TileMapConfig::default());
        assert_eq!(l.tiles.len(), 1);
        assert!(l.tiles[0].bars.iter().all(|b| b.width == 0.0));
        assert_eq!((l.width, l.height), (210.0, 210.0));

        let empty = layout_tile_map(&[], &TileMapConfig::default());
        assert_eq!((empty.width, empty.height), (0.0, 0.0));
    }

    #[test]
    fn test_tile_tooltip() {
        let l = layout_tile_map(&sample(), &TileMapConfig::default());
        assert_eq!(
            l.tiles[0].tooltip,
            "West Africa\nDisbursement: $400M\nIntra-African Trade: $2B\nManufactured Exports: $1B\nSMEs: 300\nJobs: 15400"
        );
        assert_eq!(l.tiles[0].jobs_label, "15.4K jobs");
    }

    #[test]
    fn test_region_card_percentages() {
        let cards = layout_region_cards(&sample());
        assert_eq!(cards[0].disbursement_pct, 100);
        assert_eq!(cards[2].disbursement_pct, 25);
        assert_eq!(cards[1].exports_pct, 100);
        assert_eq!(cards[0].intra_trade_pct, 50);
        assert_eq!(cards[3].smes_pct, 100);

        let zero = layout_region_cards(&[region(Region::West, 0.0, 0.0, 0.0, 0.0)]);
        assert_eq!(zero[0].disbursement_pct, 0);
    }

    #[test]
    fn test_share_meter_rows() {
        let items = vec![
            TradeShareItem {
                id: "ecowas".into(),
                name: "ECOWAS".into(),
                intra_us: 30.0,
                total_us: 120.0,
            },
            TradeShareItem {
                id: "over".into(),
                name: "Over".into(),
                intra_us: 50.0,
                total_us: 40.0,
            },
            TradeShareItem {
                id: "none".into(),
                name: "None".into(),
                intra_us: 0.0,
                total_us: 0.0,
            },
        ];
        let rows = layout_share_meter(&items);
        assert_eq!(rows[0].percent, 25);
        assert_eq!(rows[0].intra_width, 25.0);
        assert_eq!(rows[0].extra_width, 75.0);
        assert_eq!(rows[1].percent, 100);
        assert_eq!(rows[1].extra_width, 0.0);
        assert_eq!(rows[2].percent, 0);
        assert_eq!(rows[2].intra_width + rows[2].extra_width, 0.0);
        assert_eq!(rows[0].total_label, "Total: $120");
    }
}
