//! 10×10 waffle grids, one per SDG

use crate::colors;
use impact_core::SdgStat;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaffleConfig {
    pub cols: usize,
    pub rows: usize,
    pub cell: f64,
    pub gap: f64,
}

impl WaffleConfig {
    pub fn cells(&self) -> usize {
        self.cols * self.rows
    }

    pub fn width(&self) -> f64 {
        self.cols as f64 * (self.cell + self.gap) - self.gap
    }

    pub fn height(&self) -> f64 {
        self.rows as f64 * (self.cell + self.gap) - self.gap
    }
}

impl Default for WaffleConfig {
    fn default() -> Self {
        Self {
            cols: 10,
            rows: 10,
            cell: 10.0,
            gap: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaffleCell {
    pub x: f64,
    pub y: f64,
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaffleLayout {
    pub width: f64,
    pub height: f64,
    pub filled: usize,
    pub cells: Vec<WaffleCell>,
}

/// Filled cell count for a percentage, clamped to the grid
pub fn filled_cells(percent: f64, cells: usize) -> usize {
    if !percent.is_finite() {
        return 0;
    }
    let share = percent.clamp(0.0, 100.0) / 100.0;
    ((share * cells as f64).round() as usize).min(cells)
}

pub fn layout_waffle(percent: f64, config: &WaffleConfig) -> WaffleLayout {
    let filled = filled_cells(percent, config.cells());
    let step = config.cell + config.gap;
    let cols = config.cols.max(1);
    let cells = (0..config.cells())
        .map(|i| WaffleCell {
            x: (i % cols) as f64 * step,
            y: (i / cols) as f64 * step,
            filled: i < filled,
        })
        .collect();

    WaffleLayout {
        width: config.width(),
        height: config.height(),
        filled,
        cells,
    }
}

/// Grid of SDG panels
#[component]
pub fn SdgWaffles(
    #[prop(into)] stats: Signal<Vec<SdgStat>>,
    #[prop(optional)] config: Option<WaffleConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();

    view! {
        <div class="grid cols-3">
            <For
                each=move || stats.get()
                key=|s| s.sdg.clone()
                children=move |s| {
                    let l = layout_waffle(s.percent_of_projects, &config);
                    view! {
                        <div class="panel">
                            <strong>{s.sdg.clone()}</strong>
                            <div class="caption">{format!("{}% of projects", s.percent_of_projects)}</div>
                            <svg width=l.width height=l.height aria-label=format!("{} waffle", s.sdg)>
                                {l.cells
                                    .into_iter()
                                    .map(|c| view! {
                                        <rect x=c.x y=c.y width=config.cell height=config.cell
                                            fill=if c.filled { colors::GOLD_500 } else { colors::TEAL_700 } />
                                    })
                                    .collect_view()}
                            </svg>
                            {s.example_project.clone().map(|p| view! {
                                <div class="caption example">{format!("e.g., {p}")}</div>
                            })}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_size() {
        let c = WaffleConfig::default();
        assert_eq!((c.width(), c.height()), (109.0, 109.0));
        assert_eq!(c.cells(), 100);
    }

    #[test]
    fn test_cell_positions() {
        let l = layout_waffle(37.0, &WaffleConfig::default());
        assert_eq!(l.filled, 37);
        assert_eq!(l.cells[0], WaffleCell { x: 0.0, y: 0.0, filled: true });
        assert_eq!(l.cells[36].filled, true);
        assert_eq!(l.cells[37].filled, false);
        assert_eq!((l.cells[23].x, l.cells[23].y), (33.0, 22.0));
        assert_eq!((l.cells[99].x, l.cells[99].y), (99.0, 99.0));
    }

    #[test]
    fn test_percent_clamped_and_rounded() {
        assert_eq!(filled_cells(42.5, 100), 43);
        assert_eq!(filled_cells(-5.0, 100), 0);
        assert_eq!(filled_cells(140.0, 100), 100);
        assert_eq!(filled_cells(f64::NAN, 100), 0);
    }

    proptest! {
        #[test]
        fn prop_filled_bounded(p in proptest::num::f64::ANY) {
            let l = layout_waffle(p, &WaffleConfig::default());
            prop_assert!(l.filled <= 100);
            prop_assert_eq!(l.cells.iter().filter(|c| c.filled).count(), l.filled);
        }
    }
}
