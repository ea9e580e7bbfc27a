//! # impact-charts
//!
//! Responsive SVG chart geometry built with Leptos.
//! Every chart splits into a pure `layout` function (data + observed width +
//! interaction state in, coordinates and path strings out) and a thin
//! component that renders the result.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, paths, polar helpers
//! - `responsive` - Container width observer
//! - `slope` - Previous/current dumbbell cards
//! - `gauge` - Leverage rings and revenue thermometers
//! - `funnel` - SME participation funnel
//! - `flow` - Chord-style investment flows between regions
//! - `ribbon` - Local content stream / stacked bars
//! - `waffle` - 10×10 SDG grids
//! - `regions` - Tile map, region cards, trade share meter
//! - `butterfly` - Inclusive jobs mirror bars
//! - `sectors` - Sector small multiples

pub mod butterfly;
pub mod chartkit;
pub mod flow;
pub mod funnel;
pub mod gauge;
pub mod regions;
pub mod responsive;
pub mod ribbon;
pub mod sectors;
pub mod slope;
pub mod waffle;

pub use butterfly::*;
pub use chartkit::*;
pub use flow::*;
pub use funnel::*;
pub use gauge::*;
pub use regions::*;
pub use responsive::*;
pub use ribbon::*;
pub use sectors::*;
pub use slope::*;
pub use waffle::*;

// Re-export colors from impact-core for convenience
pub use impact_core::colors;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Funnel padding
    pub const fn funnel() -> Self {
        Self::new(10.0, 8.0, 8.0, 8.0)
    }

    /// Ribbon padding (room for the axis labels below)
    pub const fn ribbon() -> Self {
        Self::new(8.0, 10.0, 24.0, 10.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(600.0, 180.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_dimensions() {
        let dims = ChartDimensions::new(600.0, 180.0).with_margin(ChartMargin::ribbon());
        assert_eq!(dims.inner_width(), 580.0);
        assert_eq!(dims.inner_height(), 148.0);
        assert_eq!(dims.inner_transform(), "translate(10, 8)");
        assert_eq!(dims.viewbox(), "0 0 600 180");
    }

    #[test]
    fn test_inner_never_negative() {
        let dims = ChartDimensions::new(10.0, 10.0).with_margin(ChartMargin::uniform(20.0));
        assert_eq!(dims.inner_width(), 0.0);
        assert_eq!(dims.inner_height(), 0.0);
    }
}
