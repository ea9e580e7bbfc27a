//! # chartkit
//!
//! Core chart primitives: scales, path builders, polar helpers.
//! Implements Strategy pattern for scale and path generation.

use std::f64::consts::TAU;
use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale).
///
/// A zero-width domain maps every input to the range midpoint, so a chart
/// whose values are all equal still renders finite coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    /// Angle scale: `[lo, hi]` onto a full turn `[0, 2π]`
    pub fn angle(lo: f64, hi: f64) -> Self {
        Self::new().domain(lo, hi).range(0.0, TAU)
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Extend the domain outward to multiples of a round tick step
    pub fn nice(mut self, count: usize) -> Self {
        let (mut lo, mut hi) = self.domain;
        if count == 0 || !lo.is_finite() || !hi.is_finite() || lo == hi {
            return self;
        }
        let reversed = hi < lo;
        if reversed {
            std::mem::swap(&mut lo, &mut hi);
        }
        // A second pass settles domains whose first step widened the span
        for _ in 0..2 {
            let step = tick_step(lo, hi, count);
            if step <= 0.0 || !step.is_finite() {
                break;
            }
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        }
        self.domain = if reversed { (hi, lo) } else { (lo, hi) };
        self
    }

    /// Generate "nice" tick values (rounded to clean numbers)
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let range = max - min;

        if range == 0.0 || count == 0 {
            return vec![min];
        }

        let nice_step = tick_step(min, max, count);
        if !nice_step.is_finite() || nice_step <= 0.0 {
            return vec![min];
        }

        let nice_min = (min / nice_step).floor() * nice_step;
        let nice_max = (max / nice_step).ceil() * nice_step;

        let mut ticks = Vec::new();
        let mut tick = nice_min;

        while tick <= nice_max + nice_step * 0.5 {
            if tick >= min - nice_step * 1e-9 && tick <= max + nice_step * 1e-9 {
                ticks.push(tick);
            }
            tick += nice_step;
        }

        ticks
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let mut normalized = (value - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let mut normalized = (value - r_min) / (r_max - r_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let step = (max - min) / (count - 1) as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }
}

/// `[0, max] → [0, span]`, clamped. An empty or invalid `max` maps every
/// value to 0 instead of the range midpoint.
pub fn magnitude_scale(max: f64, span: f64) -> LinearScale {
    let hi = if max.is_finite() && max > 0.0 { max } else { 1.0 };
    LinearScale::new().domain(0.0, hi).range(0.0, span).clamp(true)
}

/// Round step (1, 2 or 5 × 10^k) that splits `[lo, hi]` into about `count` parts
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let span = (hi - lo).abs();
    if span == 0.0 || count == 0 {
        return 0.0;
    }

    let rough_step = span / count as f64;
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    if residual <= 1.0 {
        magnitude
    } else if residual <= 2.0 {
        2.0 * magnitude
    } else if residual <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}

// ============================================================================
// NUMERIC HELPERS
// ============================================================================

/// Clamp to `[0, 1]`; non-finite input resolves to 0
pub fn clamp01(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
}

/// Point at `radius` from `center` along `angle` (radians, 0 = 3 o'clock)
pub fn polar(center: (f64, f64), angle: f64, radius: f64) -> (f64, f64) {
    (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
}

/// SVG `text-anchor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Anchor for a label placed radially at `angle`
    pub fn for_angle(angle: f64) -> Self {
        let c = angle.cos();
        if c > 0.2 {
            Self::Start
        } else if c < -0.2 {
            Self::End
        } else {
            Self::Middle
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Straight line segments
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(x, y);
        for &(x, y) in rest {
            builder = builder.line_to(x, y);
        }
        builder.build()
    }
}

/// Monotone-X cubic interpolation: smooth, passes through every sample,
/// never overshoots between two samples.
#[derive(Debug, Clone, Default)]
pub struct MonotonePath;

impl PathGenerator for MonotonePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some(&(x, y)) = points.first() else {
            return String::new();
        };
        monotone_segments(points)
            .into_iter()
            .fold(PathBuilder::new().move_to(x, y), |b, s| s.append_to(b))
            .build()
    }
}

/// One cubic Bézier segment; `from` is implied by the previous segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: (f64, f64),
    pub c1: (f64, f64),
    pub c2: (f64, f64),
    pub to: (f64, f64),
}

impl CubicSegment {
    fn append_to(&self, builder: PathBuilder) -> PathBuilder {
        builder.cubic_to(self.c1.0, self.c1.1, self.c2.0, self.c2.1, self.to.0, self.to.1)
    }

    /// Same curve traversed backwards
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            c1: self.c2,
            c2: self.c1,
            to: self.from,
        }
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

/// Tangent at the middle of three points (Steffen-style limiter)
fn interior_tangent(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let s0 = if h0 != 0.0 { (p1.1 - p0.1) / h0 } else { 0.0 };
    let s1 = if h1 != 0.0 { (p2.1 - p1.1) / h1 } else { 0.0 };
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    finite_or_zero((sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs()))
}

/// Tangent at an end point, given the neighbouring tangent `t`
fn end_tangent(p0: (f64, f64), p1: (f64, f64), t: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h != 0.0 {
        finite_or_zero((3.0 * (p1.1 - p0.1) / h - t) / 2.0)
    } else {
        t
    }
}

/// Per-point tangents for monotone-X interpolation
pub fn monotone_tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    if n < 3 {
        return vec![0.0; n];
    }

    let mut t = vec![0.0; n];
    for i in 1..n - 1 {
        t[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    t[0] = end_tangent(points[0], points[1], t[1]);
    t[n - 1] = end_tangent(points[n - 2], points[n - 1], t[n - 2]);
    t
}

/// Cubic segments of the monotone-X curve through `points`.
/// Two points give a straight segment; fewer give none.
pub fn monotone_segments(points: &[(f64, f64)]) -> Vec<CubicSegment> {
    if points.len() < 2 {
        return Vec::new();
    }
    if points.len() == 2 {
        let (a, b) = (points[0], points[1]);
        let third = ((b.0 - a.0) / 3.0, (b.1 - a.1) / 3.0);
        return vec![CubicSegment {
            from: a,
            c1: (a.0 + third.0, a.1 + third.1),
            c2: (b.0 - third.0, b.1 - third.1),
            to: b,
        }];
    }

    let t = monotone_tangents(points);
    points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let ((x0, y0), (x1, y1)) = (w[0], w[1]);
            let dx = (x1 - x0) / 3.0;
            CubicSegment {
                from: (x0, y0),
                c1: (x0 + dx, y0 + dx * t[i]),
                c2: (x1 - dx, y1 - dx * t[i + 1]),
                to: (x1, y1),
            }
        })
        .collect()
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        let _ = write!(self.commands, "H{:.2}", x);
        self
    }

    pub fn vertical_to(mut self, y: f64) -> Self {
        let _ = write!(self.commands, "V{:.2}", y);
        self
    }

    pub fn cubic_to(mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        let _ = write!(
            self.commands,
            "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            x1, y1, x2, y2, x, y
        );
        self
    }

    pub fn quadratic_to(mut self, x1: f64, y1: f64, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "Q{:.2},{:.2},{:.2},{:.2}", x1, y1, x, y);
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        let _ = write!(
            self.commands,
            "A{:.2},{:.2},{:.2},{},{},{:.2},{:.2}",
            rx, ry, rotation, large_arc as u8, sweep as u8, x, y
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// AREA / LINE PATHS
// ============================================================================

/// Closed area between a straight polyline and a horizontal baseline
pub fn area_path(points: &[(f64, f64)], baseline_y: f64) -> String {
    let (Some(&(first_x, first_y)), Some(&(last_x, _))) = (points.first(), points.last()) else {
        return String::new();
    };

    let mut builder = PathBuilder::new()
        .move_to(first_x, baseline_y)
        .line_to(first_x, first_y);

    for &(x, y) in &points[1..] {
        builder = builder.line_to(x, y);
    }

    builder.line_to(last_x, baseline_y).close().build()
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinePath.generate(points)
}

/// Monotone-X curve through `points` (non-closed)
pub fn monotone_path(points: &[(f64, f64)]) -> String {
    MonotonePath.generate(points)
}

/// Closed band between two monotone curves sampled at the same x positions.
/// `top` runs left to right, the band returns along `bottom` right to left.
pub fn monotone_area_path(top: &[(f64, f64)], bottom: &[(f64, f64)]) -> String {
    let (Some(&(x, y)), Some(&(bx, by))) = (top.first(), bottom.last()) else {
        return String::new();
    };

    let mut builder = PathBuilder::new().move_to(x, y);
    for s in monotone_segments(top) {
        builder = s.append_to(builder);
    }
    builder = builder.line_to(bx, by);
    for s in monotone_segments(bottom).iter().rev() {
        builder = s.reversed().append_to(builder);
    }
    builder.close().build()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_degenerate_domain_is_midpoint() {
        let scale = LinearScale::new().domain(5.0, 5.0).range(0.0, 100.0);
        assert_eq!(scale.scale(5.0), 50.0);
        assert_eq!(scale.scale(-1e9), 50.0);
    }

    #[test]
    fn test_clamp() {
        let scale = LinearScale::new().domain(0.0, 10.0).range(0.0, 100.0).clamp(true);
        assert_eq!(scale.scale(20.0), 100.0);
        assert_eq!(scale.scale(-3.0), 0.0);
    }

    #[test]
    fn test_nice_extends_domain() {
        let scale = LinearScale::new().domain(0.0, 1_180.0).range(100.0, 0.0).nice(10);
        assert_eq!(scale.domain_bounds(), (0.0, 1_200.0));
        let ticks = scale.nice_ticks(10);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&1_200.0));
    }

    #[test]
    fn test_angle_scale() {
        let a = LinearScale::angle(0.0, 4.0);
        assert!((a.scale(1.0) - TAU / 4.0).abs() < 1e-12);
        assert!((a.scale(4.0) - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_clamp01_and_polar() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        let (x, y) = polar((10.0, 10.0), -std::f64::consts::FRAC_PI_2, 5.0);
        assert!((x - 10.0).abs() < 1e-12 && (y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .close()
            .build();

        assert!(path.contains("M0.00,0.00"));
        assert!(path.contains("L100.00,100.00"));
        assert!(path.contains("Z"));
    }

    #[test]
    fn test_line_path_generator() {
        let path = LinePath.generate(&[(0.0, 0.0), (50.0, 50.0), (100.0, 0.0)]);

        assert!(path.starts_with("M0.00,0.00"));
        assert!(path.contains("L50.00,50.00"));
    }

    #[test]
    fn test_monotone_flat_at_extremum() {
        let pts = [(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)];
        let t = monotone_tangents(&pts);
        assert_eq!(t[1], 0.0);
    }

    #[test]
    fn test_monotone_empty_and_single() {
        assert_eq!(monotone_path(&[]), "");
        assert_eq!(monotone_path(&[(1.0, 2.0)]), "M1.00,2.00");
    }

    #[test]
    fn test_monotone_area_closes() {
        let top = [(0.0, 10.0), (10.0, 5.0), (20.0, 8.0)];
        let bottom = [(0.0, 20.0), (10.0, 20.0), (20.0, 20.0)];
        let d = monotone_area_path(&top, &bottom);
        assert!(d.starts_with("M0.00,10.00"));
        assert!(d.contains("L20.00,20.00"));
        assert!(d.ends_with("0.00,20.00Z"));
    }

    fn sorted_samples() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.1f64..50.0, -100.0f64..100.0), 2..12).prop_map(|steps| {
            let mut x = 0.0;
            steps
                .into_iter()
                .map(|(dx, y)| {
                    x += dx;
                    (x, y)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_degenerate_domain_stays_finite(d in -1e6f64..1e6, v in -1e9f64..1e9, a in -1e3f64..1e3, b in -1e3f64..1e3) {
            let s = LinearScale::new().domain(d, d).range(a, b);
            let out = s.scale(v);
            prop_assert!(out.is_finite());
            prop_assert!((out - (a + b) / 2.0).abs() < 1e-9);
        }

        #[test]
        fn prop_monotone_passes_through_samples(pts in sorted_samples()) {
            let segs = monotone_segments(&pts);
            prop_assert_eq!(segs.len(), pts.len() - 1);
            for (i, s) in segs.iter().enumerate() {
                prop_assert_eq!(s.from, pts[i]);
                prop_assert_eq!(s.to, pts[i + 1]);
            }
        }

        #[test]
        fn prop_monotone_never_overshoots(pts in sorted_samples()) {
            for s in monotone_segments(&pts) {
                let lo = s.from.1.min(s.to.1) - 1e-9;
                let hi = s.from.1.max(s.to.1) + 1e-9;
                prop_assert!(s.c1.1 >= lo && s.c1.1 <= hi);
                prop_assert!(s.c2.1 >= lo && s.c2.1 <= hi);
            }
        }
    }
}
