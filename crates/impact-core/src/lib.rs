//! # impact-core
//!
//! Core domain records for the Impact Dashboard.
//! Implements Strategy pattern for value formatting and keeps every derived
//! ratio guarded so a zero denominator resolves to `0` instead of NaN.

pub mod dataset;
pub mod finance;
pub mod help;
pub mod inclusion;
pub mod metric;
pub mod region;
pub mod validate;

pub use dataset::*;
pub use finance::*;
pub use help::*;
pub use inclusion::*;
pub use metric::*;
pub use region::*;
pub use validate::*;

// ============================================================================
// GUARDED ARITHMETIC
// ============================================================================

/// Divide `numerator` by `denominator`, returning `0.0` when the denominator
/// is not strictly positive or the result is not finite.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let r = numerator / denominator;
    if r.is_finite() { r } else { 0.0 }
}

/// Whole-number percentage of `part` in `total`, `None` when total is zero.
pub fn percent_of(part: f64, total: f64) -> Option<u32> {
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    let pct = (part / total * 100.0).round();
    pct.is_finite().then(|| pct.max(0.0) as u32)
}

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for value formatting
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Compact US$ formatter ("$1.2B", "$880M")
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactCurrencyFormatter;

impl ValueFormatter for CompactCurrencyFormatter {
    fn format(&self, value: f64) -> String {
        format_currency_compact(value)
    }
}

/// Compact count formatter ("48.5K", "120")
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactNumberFormatter;

impl ValueFormatter for CompactNumberFormatter {
    fn format(&self, value: f64) -> String {
        format_number_compact(value)
    }
}

/// Grouped integer formatter ("1,200")
#[derive(Debug, Clone, Copy, Default)]
pub struct ThousandsFormatter;

impl ValueFormatter for ThousandsFormatter {
    fn format(&self, value: f64) -> String {
        format_thousands(value)
    }
}

const COMPACT_UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn trim_one(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn format_compact(value: f64, prefix: &str) -> String {
    if !value.is_finite() {
        return format!("{}0", prefix);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let mut unit = COMPACT_UNITS.iter().position(|&(threshold, _)| abs >= threshold);
    let mut shown = round_one(unit.map_or(abs, |i| abs / COMPACT_UNITS[i].0));

    // 999.96K rounds to 1000K; promote to the next unit
    if shown >= 1000.0 {
        let next = match unit {
            Some(0) => None,
            Some(i) => Some(i - 1),
            None => Some(COMPACT_UNITS.len() - 1),
        };
        if let Some(i) = next {
            unit = Some(i);
            shown = round_one(abs / COMPACT_UNITS[i].0);
        }
    }

    let suffix = unit.map_or("", |i| COMPACT_UNITS[i].1);
    format!("{}{}{}{}", sign, prefix, trim_one(shown), suffix)
}

/// Compact currency notation with at most one fraction digit.
pub fn format_currency_compact(value: f64) -> String {
    format_compact(value, "$")
}

/// Compact number notation with at most one fraction digit.
pub fn format_number_compact(value: f64) -> String {
    format_compact(value, "")
}

/// Integer with comma thousands separators.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Ratio with a multiplication sign ("3.5×")
pub fn format_multiplier(ratio: f64, decimals: usize) -> String {
    format!("{:.prec$}×", ratio, prec = decimals)
}

// ============================================================================
// COLOR PALETTE
// ============================================================================

/// Symbolic palette. Every entry references a CSS custom property so a theme
/// swap never touches geometry code.
pub mod colors {
    pub const ACCENT: &str = "var(--accent)";
    pub const ACCENT_2: &str = "var(--accent-2)";
    pub const ACCENT_3: &str = "var(--accent-3)";
    pub const ACCENT_4: &str = "var(--accent-4)";
    pub const TEAL_300: &str = "var(--teal-300)";
    pub const TEAL_600: &str = "var(--teal-600)";
    pub const TEAL_700: &str = "var(--teal-700)";
    pub const GOLD_500: &str = "var(--gold-500)";
    pub const DANGER: &str = "var(--danger)";
    pub const INK: &str = "var(--ink)";
    pub const FG: &str = "var(--fg)";
    pub const MUTED: &str = "var(--muted)";
    pub const PANEL: &str = "var(--panel)";
    pub const PANEL_SOFT: &str = "var(--panel-soft)";
    pub const RING: &str = "var(--ring)";
    pub const TRACK: &str = "var(--track)";
    pub const TILE: &str = "var(--tile)";
    pub const ON_ACCENT: &str = "var(--on-accent)";
    pub const SPLIT_LINE: &str = "var(--split-line)";
    pub const REGION_DOT: &str = "var(--region-dot)";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_or_zero_guards() {
        assert_eq!(ratio_or_zero(420.0, 120.0), 3.5);
        assert_eq!(ratio_or_zero(420.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(420.0, -5.0), 0.0);
        assert_eq!(ratio_or_zero(f64::NAN, 1.0), 0.0);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(320_000_000.0, 500_000_000.0), Some(64));
        assert_eq!(percent_of(1.0, 0.0), None);
    }

    #[test]
    fn test_currency_compact() {
        assert_eq!(format_currency_compact(1_240_000_000.0), "$1.2B");
        assert_eq!(format_currency_compact(880_000_000.0), "$880M");
        assert_eq!(format_currency_compact(2_000_000_000.0), "$2B");
        assert_eq!(format_currency_compact(-1_500_000.0), "-$1.5M");
        assert_eq!(format_currency_compact(0.0), "$0");
    }

    #[test]
    fn test_number_compact() {
        assert_eq!(format_number_compact(48_500.0), "48.5K");
        assert_eq!(format_number_compact(1_850.0), "1.9K");
        assert_eq!(format_number_compact(120.0), "120");
        assert_eq!(format_number_compact(12.34), "12.3");
    }

    #[test]
    fn test_compact_rollover() {
        assert_eq!(format_number_compact(999_960.0), "1M");
        assert_eq!(format_number_compact(999.97), "1K");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_thousands(1200.0), "1,200");
        assert_eq!(format_thousands(480.0), "480");
        assert_eq!(format_thousands(1_234_567.0), "1,234,567");
        assert_eq!(format_thousands(-4500.0), "-4,500");
    }

    #[test]
    fn test_formatter_strategy() {
        let formatters: Vec<Box<dyn ValueFormatter>> = vec![
            Box::new(CompactCurrencyFormatter),
            Box::new(CompactNumberFormatter),
            Box::new(ThousandsFormatter),
        ];
        let out: Vec<String> = formatters.iter().map(|f| f.format(1500.0)).collect();
        assert_eq!(out, vec!["$1.5K", "1.5K", "1,500"]);
    }

    #[test]
    fn test_palette_is_symbolic() {
        for c in [colors::ACCENT, colors::DANGER, colors::GOLD_500, colors::RING] {
            assert!(c.starts_with("var(--"));
        }
    }
}
