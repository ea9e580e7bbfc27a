//! Catalytic leverage and government-revenue multipliers

use crate::{colors, ratio_or_zero};
use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Banding thresholds for a ratio (leverage or multiplier)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub min: f64,
    pub good: f64,
}

impl Thresholds {
    pub const fn new(min: f64, good: f64) -> Self {
        Self { min, good }
    }

    /// Catalytic leverage bands
    pub const fn leverage() -> Self {
        Self::new(3.0, 4.5)
    }

    /// Government revenue multiplier bands
    pub const fn gov_revenue() -> Self {
        Self::new(2.0, 4.0)
    }

    pub fn classify(&self, ratio: f64) -> Tone {
        if ratio >= self.good {
            Tone::Strong
        } else if ratio >= self.min {
            Tone::Caution
        } else {
            Tone::Warning
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::leverage()
    }
}

/// Qualitative band of a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Strong,
    Caution,
    Warning,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Strong => colors::ACCENT,
            Self::Caution => colors::GOLD_500,
            Self::Warning => colors::DANGER,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Strong => "tone-strong",
            Self::Caution => "tone-caution",
            Self::Warning => "tone-warning",
        }
    }

    /// Legend text for the band under `t`
    pub fn band_label(&self, t: &Thresholds) -> String {
        match self {
            Self::Strong => format!("≥ {:.1}×", t.good),
            Self::Caution => format!("{:.1}–{:.1}×", t.min, t.good),
            Self::Warning => format!("< {:.1}×", t.min),
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Strong, Self::Caution, Self::Warning]
    }
}

// ============================================================================
// LEVERAGE
// ============================================================================

/// Bank money against co-financing mobilised from other sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "bankUS")]
    pub bank_us: f64,
    #[serde(rename = "otherUS")]
    pub other_us: f64,
}

impl LeverageItem {
    pub fn bank(&self) -> f64 {
        self.bank_us.max(0.0)
    }

    pub fn other(&self) -> f64 {
        self.other_us.max(0.0)
    }

    /// Other sources per unit of bank money, 0 when bank money is 0
    pub fn leverage(&self) -> f64 {
        ratio_or_zero(self.other(), self.bank())
    }

    /// Share of the combined total from other sources
    pub fn other_share(&self) -> f64 {
        ratio_or_zero(self.other(), self.bank() + self.other())
    }
}

// ============================================================================
// GOVERNMENT REVENUE
// ============================================================================

/// Tax components behind a government revenue figure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovRevBreakdown {
    pub vat: Option<f64>,
    pub corporate_tax: Option<f64>,
    pub duties: Option<f64>,
    pub other: Option<f64>,
    pub period: Option<String>,
    pub note: Option<String>,
}

impl GovRevBreakdown {
    /// `(label, amount)` rows, absent parts reported as 0
    pub fn rows(&self) -> [(&'static str, f64); 4] {
        [
            ("VAT", self.vat.unwrap_or(0.0)),
            ("Corporate tax", self.corporate_tax.unwrap_or(0.0)),
            ("Duties", self.duties.unwrap_or(0.0)),
            ("Other", self.other.unwrap_or(0.0)),
        ]
    }

    pub fn component_total(&self) -> f64 {
        self.rows().iter().map(|(_, v)| v.max(0.0)).sum()
    }

    /// Rounded share text, `"–"` when total is not positive
    pub fn share_label(part: f64, total: f64) -> String {
        if total <= 0.0 || !total.is_finite() {
            return "–".to_string();
        }
        format!("{:.0}%", (part / total * 100.0).round())
    }
}

/// Government revenue generated per unit of bank money
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovRevItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "bankUS")]
    pub bank_us: f64,
    #[serde(rename = "govRevenueUS")]
    pub gov_revenue_us: f64,
    #[serde(default)]
    pub breakdown: Option<GovRevBreakdown>,
}

impl GovRevItem {
    pub fn multiplier(&self) -> f64 {
        ratio_or_zero(self.gov_revenue_us.max(0.0), self.bank_us.max(0.0))
    }

    /// Denominator for breakdown shares
    pub fn breakdown_total(&self) -> f64 {
        let components = self.breakdown.as_ref().map_or(0.0, |b| b.component_total());
        self.gov_revenue_us.max(components)
    }
}
