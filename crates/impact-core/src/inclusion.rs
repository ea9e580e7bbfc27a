//! SME participation, inclusive jobs, SDG tagging and local content

use crate::ratio_or_zero;
use serde::{Deserialize, Serialize};

// ============================================================================
// SME FUNNEL
// ============================================================================

/// Funnel stage, ordered from first contact to active portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmeStage {
    Eligible,
    Approved,
    Disbursed,
    Active,
}

impl SmeStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Eligible => "Eligible",
            Self::Approved => "Approved",
            Self::Disbursed => "Disbursed",
            Self::Active => "Active",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Eligible, Self::Approved, Self::Disbursed, Self::Active]
    }
}

impl std::fmt::Display for SmeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmeFunnelItem {
    pub stage: SmeStage,
    pub total: f64,
    #[serde(default)]
    pub women_led: Option<f64>,
    #[serde(default)]
    pub youth_led: Option<f64>,
}

impl SmeFunnelItem {
    /// Women-led count capped at the stage total
    pub fn women_led_capped(&self) -> Option<f64> {
        self.women_led.map(|v| v.min(self.total))
    }

    pub fn youth_led_capped(&self) -> Option<f64> {
        self.youth_led.map(|v| v.min(self.total))
    }
}

// ============================================================================
// INCLUSIVE JOBS
// ============================================================================

/// Jobs split by sex with a youth overlay. Youth overlaps both sexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsByDemoItem {
    pub scope_id: String,
    pub scope_name: String,
    pub total: f64,
    pub women: f64,
    pub youth: f64,
    #[serde(default)]
    pub period: Option<String>,
}

impl JobsByDemoItem {
    pub fn men(&self) -> f64 {
        (self.total - self.women).max(0.0)
    }

    pub fn women_share(&self) -> f64 {
        ratio_or_zero(self.women, self.total)
    }

    pub fn men_share(&self) -> f64 {
        ratio_or_zero(self.men(), self.total)
    }

    pub fn youth_share(&self) -> f64 {
        ratio_or_zero(self.youth, self.total)
    }
}

// ============================================================================
// SDG
// ============================================================================

/// Share of projects tagged with one SDG. Tags are not exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdgStat {
    pub sdg: String,
    pub percent_of_projects: f64,
    #[serde(default)]
    pub example_project: Option<String>,
}

/// Sum of tagged percentages. Exceeds 100 whenever projects carry several goals.
pub fn total_percent(stats: &[SdgStat]) -> f64 {
    stats.iter().map(|s| s.percent_of_projects).sum()
}

// ============================================================================
// LOCAL CONTENT
// ============================================================================

/// Period label, either a year or free text such as "Q1-2025"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeLabel {
    Year(i64),
    Text(String),
}

impl std::fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{}", y),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalContentPoint {
    pub t: TimeLabel,
    #[serde(rename = "domesticUS")]
    pub domestic_us: f64,
    #[serde(rename = "importedUS")]
    pub imported_us: f64,
}

impl LocalContentPoint {
    pub fn total(&self) -> f64 {
        self.domestic_us + self.imported_us
    }

    pub fn domestic_share(&self) -> f64 {
        ratio_or_zero(self.domestic_us, self.total())
    }

    pub fn imported_share(&self) -> f64 {
        ratio_or_zero(self.imported_us, self.total())
    }
}
