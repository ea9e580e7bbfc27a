//! Headline metric records (slope/dumbbell cards)

use crate::{CompactCurrencyFormatter, CompactNumberFormatter, ValueFormatter, colors};
use serde::{Deserialize, Serialize};

/// Closed set of headline indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    TotalAmountDisbursed,
    InvestmentAttracted,
    ProjectsFundedTotal,
    ProjectsFundedNew,
    ProjectsFundedExisting,
    IntraAfricanTradeFacilitated,
    ManufacturedExportsFacilitated,
    PaymentServicesAccessingEntities,
    SmesConnectedToMarkets,
    BanksOnboarded,
    JobsCreatedSustained,
    PeopleBenefited,
    #[serde(rename = "subLoansToSMEs")]
    SubLoansToSmes,
    LocalContent,
}

/// Unit of a headline value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "US$")]
    Usd,
    #[serde(rename = "count")]
    Count,
}

impl Unit {
    /// Formatter matching the unit
    pub fn formatter(&self) -> &'static dyn ValueFormatter {
        match self {
            Self::Usd => &CompactCurrencyFormatter,
            Self::Count => &CompactNumberFormatter,
        }
    }

    pub fn format(&self, value: f64) -> String {
        self.formatter().format(value)
    }
}

/// Metric family (drives the accent colour)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricFamily {
    Money,
    Projects,
    Trade,
    Jobs,
}

impl MetricFamily {
    pub fn accent(&self) -> &'static str {
        match self {
            Self::Money => colors::ACCENT,
            Self::Projects => colors::ACCENT_2,
            Self::Trade => colors::ACCENT_3,
            Self::Jobs => colors::ACCENT_4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Money => "Money",
            Self::Projects => "Projects",
            Self::Trade => "Trade",
            Self::Jobs => "Jobs",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::Projects => "projects",
            Self::Trade => "trade",
            Self::Jobs => "jobs",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Money, Self::Projects, Self::Trade, Self::Jobs]
    }
}

/// Direction of change between periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaDirection {
    Up,
    Down,
}

impl DeltaDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Up => "delta-up",
            Self::Down => "delta-down",
        }
    }
}

/// One headline metric, previous vs current period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDatum {
    pub key: MetricKey,
    pub label: String,
    pub unit: Unit,
    pub current: f64,
    pub previous: f64,
    pub family: MetricFamily,
}

impl MetricDatum {
    /// Percentage change from previous to current.
    ///
    /// A zero `previous` yields `0.0` by convention, which also hides the
    /// "new metric" case where current is positive.
    pub fn delta_percent(&self) -> f64 {
        if self.previous == 0.0 {
            return 0.0;
        }
        let d = (self.current - self.previous) / self.previous * 100.0;
        if d.is_finite() { d } else { 0.0 }
    }

    pub fn direction(&self) -> DeltaDirection {
        if self.delta_percent() >= 0.0 {
            DeltaDirection::Up
        } else {
            DeltaDirection::Down
        }
    }

    /// Badge text, e.g. "▼ 11.4%"
    pub fn delta_label(&self) -> String {
        format!("{} {:.1}%", self.direction().arrow(), self.delta_percent().abs())
    }

    /// Copy with the comparison period collapsed onto the current value
    pub fn without_comparison(&self) -> Self {
        Self {
            previous: self.current,
            ..self.clone()
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        self.unit.format(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disbursed() -> MetricDatum {
        MetricDatum {
            key: MetricKey::TotalAmountDisbursed,
            label: "Total Amount Disbursed (US$)".into(),
            unit: Unit::Usd,
            current: 1_240_000_000.0,
            previous: 1_400_000_000.0,
            family: MetricFamily::Money,
        }
    }

    #[test]
    fn test_delta_down() {
        let d = disbursed();
        assert!((d.delta_percent() - (-11.428571)).abs() < 1e-4);
        assert_eq!(d.direction(), DeltaDirection::Down);
        assert_eq!(d.delta_label(), "▼ 11.4%");
    }

    #[test]
    fn test_zero_previous_is_flat() {
        let d = MetricDatum { previous: 0.0, ..disbursed() };
        assert_eq!(d.delta_percent(), 0.0);
        assert_eq!(d.direction(), DeltaDirection::Up);
    }

    #[test]
    fn test_without_comparison() {
        let d = disbursed().without_comparison();
        assert_eq!(d.previous, d.current);
        assert_eq!(d.delta_percent(), 0.0);
    }

    #[test]
    fn test_unit_format() {
        let d = disbursed();
        assert_eq!(d.format_value(d.current), "$1.2B");
        assert_eq!(Unit::Count.format(48_500.0), "48.5K");
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&disbursed()).unwrap();
        assert!(json.contains("\"key\":\"totalAmountDisbursed\""));
        assert!(json.contains("\"unit\":\"US$\""));
        assert!(json.contains("\"family\":\"money\""));
    }
}
