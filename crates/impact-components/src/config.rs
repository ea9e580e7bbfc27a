//! Dashboard-level configuration

use impact_charts::{FunnelConfig, RingConfig, ThermometerConfig, WidthObserverConfig};
use impact_core::{SmeStage, Thresholds};
use serde::{Deserialize, Serialize};

/// Initial and minimum width for one chart host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostWidth {
    pub initial: f64,
    pub min: f64,
}

impl HostWidth {
    pub const fn new(initial: f64, min: f64) -> Self {
        Self { initial, min }
    }

    pub fn observer(&self) -> WidthObserverConfig {
        WidthObserverConfig::new(self.initial, self.min)
    }
}

/// Tunables the dashboard hands to its charts.
///
/// Every field has a default, so a partial JSON document such as
/// `{"leverage": {"min": 2.5, "good": 4.0}}` is enough to override one knob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub leverage: Thresholds,
    pub gov_revenue: Thresholds,
    /// Funnel stage behind the SMEs-per-$1M micro-stat
    pub sme_rate_stage: SmeStage,
    pub compare_previous: bool,
    pub slope_width: HostWidth,
    pub funnel_width: HostWidth,
    pub flows_width: HostWidth,
    pub ribbon_width: HostWidth,
    pub mini_width: HostWidth,
    pub jobs_width: HostWidth,
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn ring_config(&self) -> RingConfig {
        RingConfig {
            thresholds: self.leverage,
            ..RingConfig::default()
        }
    }

    pub fn thermometer_config(&self) -> ThermometerConfig {
        ThermometerConfig {
            thresholds: self.gov_revenue,
            ..ThermometerConfig::default()
        }
    }

    pub fn funnel_config(&self) -> FunnelConfig {
        FunnelConfig {
            rate_stage: self.sme_rate_stage,
            ..FunnelConfig::default()
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            leverage: Thresholds::leverage(),
            gov_revenue: Thresholds::gov_revenue(),
            sme_rate_stage: SmeStage::Active,
            compare_previous: true,
            slope_width: HostWidth::new(260.0, 220.0),
            funnel_width: HostWidth::new(320.0, 0.0),
            flows_width: HostWidth::new(360.0, 0.0),
            ribbon_width: HostWidth::new(600.0, 0.0),
            mini_width: HostWidth::new(240.0, 0.0),
            jobs_width: HostWidth::new(320.0, 220.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = DashboardConfig::default();
        assert_eq!(c.leverage, Thresholds::new(3.0, 4.5));
        assert_eq!(c.gov_revenue, Thresholds::new(2.0, 4.0));
        assert_eq!(c.sme_rate_stage, SmeStage::Active);
        assert!(c.compare_previous);
    }

    #[test]
    fn test_partial_json_overrides() {
        let c = DashboardConfig::from_json(
            r#"{ "leverage": { "min": 2.5 }, "smeRateStage": "disbursed", "comparePrevious": false }"#,
        )
        .unwrap();
        assert_eq!(c.leverage.min, 2.5);
        assert_eq!(c.leverage.good, 4.5);
        assert_eq!(c.sme_rate_stage, SmeStage::Disbursed);
        assert!(!c.compare_previous);
        assert_eq!(c.gov_revenue, Thresholds::gov_revenue());
    }

    #[test]
    fn test_thresholds_reach_charts() {
        let c = DashboardConfig {
            leverage: Thresholds::new(1.0, 2.0),
            ..Default::default()
        };
        assert_eq!(c.ring_config().thresholds, Thresholds::new(1.0, 2.0));
        assert_eq!(c.thermometer_config().thresholds, Thresholds::gov_revenue());
        assert_eq!(c.funnel_config().rate_stage, SmeStage::Active);
    }

    #[test]
    fn test_bad_json() {
        assert!(DashboardConfig::from_json("[1, 2]").is_err());
    }
}
