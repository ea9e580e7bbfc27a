//! The full dashboard dataset: one snapshot of every collection

use crate::{
    FlowEdge, GovRevItem, JobsByDemoItem, LeverageItem, LocalContentPoint, MetricDatum,
    RegionImpact, SdgStat, SectorImpact, SmeFunnelItem, SmeStage, TradeShareItem, ratio_or_zero,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub year: i32,
    /// Total US$ invested, denominator for the SMEs-per-$1M micro-stat
    #[serde(rename = "totalInvestmentUS")]
    pub total_investment_us: f64,
    pub headline: Vec<MetricDatum>,
    pub sectors: Vec<SectorImpact>,
    pub regions: Vec<RegionImpact>,
    pub sdgs: Vec<SdgStat>,
    pub leverage: Vec<LeverageItem>,
    pub gov_revenue: Vec<GovRevItem>,
    pub trade_share: Vec<TradeShareItem>,
    pub flows: Vec<FlowEdge>,
    pub sme_funnel: Vec<SmeFunnelItem>,
    pub jobs: Vec<JobsByDemoItem>,
    pub local_content: Vec<LocalContentPoint>,
}

impl Dataset {
    /// Headline metrics, with the previous period collapsed when comparison is off
    pub fn headline_view(&self, compare_previous: bool) -> Vec<MetricDatum> {
        if compare_previous {
            self.headline.clone()
        } else {
            self.headline.iter().map(MetricDatum::without_comparison).collect()
        }
    }

    pub fn funnel_stage(&self, stage: SmeStage) -> Option<&SmeFunnelItem> {
        self.sme_funnel.iter().find(|f| f.stage == stage)
    }

    /// SMEs at `stage` per US$1M invested, `None` when nothing was invested
    pub fn smes_per_million(&self, stage: SmeStage) -> Option<f64> {
        let millions = self.total_investment_us / 1e6;
        if millions <= 0.0 {
            return None;
        }
        let total = self.funnel_stage(stage).map_or(0.0, |f| f.total);
        Some(ratio_or_zero(total, millions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MetricFamily, MetricKey, Unit};

    fn sample() -> Dataset {
        Dataset {
            year: 2025,
            total_investment_us: 250_000_000.0,
            headline: vec![MetricDatum {
                key: MetricKey::JobsCreatedSustained,
                label: "Jobs".into(),
                unit: Unit::Count,
                current: 48_500.0,
                previous: 42_000.0,
                family: MetricFamily::Jobs,
            }],
            sme_funnel: vec![SmeFunnelItem {
                stage: SmeStage::Active,
                total: 480.0,
                women_led: None,
                youth_led: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_headline_view_toggle() {
        let ds = sample();
        assert_eq!(ds.headline_view(true)[0].previous, 42_000.0);
        assert_eq!(ds.headline_view(false)[0].previous, 48_500.0);
    }

    #[test]
    fn test_smes_per_million() {
        let ds = sample();
        assert!((ds.smes_per_million(SmeStage::Active).unwrap() - 1.92).abs() < 1e-9);
        assert_eq!(ds.smes_per_million(SmeStage::Eligible), Some(0.0));
        let broke = Dataset { total_investment_us: 0.0, ..sample() };
        assert_eq!(broke.smes_per_million(SmeStage::Active), None);
    }

    #[test]
    fn test_missing_collections_default() {
        let ds: Dataset = serde_json::from_str(r#"{"year":2024}"#).unwrap();
        assert_eq!(ds.year, 2024);
        assert!(ds.flows.is_empty());
    }
}
