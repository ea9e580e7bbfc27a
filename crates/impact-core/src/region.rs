//! Sector and region aggregates, trade share, investment flows

use crate::{percent_of, ratio_or_zero};
use serde::{Deserialize, Serialize};

// ============================================================================
// REGION
// ============================================================================

/// The five sub-regions. The set is closed; flows and tiles reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "West Africa")]
    West,
    #[serde(rename = "North Africa")]
    North,
    #[serde(rename = "Central Africa")]
    Central,
    #[serde(rename = "East Africa")]
    East,
    #[serde(rename = "Southern Africa")]
    Southern,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Self::West => "West Africa",
            Self::North => "North Africa",
            Self::Central => "Central Africa",
            Self::East => "East Africa",
            Self::Southern => "Southern Africa",
        }
    }

    /// Canonical order around the flow ring
    pub fn ring_order() -> &'static [Self] {
        &[Self::West, Self::North, Self::Central, Self::East, Self::Southern]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ring_order().iter().copied().find(|r| r.name() == name)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SECTOR / REGION IMPACT
// ============================================================================

/// Aggregate impact for one sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorImpact {
    pub sector: String,
    /// US$ millions
    pub total_disbursement_m: f64,
    pub number_of_projects: u32,
    pub jobs_created: f64,
}

impl SectorImpact {
    pub fn jobs_per_million(&self) -> f64 {
        ratio_or_zero(self.jobs_created, self.total_disbursement_m)
    }
}

/// Aggregate impact for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionImpact {
    pub region: Region,
    /// US$ millions
    pub total_disbursement_m: f64,
    pub projects: u32,
    #[serde(rename = "intraAfricanTradeUS")]
    pub intra_african_trade_us: f64,
    #[serde(rename = "manufacturedExportsUS")]
    pub manufactured_exports_us: f64,
    pub smes_supported: f64,
    pub jobs_created: f64,
}

impl RegionImpact {
    /// Larger of the two trade magnitudes (they share a scale)
    pub fn max_trade(&self) -> f64 {
        self.intra_african_trade_us.max(self.manufactured_exports_us)
    }
}

// ============================================================================
// TRADE SHARE
// ============================================================================

/// Intra-regional trade against total trade for one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeShareItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "intraUS")]
    pub intra_us: f64,
    #[serde(rename = "totalUS")]
    pub total_us: f64,
}

impl TradeShareItem {
    /// Intra amount capped at the total
    pub fn intra(&self) -> f64 {
        self.intra_us.min(self.total()).max(0.0)
    }

    pub fn total(&self) -> f64 {
        self.total_us.max(0.0)
    }

    pub fn extra(&self) -> f64 {
        (self.total() - self.intra()).max(0.0)
    }

    pub fn share_percent(&self) -> u32 {
        percent_of(self.intra(), self.total()).unwrap_or(0)
    }
}

// ============================================================================
// FLOWS
// ============================================================================

/// Directed investment flow between two regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    #[serde(rename = "fromRegion")]
    pub from: Region,
    #[serde(rename = "toRegion")]
    pub to: Region,
    #[serde(rename = "amountUS")]
    pub amount_us: f64,
}

impl FlowEdge {
    pub fn new(from: Region, to: Region, amount_us: f64) -> Self {
        Self { from, to, amount_us }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn touches(&self, region: Region) -> bool {
        self.from == region || self.to == region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_share_scenario() {
        let item = TradeShareItem {
            id: "west".into(),
            name: "West Africa".into(),
            intra_us: 320_000_000.0,
            total_us: 500_000_000.0,
        };
        assert_eq!(item.share_percent(), 64);
        assert_eq!(item.extra(), 180_000_000.0);
    }

    #[test]
    fn test_trade_share_zero_total() {
        let item = TradeShareItem {
            id: "x".into(),
            name: "x".into(),
            intra_us: 10.0,
            total_us: 0.0,
        };
        assert_eq!(item.share_percent(), 0);
        assert_eq!(item.intra(), 0.0);
    }

    #[test]
    fn test_jobs_per_million_guard() {
        let s = SectorImpact {
            sector: "Other".into(),
            total_disbursement_m: 0.0,
            number_of_projects: 0,
            jobs_created: 500.0,
        };
        assert_eq!(s.jobs_per_million(), 0.0);
    }

    #[test]
    fn test_region_names_round_trip() {
        for r in Region::ring_order() {
            assert_eq!(Region::from_name(r.name()), Some(*r));
        }
        let json = serde_json::to_string(&Region::Southern).unwrap();
        assert_eq!(json, "\"Southern Africa\"");
    }

    #[test]
    fn test_flow_edge_wire_format() {
        let edge: FlowEdge = serde_json::from_str(
            r#"{"fromRegion":"West Africa","toRegion":"East Africa","amountUS":12.5}"#,
        )
        .unwrap();
        assert_eq!(edge, FlowEdge::new(Region::West, Region::East, 12.5));
        assert!(edge.touches(Region::East));
        assert!(!edge.is_self_loop());
    }
}
