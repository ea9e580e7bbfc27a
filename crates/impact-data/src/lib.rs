//! # impact-data
//!
//! Dataset ingestion. JSON is parsed with serde and checked with
//! [`validate_dataset`] before any chart sees it; the bundled mock snapshot
//! goes through the same path.

use impact_core::{Dataset, ValidationReport, validate_dataset};
use thiserror::Error;

/// Bundled demo snapshot
pub const MOCK_JSON: &str = include_str!("../data/mock.json");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationReport),
}

/// Parse and validate a dataset
pub fn load_dataset(json: &str) -> Result<Dataset, LoadError> {
    let dataset: Dataset = serde_json::from_str(json)?;
    validate_dataset(&dataset)?;

    tracing::debug!(
        year = dataset.year,
        sectors = dataset.sectors.len(),
        regions = dataset.regions.len(),
        flows = dataset.flows.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

pub fn mock_dataset() -> Result<Dataset, LoadError> {
    load_dataset(MOCK_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::{DataError, Region, SmeStage, TimeLabel};

    #[test]
    fn test_mock_loads() {
        let ds = mock_dataset().unwrap();
        assert_eq!(ds.year, 2025);
        assert_eq!(ds.headline.len(), 13);
        assert_eq!(ds.sectors.len(), 11);
        assert_eq!(ds.regions.len(), 5);
        assert_eq!(ds.sdgs.len(), 9);
        assert_eq!(ds.sme_funnel.len(), 4);
    }

    #[test]
    fn test_mock_covers_every_region() {
        let ds = mock_dataset().unwrap();
        for region in Region::ring_order() {
            assert!(ds.regions.iter().any(|r| r.region == *region), "{region} missing");
        }
        assert!(ds.flows.iter().any(|f| f.is_self_loop()));
    }

    #[test]
    fn test_mixed_time_labels() {
        let ds = mock_dataset().unwrap();
        assert_eq!(ds.local_content[0].t, TimeLabel::Year(2021));
        assert_eq!(ds.local_content[5].t, TimeLabel::Text("Q2-2025".into()));
    }

    #[test]
    fn test_funnel_is_monotone() {
        let ds = mock_dataset().unwrap();
        let totals: Vec<f64> = SmeStage::all()
            .iter()
            .filter_map(|s| ds.funnel_stage(*s).map(|f| f.total))
            .collect();
        assert!(totals.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_parse_error() {
        let err = load_dataset("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_invalid_dataset_rejected() {
        let json = r#"{
            "year": 2025,
            "sdgs": [{ "sdg": "SDG 8", "percentOfProjects": 140 }],
            "flows": [{ "fromRegion": "West Africa", "toRegion": "East Africa", "amountUS": -5 }]
        }"#;
        match load_dataset(json) {
            Err(LoadError::Invalid(report)) => {
                assert_eq!(report.errors.len(), 2);
                assert!(report
                    .errors
                    .iter()
                    .any(|e| matches!(e, DataError::PercentOutOfRange { .. })));
                assert!(report
                    .errors
                    .iter()
                    .any(|e| matches!(e, DataError::NegativeValue { .. })));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_region_is_parse_error() {
        let json = r#"{ "flows": [{ "fromRegion": "Atlantis", "toRegion": "East Africa", "amountUS": 1 }] }"#;
        assert!(matches!(load_dataset(json), Err(LoadError::Parse(_))));
    }
}
