//! Ingestion-boundary validation.
//!
//! Charts never fail on bad numbers, they guard and fall back. Problems in the
//! data itself are caught here, once, before anything is rendered.

use crate::{Dataset, SmeStage};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("{field} is negative ({value})")]
    NegativeValue { field: String, value: f64 },

    #[error("{field} is not a finite number")]
    NonFinite { field: String },

    #[error("{sdg}: percent of projects {value} is outside 0..=100")]
    PercentOutOfRange { sdg: String, value: f64 },

    #[error("{scope}: {field} ({subset}) exceeds total ({total})")]
    SubsetExceedsTotal {
        scope: String,
        field: &'static str,
        subset: f64,
        total: f64,
    },

    #[error("funnel stage {0} appears more than once")]
    DuplicateStage(SmeStage),
}

/// Every problem found in one dataset
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("dataset failed validation with {} problem(s)", .errors.len())]
pub struct ValidationReport {
    pub errors: Vec<DataError>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn magnitude(&mut self, field: impl Into<String>, value: f64) {
        if !value.is_finite() {
            self.errors.push(DataError::NonFinite { field: field.into() });
        } else if value < 0.0 {
            self.errors.push(DataError::NegativeValue {
                field: field.into(),
                value,
            });
        }
    }

    fn subset(&mut self, scope: &str, field: &'static str, subset: f64, total: f64) {
        if subset > total {
            self.errors.push(DataError::SubsetExceedsTotal {
                scope: scope.to_string(),
                field,
                subset,
                total,
            });
        }
    }
}

/// Check every magnitude, percentage and subset relation in `ds`
pub fn validate_dataset(ds: &Dataset) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::default();

    report.magnitude("totalInvestmentUS", ds.total_investment_us);

    for m in &ds.headline {
        report.magnitude(format!("headline.{:?}.current", m.key), m.current);
        report.magnitude(format!("headline.{:?}.previous", m.key), m.previous);
    }

    for s in &ds.sectors {
        report.magnitude(format!("sectors.{}.totalDisbursementM", s.sector), s.total_disbursement_m);
        report.magnitude(format!("sectors.{}.jobsCreated", s.sector), s.jobs_created);
    }

    for r in &ds.regions {
        let name = r.region.name();
        report.magnitude(format!("regions.{}.totalDisbursementM", name), r.total_disbursement_m);
        report.magnitude(format!("regions.{}.intraAfricanTradeUS", name), r.intra_african_trade_us);
        report.magnitude(format!("regions.{}.manufacturedExportsUS", name), r.manufactured_exports_us);
        report.magnitude(format!("regions.{}.smesSupported", name), r.smes_supported);
        report.magnitude(format!("regions.{}.jobsCreated", name), r.jobs_created);
    }

    for s in &ds.sdgs {
        let p = s.percent_of_projects;
        if !p.is_finite() || !(0.0..=100.0).contains(&p) {
            report.errors.push(DataError::PercentOutOfRange {
                sdg: s.sdg.clone(),
                value: p,
            });
        }
    }

    for l in &ds.leverage {
        report.magnitude(format!("leverage.{}.bankUS", l.id), l.bank_us);
        report.magnitude(format!("leverage.{}.otherUS", l.id), l.other_us);
    }

    for g in &ds.gov_revenue {
        report.magnitude(format!("govRevenue.{}.bankUS", g.id), g.bank_us);
        report.magnitude(format!("govRevenue.{}.govRevenueUS", g.id), g.gov_revenue_us);
        if let Some(b) = &g.breakdown {
            for (label, v) in b.rows() {
                report.magnitude(format!("govRevenue.{}.breakdown.{}", g.id, label), v);
            }
        }
    }

    for t in &ds.trade_share {
        report.magnitude(format!("tradeShare.{}.intraUS", t.id), t.intra_us);
        report.magnitude(format!("tradeShare.{}.totalUS", t.id), t.total_us);
        report.subset(&t.name, "intraUS", t.intra_us, t.total_us);
    }

    for f in &ds.flows {
        report.magnitude(format!("flows.{}->{}", f.from.name(), f.to.name()), f.amount_us);
    }

    let mut seen = HashSet::new();
    for f in &ds.sme_funnel {
        if !seen.insert(f.stage) {
            report.errors.push(DataError::DuplicateStage(f.stage));
        }
        let scope = f.stage.label();
        report.magnitude(format!("smeFunnel.{}.total", scope), f.total);
        if let Some(w) = f.women_led {
            report.magnitude(format!("smeFunnel.{}.womenLed", scope), w);
            report.subset(scope, "womenLed", w, f.total);
        }
        if let Some(y) = f.youth_led {
            report.magnitude(format!("smeFunnel.{}.youthLed", scope), y);
            report.subset(scope, "youthLed", y, f.total);
        }
    }

    for j in &ds.jobs {
        report.magnitude(format!("jobs.{}.total", j.scope_id), j.total);
        report.magnitude(format!("jobs.{}.women", j.scope_id), j.women);
        report.magnitude(format!("jobs.{}.youth", j.scope_id), j.youth);
        report.subset(&j.scope_name, "women", j.women, j.total);
        report.subset(&j.scope_name, "youth", j.youth, j.total);
    }

    for p in &ds.local_content {
        report.magnitude(format!("localContent.{}.domesticUS", p.t), p.domestic_us);
        report.magnitude(format!("localContent.{}.importedUS", p.t), p.imported_us);
    }

    if report.is_empty() {
        tracing::debug!(year = ds.year, "dataset validated");
        Ok(())
    } else {
        for e in &report.errors {
            tracing::warn!(error = %e, "invalid dataset entry");
        }
        Err(report)
    }
}
