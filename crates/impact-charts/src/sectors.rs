//! Sector small multiples on a shared disbursement scale

use crate::{
    chartkit::{Scale, magnitude_scale},
    colors,
};
use impact_core::{SectorImpact, format_number_compact};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorConfig {
    pub bar_span: f64,
    pub track_width: f64,
    pub max_dots: u32,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            bar_span: 180.0,
            track_width: 200.0,
            max_dots: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorPanel {
    pub sector: String,
    pub bar_width: f64,
    pub disbursement_label: String,
    pub projects_label: String,
    pub dots: u32,
    pub jobs_per_million: String,
}

pub fn layout_sectors(sectors: &[SectorImpact], config: &SectorConfig) -> Vec<SectorPanel> {
    let max = sectors
        .iter()
        .map(|s| s.total_disbursement_m)
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);
    let x = magnitude_scale(max, config.bar_span);

    sectors
        .iter()
        .map(|s| SectorPanel {
            sector: s.sector.clone(),
            bar_width: x.scale(s.total_disbursement_m),
            disbursement_label: format!("{:.0}M", s.total_disbursement_m),
            projects_label: format!("{} projects", s.number_of_projects),
            dots: s.number_of_projects.min(config.max_dots),
            jobs_per_million: format_number_compact(s.jobs_per_million()),
        })
        .collect()
}

#[component]
pub fn SectorMultiples(
    #[prop(into)] sectors: Signal<Vec<SectorImpact>>,
    #[prop(optional)] config: Option<SectorConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let panels = Memo::new(move |_| sectors.with(|s| layout_sectors(s, &config)));

    view! {
        <div class="grid cols-3">
            {move || {
                panels
                    .get()
                    .into_iter()
                    .map(|p| view! {
                        <div class="panel">
                            <div class="hstack spread">
                                <strong>{p.sector.clone()}</strong>
                                <span class="caption">{p.projects_label.clone()}</span>
                            </div>
                            <div class="block">
                                <div class="caption">"Total Disbursement ($M)"</div>
                                <div class="track" style=format!("width:{}px", config.track_width)>
                                    <div class="fill" style=format!("width:{}px;background:{}", p.bar_width, colors::ACCENT) />
                                </div>
                                <div class="caption">{p.disbursement_label.clone()}</div>
                            </div>
                            <div class="block">
                                <div class="caption">"Projects (unit strip)"</div>
                                <div class="hstack wrap unit-strip">
                                    {(0..p.dots)
                                        .map(|_| view! { <i class="unit" style=format!("background:{}", colors::ACCENT_2) /> })
                                        .collect_view()}
                                </div>
                            </div>
                            <div class="block">
                                <div class="caption">"Jobs per $1M"</div>
                                <div class="hstack" role="figure" aria-label="Jobs per million US$">
                                    <strong style=format!("color:{}", colors::ACCENT_4)>{p.jobs_per_million.clone()}</strong>
                                </div>
                            </div>
                        </div>
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(name: &str, disb: f64, projects: u32, jobs: f64) -> SectorImpact {
        SectorImpact {
            sector: name.into(),
            total_disbursement_m: disb,
            number_of_projects: projects,
            jobs_created: jobs,
        }
    }

    #[test]
    fn test_shared_scale() {
        let p = layout_sectors(
            &[sector("Energy", 900.0, 12, 45_000.0), sector("Agriculture", 450.0, 55, 9_000.0)],
            &SectorConfig::default(),
        );
        assert_eq!(p[0].bar_width, 180.0);
        assert_eq!(p[1].bar_width, 90.0);
        assert_eq!(p[0].disbursement_label, "900M");
        assert_eq!(p[1].projects_label, "55 projects");
    }

    #[test]
    fn test_dots_capped() {
        let p = layout_sectors(&[sector("Agriculture", 450.0, 55, 9_000.0)], &SectorConfig::default());
        assert_eq!(p[0].dots, 40);
    }

    #[test]
    fn test_jobs_per_million() {
        let p = layout_sectors(
            &[sector("Energy", 900.0, 12, 45_000.0), sector("Pilot", 0.0, 1, 300.0)],
            &SectorConfig::default(),
        );
        assert_eq!(p[0].jobs_per_million, "50");
        assert_eq!(p[1].jobs_per_million, "0");
        assert_eq!(p[1].bar_width, 0.0);
    }

    #[test]
    fn test_all_zero_disbursement() {
        let p = layout_sectors(&[sector("A", 0.0, 0, 0.0)], &SectorConfig::default());
        assert_eq!(p[0].bar_width, 0.0);
        assert_eq!(p[0].dots, 0);
    }
}
