//! Main dashboard layout component

use crate::{
    DashboardConfig, FamilyLegend, FlowsHost, FunnelHost, HelpDrawer, JobsHost, MiniRibbonHost,
    RibbonHost, SectionHeader, SlopeCardRow, TabBar, ToneLegend,
};
use impact_charts::{
    LeverageRings, RegionCards, RegionTileMap, RevenueThermometers, SdgWaffles, SectorMultiples,
    TradeShareMeter,
};
use impact_core::Dataset;
use impact_state::{DashboardTab, use_app_state};
use leptos::prelude::*;

/// One dataset collection as a memoised signal; empty until a dataset loads
fn collection<T>(dataset: RwSignal<Option<Dataset>>, pick: fn(&Dataset) -> &Vec<T>) -> Signal<Vec<T>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    Memo::new(move |_| dataset.with(|d| d.as_ref().map(|d| pick(d).clone()).unwrap_or_default())).into()
}

#[component]
pub fn Dashboard(#[prop(optional)] config: Option<DashboardConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let state = use_app_state();

    view! {
        <div class="container">
            <h1 class="title">"Development Impact Dashboard"</h1>
            <p class="subtitle">
                "Headline indicators, sector and regional impact, SDG contribution and inclusion metrics."
            </p>

            <Show when=move || state.has_dataset() fallback=|| view! { <StatusBar /> }>
                <Controls />
                <FamilyLegend />
                <SlopeCardRow size=config.slope_width />
                <hr class="sep" />
                <TabBar />
                <div id="dashboard-panel" role="tabpanel"
                    aria-labelledby=move || state.ui.with(|u| format!("tab-{}", u.tab.id()))>
                    <TabPanel config=config />
                </div>
            </Show>

            <HelpDrawer />
        </div>
    }
}

/// Year selector and compare-to-previous toggle
#[component]
fn Controls() -> impl IntoView {
    let state = use_app_state();
    let ui = state.ui;
    let latest = Memo::new(move |_| {
        state
            .dataset
            .with(|d| d.as_ref().map(|d| d.year))
            .unwrap_or_else(|| ui.with(|u| u.year))
    });

    view! {
        <div class="hstack controls">
            <label class="hstack">
                <span class="caption">"Year"</span>
                <select
                    prop:value=move || ui.with(|u| u.year.to_string())
                    on:change=move |ev| {
                        if let Ok(year) = event_target_value(&ev).parse::<i32>() {
                            state.set_year(year);
                        }
                    }
                >
                    {move || {
                        ui.with(|u| u.year_options(latest.get()))
                            .into_iter()
                            .map(|y| view! { <option value=y.to_string()>{y}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
            <label class="hstack">
                <input
                    type="checkbox"
                    prop:checked=move || ui.with(|u| u.compare_previous)
                    on:change=move |ev| state.set_compare_previous(event_target_checked(&ev))
                />
                <span class="caption">"Compare to previous year"</span>
            </label>
        </div>
    }
}

/// Content of the active tab
#[component]
fn TabPanel(config: DashboardConfig) -> impl IntoView {
    let state = use_app_state();
    let dataset = state.dataset;
    let active = Memo::new(move |_| state.ui.with(|u| u.tab));

    let sectors = collection(dataset, |d| &d.sectors);
    let regions = collection(dataset, |d| &d.regions);
    let sdgs = collection(dataset, |d| &d.sdgs);
    let leverage = collection(dataset, |d| &d.leverage);
    let trade_share = collection(dataset, |d| &d.trade_share);
    let gov_revenue = collection(dataset, |d| &d.gov_revenue);
    let funnel = collection(dataset, |d| &d.sme_funnel);
    let jobs = collection(dataset, |d| &d.jobs);
    let local_content = collection(dataset, |d| &d.local_content);
    let flows = collection(dataset, |d| &d.flows);

    let stage = config.sme_rate_stage;
    let per_million = Signal::derive(move || {
        dataset.with(|d| d.as_ref().and_then(|d| d.smes_per_million(stage)))
    });

    move || {
        let tab = active.get();
        let header = view! { <SectionHeader title=tab.label() help=tab.help_topic() /> };
        let body = match tab {
            DashboardTab::Sector => view! {
                <p class="caption">"Total disbursement ($M), projects (unit strip) and jobs per $1M for each sector."</p>
                <SectorMultiples sectors=sectors />
            }
            .into_any(),
            DashboardTab::Region => view! {
                <p class="caption">"Five subregions with intra-African trade, manufactured exports, SMEs supported, jobs and disbursement."</p>
                <RegionTileMap regions=regions />
                <RegionCards regions=regions />
            }
            .into_any(),
            DashboardTab::Sdg => view! {
                <p class="caption">"Top SDGs as 10×10 waffle grids (% of projects + example project)."</p>
                <SdgWaffles stats=sdgs />
            }
            .into_any(),
            DashboardTab::Leverage => view! {
                <ToneLegend thresholds=config.leverage label="leverage bands" />
                <LeverageRings items=leverage config=config.ring_config() />
            }
            .into_any(),
            DashboardTab::TradeShare => view! { <TradeShareMeter items=trade_share /> }.into_any(),
            DashboardTab::GovRevenue => view! {
                <ToneLegend thresholds=config.gov_revenue label="revenue multiplier bands" />
                <RevenueThermometers items=gov_revenue config=config.thermometer_config() />
            }
            .into_any(),
            DashboardTab::Smes => view! {
                <FunnelHost
                    items=funnel
                    per_million=per_million
                    config=config.funnel_config()
                    size=config.funnel_width
                />
            }
            .into_any(),
            DashboardTab::Jobs => view! { <JobsHost items=jobs size=config.jobs_width /> }.into_any(),
            DashboardTab::LocalContent => view! {
                <RibbonHost points=local_content size=config.ribbon_width />
                <MiniRibbonHost points=local_content size=config.mini_width />
            }
            .into_any(),
            DashboardTab::Flows => view! { <FlowsHost edges=flows size=config.flows_width /> }.into_any(),
        };

        view! {
            <section class=format!("section {}", tab.id())>
                {header}
                {body}
            </section>
        }
    }
}

#[component]
fn StatusBar() -> impl IntoView {
    let state = use_app_state();
    let error = state.error;

    view! {
        <div class="status-bar">
            {move || match error.get() {
                Some(e) => view! {
                    <div class="sb-error" role="alert">
                        <span class="error-icon">"⚠"</span>
                        <span class="error-msg">{e}</span>
                    </div>
                }
                .into_any(),
                None => view! { <span class="caption">"Loading dataset…"</span> }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::SectorImpact;

    #[test]
    fn test_collection_tracks_dataset() {
        Owner::new().with(|| {
            let dataset = RwSignal::new(None::<Dataset>);
            let sectors = collection(dataset, |d| &d.sectors);
            assert!(sectors.get().is_empty());

            dataset.set(Some(Dataset {
                sectors: vec![SectorImpact {
                    sector: "Power".into(),
                    total_disbursement_m: 240.0,
                    number_of_projects: 10,
                    jobs_created: 6000.0,
                }],
                ..Default::default()
            }));
            assert_eq!(sectors.get().len(), 1);

            dataset.set(None);
            assert!(sectors.get().is_empty());
        });
    }
}
