//! # impact-state
//!
//! Reactive state for the Impact Dashboard.
//! Global UI state lives in Leptos signals provided through context; chart
//! interaction state (flow focus, thresholds) is plain data reduced in place.

pub mod flow;

pub use flow::*;

use impact_core::{Dataset, HelpKey, HelpTopic, MetricDatum};
use leptos::prelude::*;

// ============================================================================
// TABS
// ============================================================================

/// Dashboard sections, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardTab {
    #[default]
    Sector,
    Region,
    Sdg,
    Leverage,
    TradeShare,
    GovRevenue,
    Smes,
    Jobs,
    LocalContent,
    Flows,
}

impl DashboardTab {
    pub fn all() -> &'static [Self] {
        &[
            Self::Sector,
            Self::Region,
            Self::Sdg,
            Self::Leverage,
            Self::TradeShare,
            Self::GovRevenue,
            Self::Smes,
            Self::Jobs,
            Self::LocalContent,
            Self::Flows,
        ]
    }

    /// Stable id used for element ids and aria wiring
    pub fn id(&self) -> &'static str {
        match self {
            Self::Sector => "sector",
            Self::Region => "region",
            Self::Sdg => "sdg",
            Self::Leverage => "leverage",
            Self::TradeShare => "trade-share",
            Self::GovRevenue => "gov-revenue",
            Self::Smes => "smes",
            Self::Jobs => "jobs",
            Self::LocalContent => "local-content",
            Self::Flows => "flows",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sector => "Impact by Sector",
            Self::Region => "Impact by Region",
            Self::Sdg => "SDG Contribution",
            Self::Leverage => "Catalytic Leverage",
            Self::TradeShare => "Intra-African Trade Share",
            Self::GovRevenue => "Government Revenue",
            Self::Smes => "SME Participation",
            Self::Jobs => "Inclusive Jobs",
            Self::LocalContent => "Local Content",
            Self::Flows => "Investment Flows",
        }
    }

    pub fn help_topic(&self) -> HelpTopic {
        match self {
            Self::Sector => HelpTopic::ImpactBySector,
            Self::Region => HelpTopic::ImpactByRegion,
            Self::Sdg => HelpTopic::SdgContribution,
            Self::Leverage => HelpTopic::CatalyticLeverage,
            Self::TradeShare => HelpTopic::IntraAfricanTradeShare,
            Self::GovRevenue => HelpTopic::GovernmentRevenueMultiplier,
            Self::Smes => HelpTopic::SmeParticipationFunnel,
            Self::Jobs => HelpTopic::InclusiveJobs,
            Self::LocalContent => HelpTopic::LocalContent,
            Self::Flows => HelpTopic::IntraInvestmentFlows,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.id() == id)
    }
}

// ============================================================================
// UI STATE
// ============================================================================

/// Global UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub year: i32,
    pub compare_previous: bool,
    pub tab: DashboardTab,
    /// Topic shown in the help drawer; `None` when closed
    pub help: Option<HelpKey>,
}

impl UiState {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            compare_previous: true,
            tab: DashboardTab::default(),
            help: None,
        }
    }

    /// Reporting year and the one before it
    pub fn year_options(&self, latest: i32) -> [i32; 2] {
        [latest, latest - 1]
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(0)
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state with reactive signals
#[derive(Clone, Copy)]
pub struct AppState {
    /// Validated dataset; `None` until loaded or when loading failed
    pub dataset: RwSignal<Option<Dataset>>,
    pub ui: RwSignal<UiState>,
    /// Current error message
    pub error: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            dataset: RwSignal::new(None),
            ui: RwSignal::new(UiState::default()),
            error: RwSignal::new(None),
        }
    }

    // ========================================================================
    // Dataset
    // ========================================================================

    /// Install a validated dataset and move the year selector to its year
    pub fn set_dataset(&self, dataset: Dataset) {
        let year = dataset.year;
        tracing::debug!(year, "dataset installed");
        self.dataset.set(Some(dataset));
        self.ui.update(|ui| ui.year = year);
        self.error.set(None);
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.with(|d| d.is_some())
    }

    /// Headline metrics honouring the compare toggle
    pub fn headline(&self) -> Vec<MetricDatum> {
        let compare = self.ui.with(|ui| ui.compare_previous);
        self.dataset
            .with(|d| d.as_ref().map(|d| d.headline_view(compare)))
            .unwrap_or_default()
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    pub fn set_error(&self, msg: impl Into<String>) {
        self.error.set(Some(msg.into()));
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    pub fn has_error(&self) -> bool {
        self.error.with(|e| e.is_some())
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub fn select_tab(&self, tab: DashboardTab) {
        tracing::trace!(tab = tab.id(), "tab selected");
        self.ui.update(|ui| ui.tab = tab);
    }

    pub fn set_year(&self, year: i32) {
        self.ui.update(|ui| ui.year = year);
    }

    pub fn set_compare_previous(&self, compare: bool) {
        self.ui.update(|ui| ui.compare_previous = compare);
    }

    pub fn open_help(&self, key: impl Into<HelpKey>) {
        let key = key.into();
        self.ui.update(|ui| ui.help = Some(key));
    }

    pub fn close_help(&self) {
        self.ui.update(|ui| ui.help = None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide app state context to component tree
pub fn provide_app_state() -> AppState {
    let state = AppState::new();
    provide_context(state);
    state
}

/// Use app state from context
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

/// Try to get app state from context (returns None if not provided)
pub fn try_use_app_state() -> Option<AppState> {
    use_context::<AppState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_core::{MetricFamily, MetricKey, Unit};

    #[test]
    fn test_tab_ids_round_trip() {
        for tab in DashboardTab::all() {
            assert_eq!(DashboardTab::from_id(tab.id()), Some(*tab));
        }
        assert_eq!(DashboardTab::all().len(), HelpTopic::all().len());
        assert_eq!(DashboardTab::from_id("nope"), None);
    }

    #[test]
    fn test_every_tab_has_distinct_topic() {
        let topics: std::collections::HashSet<_> =
            DashboardTab::all().iter().map(|t| t.help_topic()).collect();
        assert_eq!(topics.len(), DashboardTab::all().len());
    }

    #[test]
    fn test_ui_defaults() {
        let ui = UiState::new(2024);
        assert!(ui.compare_previous);
        assert_eq!(ui.tab, DashboardTab::Sector);
        assert_eq!(ui.help, None);
        assert_eq!(ui.year_options(2024), [2024, 2023]);
    }

    #[test]
    fn test_app_state_signals() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AppState::new();
            assert!(!state.has_dataset());
            assert!(state.headline().is_empty());

            let dataset = Dataset {
                year: 2024,
                headline: vec![MetricDatum {
                    key: MetricKey::JobsCreatedSustained,
                    label: "Jobs Created/Sustained".into(),
                    unit: Unit::Count,
                    current: 120.0,
                    previous: 100.0,
                    family: MetricFamily::Jobs,
                }],
                ..Dataset::default()
            };
            state.set_dataset(dataset);
            assert_eq!(state.ui.get_untracked().year, 2024);
            assert_eq!(state.headline()[0].previous, 100.0);

            state.set_compare_previous(false);
            assert_eq!(state.headline()[0].previous, 120.0);

            state.open_help(HelpTopic::LocalContent);
            assert_eq!(
                state.ui.get_untracked().help,
                Some(HelpKey::Topic(HelpTopic::LocalContent))
            );
            state.close_help();
            assert_eq!(state.ui.get_untracked().help, None);

            state.set_error("bad data");
            assert!(state.has_error());
            state.clear_error();
            assert!(!state.has_error());
        });
    }
}
