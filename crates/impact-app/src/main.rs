//! Impact Dashboard entry point

use impact_components::{Dashboard, DashboardConfig};
use impact_core::Dataset;
use impact_data::{LoadError, mock_dataset};
use impact_state::{AppState, provide_app_state};
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    init_tracing();
    tracing::info!("starting impact dashboard");
    leptos::mount::mount_to_body(App);
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {
    tracing_wasm::set_as_global_default();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}

/// Dashboard tunables shipped with the bundle
const CONFIG_JSON: &str = include_str!("../dashboard.json");

/// Parse dashboard tunables, keeping the built-in defaults when the document is unreadable
fn load_config(json: &str) -> DashboardConfig {
    DashboardConfig::from_json(json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "dashboard config rejected, using defaults");
        DashboardConfig::default()
    })
}

/// Install a loaded dataset, or surface the failure without panicking
fn install(state: AppState, loaded: Result<Dataset, LoadError>) {
    match loaded {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            tracing::error!(error = %e, "dataset rejected");
            if let LoadError::Invalid(report) = &e {
                for problem in &report.errors {
                    tracing::error!(%problem, "validation");
                }
            }
            state.set_error(e.to_string());
        }
    }
}

#[component]
fn App() -> impl IntoView {
    let state = provide_app_state();
    install(state, mock_dataset());
    let config = load_config(CONFIG_JSON);
    state.set_compare_previous(config.compare_previous);

    view! { <Dashboard config=config /> }
}
