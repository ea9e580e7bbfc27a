//! # impact-components
//!
//! Composition shell for the dashboard: layout, tabs, section headers, the
//! help drawer and the width-observing hosts around each chart.

pub mod config;
pub mod dashboard;
pub mod help_drawer;
pub mod hosts;
pub mod section;
pub mod tabs;

pub use config::*;
pub use dashboard::*;
pub use help_drawer::*;
pub use hosts::*;
pub use section::*;
pub use tabs::*;
