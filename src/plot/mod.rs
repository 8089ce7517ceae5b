//! Plot dashboard
//!
//! - `dataset`: two-column numeric files and the color palette
//! - `regression`: least-squares line fit
//! - `histogram`: equal-width binning
//! - `chart`: SVG rendering with plotters
//! - `dashboard`: tabs, batch loading and TOML layouts

mod chart;
mod dashboard;
mod dataset;
mod histogram;
mod regression;

pub use chart::{CHART_SIZE, ChartSpec, PlotKind, RenderedChart, render_svg};
pub use dashboard::{Dashboard, DashboardLayout, PlotTab, TabLayout};
pub use dataset::{Dataset, PALETTE, color_for, parse_points};
pub use histogram::{Bin, DEFAULT_BINS, histogram};
pub use regression::{Regression, linear_regression};
