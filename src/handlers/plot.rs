//! Plot dashboard handlers

use crate::Desk;
use crate::error::DeskError;
use crate::plot::{ChartSpec, Dashboard, DashboardLayout, PlotTab};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn failure_lines(failures: &[(PathBuf, DeskError)]) -> Vec<String> {
    failures
        .iter()
        .map(|(path, e)| format!("Cannot load file {}: {}", path.display(), e))
        .collect()
}

fn write_tab(tab: &PlotTab, output: &Path) -> Result<Vec<String>> {
    let rendered = tab
        .render()
        .with_context(|| format!("Failed to render {}", tab.title))?;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output, &rendered.svg)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(tab = %tab.title, path = %output.display(), "chart written");

    let mut lines = vec![format!("{}: chart written to {}", tab.title, output.display())];
    lines.extend(rendered.stats);
    Ok(lines)
}

impl Desk {
    /// Plot a batch of files in a single tab
    ///
    /// Files that fail to load are reported and skipped. Without `output` the
    /// chart goes to `chart.svg` in the configured output directory.
    pub fn handle_plot(
        &self,
        files: &[PathBuf],
        spec: ChartSpec,
        output: Option<PathBuf>,
    ) -> Result<String> {
        let mut dashboard = Dashboard::new();
        let tab = dashboard.tab_mut(0).context("Dashboard has no tab")?;
        tab.spec = spec;
        let failures = tab.load_files(files);

        let output = output.unwrap_or_else(|| self.plot_output_dir.join("chart.svg"));
        let mut lines = failure_lines(&failures);
        lines.extend(write_tab(tab, &output)?);
        Ok(lines.join("\n"))
    }

    /// Render every tab of a TOML layout to `tab-{n}.svg`
    ///
    /// Data files are resolved relative to the layout file.
    pub fn handle_plot_layout(
        &self,
        layout_path: &Path,
        output_dir: Option<PathBuf>,
    ) -> Result<String> {
        let layout = DashboardLayout::load(layout_path)
            .with_context(|| format!("Failed to read layout {}", layout_path.display()))?;
        let base_dir = layout_path.parent().unwrap_or(Path::new(""));
        let (dashboard, failures) = Dashboard::from_layout(&layout, base_dir);

        let output_dir = output_dir.unwrap_or_else(|| self.plot_output_dir.clone());
        let mut lines = failure_lines(&failures);
        for (i, tab) in dashboard.tabs().iter().enumerate() {
            let output = output_dir.join(format!("tab-{}.svg", i + 1));
            lines.extend(write_tab(tab, &output)?);
        }
        Ok(lines.join("\n"))
    }
}
