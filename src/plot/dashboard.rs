use super::chart::{ChartSpec, RenderedChart, render_svg};
use super::dataset::Dataset;
use crate::error::{DeskError, DeskResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One plotting view: its datasets and presentation settings
#[derive(Debug, Clone, Default)]
pub struct PlotTab {
    pub title: String,
    pub spec: ChartSpec,
    datasets: Vec<Dataset>,
}

impl PlotTab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Add a dataset; one with the same name is replaced where it stands
    pub fn insert_dataset(&mut self, dataset: Dataset) {
        match self.datasets.iter_mut().find(|d| d.name == dataset.name) {
            Some(existing) => *existing = dataset,
            None => self.datasets.push(dataset),
        }
    }

    /// Load a batch of files, coloring them by their position in the batch
    ///
    /// Files that fail to load are returned with their error; the rest of the
    /// batch is still loaded.
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<(PathBuf, DeskError)> {
        let mut failures = Vec::new();
        for (i, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            match Dataset::from_csv(path, i) {
                Ok(dataset) => {
                    debug!(path = %path.display(), points = dataset.points.len(), "loaded dataset");
                    self.insert_dataset(dataset);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load dataset");
                    failures.push((path.to_path_buf(), e));
                }
            }
        }
        failures
    }

    pub fn render(&self) -> DeskResult<RenderedChart> {
        render_svg(&self.spec, &self.datasets)
    }
}

/// Ordered set of tabs; never empty
#[derive(Debug, Clone)]
pub struct Dashboard {
    tabs: Vec<PlotTab>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// A dashboard starts with a single empty tab
    pub fn new() -> Self {
        let mut dashboard = Self { tabs: Vec::new() };
        dashboard.add_tab();
        dashboard
    }

    pub fn tabs(&self) -> &[PlotTab] {
        &self.tabs
    }

    pub fn tab_mut(&mut self, index: usize) -> Option<&mut PlotTab> {
        self.tabs.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Append a tab titled `Tab {n}` and return it
    pub fn add_tab(&mut self) -> &mut PlotTab {
        let title = format!("Tab {}", self.tabs.len() + 1);
        self.tabs.push(PlotTab::new(title));
        let last = self.tabs.len() - 1;
        &mut self.tabs[last]
    }

    /// Close the tab at `index`; the last remaining tab cannot be closed
    pub fn close_tab(&mut self, index: usize) -> DeskResult<PlotTab> {
        if self.tabs.len() <= 1 {
            return Err(DeskError::invalid("Cannot close the last tab"));
        }
        if index >= self.tabs.len() {
            return Err(DeskError::invalid(format!("No tab at index {}", index)));
        }
        Ok(self.tabs.remove(index))
    }

    /// Build a dashboard from a layout, loading every tab's files
    ///
    /// Relative file paths are resolved against `base_dir`.
    pub fn from_layout(
        layout: &DashboardLayout,
        base_dir: &Path,
    ) -> (Self, Vec<(PathBuf, DeskError)>) {
        let mut dashboard = Self { tabs: Vec::new() };
        let mut failures = Vec::new();
        for tab_layout in &layout.tab {
            let tab = dashboard.add_tab();
            tab.spec = tab_layout.chart.clone();
            let files: Vec<PathBuf> = tab_layout.files.iter().map(|f| base_dir.join(f)).collect();
            failures.extend(tab.load_files(&files));
        }
        if dashboard.tabs.is_empty() {
            dashboard.add_tab();
        }
        (dashboard, failures)
    }
}

/// TOML description of a multi-tab session
///
/// ```toml
/// [[tab]]
/// files = ["sales.csv", "costs.csv"]
/// kind = "scatter"
/// regression = true
/// title = "Sales vs costs"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardLayout {
    pub tab: Vec<TabLayout>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabLayout {
    pub files: Vec<PathBuf>,
    #[serde(flatten)]
    pub chart: ChartSpec,
}

impl DashboardLayout {
    pub fn load(path: impl AsRef<Path>) -> DeskResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotKind;

    #[test]
    fn test_new_dashboard_has_one_tab() {
        let dashboard = Dashboard::new();
        assert_eq!(dashboard.len(), 1);
        assert_eq!(dashboard.tabs()[0].title, "Tab 1");
    }

    #[test]
    fn test_add_and_close_tabs() {
        let mut dashboard = Dashboard::new();
        assert_eq!(dashboard.add_tab().title, "Tab 2");
        assert_eq!(dashboard.add_tab().title, "Tab 3");

        let closed = dashboard.close_tab(1).unwrap();
        assert_eq!(closed.title, "Tab 2");
        assert_eq!(dashboard.len(), 2);
        assert_eq!(dashboard.add_tab().title, "Tab 3");
    }

    #[test]
    fn test_last_tab_cannot_be_closed() {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.close_tab(0).is_err());
        assert_eq!(dashboard.len(), 1);

        dashboard.add_tab();
        assert!(dashboard.close_tab(5).is_err());
        assert_eq!(dashboard.len(), 2);
    }

    #[test]
    fn test_same_name_replaced_in_place() {
        let mut tab = PlotTab::new("t");
        tab.insert_dataset(Dataset::new("a", vec![(0.0, 0.0)], 0));
        tab.insert_dataset(Dataset::new("b", vec![(0.0, 0.0)], 1));
        tab.insert_dataset(Dataset::new("a", vec![(1.0, 1.0), (2.0, 2.0)], 2));

        let names: Vec<&str> = tab.datasets().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(tab.datasets()[0].points.len(), 2);
        assert_eq!(tab.datasets()[0].color_name, "green");
    }

    #[test]
    fn test_layout_parse() {
        let layout: DashboardLayout = toml::from_str(
            r#"
            [[tab]]
            files = ["a.csv"]
            kind = "scatter"
            regression = true
            title = "First"

            [[tab]]
            files = ["b.csv", "c.csv"]
            kind = "histogram"
            "#,
        )
        .unwrap();

        assert_eq!(layout.tab.len(), 2);
        assert_eq!(layout.tab[0].chart.kind, PlotKind::Scatter);
        assert!(layout.tab[0].chart.regression);
        assert_eq!(layout.tab[0].chart.title, "First");
        assert_eq!(layout.tab[1].files.len(), 2);
        assert_eq!(layout.tab[1].chart.kind, PlotKind::Histogram);
        assert!(!layout.tab[1].chart.regression);
    }
}
