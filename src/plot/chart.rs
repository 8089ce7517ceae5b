use super::dataset::Dataset;
use super::histogram::{Bin, DEFAULT_BINS, histogram};
use super::regression::{Regression, linear_regression};
use crate::error::{DeskError, DeskResult};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Chart size in pixels
pub const CHART_SIZE: (u32, u32) = (1000, 700);

/// Half the width of a bar, in x units
const BAR_HALF_WIDTH: f64 = 0.4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    #[default]
    Line,
    Scatter,
    Bar,
    Histogram,
}

impl PlotKind {
    /// Whether the regression overlay applies to this kind
    pub fn supports_regression(self) -> bool {
        matches!(self, PlotKind::Line | PlotKind::Scatter)
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlotKind::Line => "line",
            PlotKind::Scatter => "scatter",
            PlotKind::Bar => "bar",
            PlotKind::Histogram => "histogram",
        };
        f.write_str(name)
    }
}

impl FromStr for PlotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(PlotKind::Line),
            "scatter" => Ok(PlotKind::Scatter),
            "bar" => Ok(PlotKind::Bar),
            "histogram" | "hist" => Ok(PlotKind::Histogram),
            _ => Err(format!(
                "Invalid plot kind '{}'. Valid options are: line, scatter, bar, histogram",
                s
            )),
        }
    }
}

/// Presentation settings of one tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSpec {
    pub kind: PlotKind,
    pub regression: bool,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Output of a render: the SVG document and the statistics text
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub svg: String,
    pub stats: Vec<String>,
}

impl RenderedChart {
    pub fn stats_text(&self) -> String {
        self.stats.join("\n")
    }
}

/// Fit a regression line per dataset when the overlay is enabled
///
/// Failures become warnings in `stats` instead of aborting the render.
fn fit_regressions(
    spec: &ChartSpec,
    datasets: &[Dataset],
    stats: &mut Vec<String>,
) -> Vec<Option<Regression>> {
    if !spec.regression || !spec.kind.supports_regression() {
        return vec![None; datasets.len()];
    }

    let labelled = datasets.len() > 1;
    datasets
        .iter()
        .map(|dataset| match linear_regression(&dataset.xs(), &dataset.ys()) {
            Ok(fit) => {
                if labelled {
                    stats.push(format!("[{}] {}", dataset.name, fit.summary()));
                } else {
                    stats.push(fit.summary());
                }
                Some(fit)
            }
            Err(e) => {
                warn!(dataset = %dataset.name, error = %e, "regression skipped");
                stats.push(format!("Regression failed for {}: {}", dataset.name, e));
                None
            }
        })
        .collect()
}

fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Widen an empty range and add a margin on both sides
fn pad((lo, hi): (f64, f64), margin: f64) -> (f64, f64) {
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    let extra = (hi - lo) * margin;
    (lo - extra, hi + extra)
}

type Bounds = ((f64, f64), (f64, f64));

fn chart_bounds(
    kind: PlotKind,
    datasets: &[Dataset],
    fits: &[Option<Regression>],
    bins: &[Vec<Bin>],
) -> DeskResult<Bounds> {
    let points = || datasets.iter().flat_map(|d| d.points.iter().copied());

    let bounds = match kind {
        PlotKind::Line | PlotKind::Scatter => {
            let x = span(points().map(|(x, _)| x));
            let fitted = datasets.iter().zip(fits).flat_map(|(d, fit)| {
                let ends = span(d.points.iter().map(|(x, _)| *x));
                fit.zip(ends)
                    .map(|(fit, (lo, hi))| [fit.predict(lo), fit.predict(hi)])
                    .into_iter()
                    .flatten()
            });
            let y = span(points().map(|(_, y)| y).chain(fitted));
            x.zip(y).map(|(x, y)| (pad(x, 0.05), pad(y, 0.05)))
        }
        PlotKind::Bar => {
            let x = span(points().map(|(x, _)| x));
            let y = span(points().map(|(_, y)| y).chain([0.0]));
            x.zip(y).map(|((lo, hi), y)| {
                (
                    (lo - BAR_HALF_WIDTH - 0.1, hi + BAR_HALF_WIDTH + 0.1),
                    pad(y, 0.05),
                )
            })
        }
        PlotKind::Histogram => {
            let all_bins = || bins.iter().flatten();
            let x = span(all_bins().flat_map(|b| [b.start, b.end]));
            let top = all_bins().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
            x.map(|x| (x, (0.0, top * 1.05)))
        }
    };
    let ((x_lo, x_hi), (y_lo, y_hi)) = bounds.unwrap_or(((0.0, 1.0), (0.0, 1.0)));

    // plotters cannot lay out an axis whose range is infinite
    let finite = [x_lo, x_hi, y_lo, y_hi, x_hi - x_lo, y_hi - y_lo]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(DeskError::Render(format!(
            "data range is too large to plot (x {:e}..{:e}, y {:e}..{:e})",
            x_lo, x_hi, y_lo, y_hi
        )));
    }
    Ok(((x_lo, x_hi), (y_lo, y_hi)))
}

fn render_err(e: impl fmt::Display) -> DeskError {
    DeskError::Render(e.to_string())
}

/// Draw `datasets` as an SVG chart
///
/// Every dataset keeps its palette color. The legend appears only when more
/// than one dataset is drawn.
pub fn render_svg(spec: &ChartSpec, datasets: &[Dataset]) -> DeskResult<RenderedChart> {
    if let Some(dataset) = datasets
        .iter()
        .find(|d| d.points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()))
    {
        return Err(DeskError::Render(format!(
            "{} contains values that are not finite numbers",
            dataset.name
        )));
    }

    let mut stats = Vec::new();
    let fits = fit_regressions(spec, datasets, &mut stats);
    let bins: Vec<Vec<Bin>> = if spec.kind == PlotKind::Histogram {
        datasets
            .iter()
            .map(|d| histogram(&d.ys(), DEFAULT_BINS))
            .collect()
    } else {
        Vec::new()
    };
    let ((x_lo, x_hi), (y_lo, y_hi)) = chart_bounds(spec.kind, datasets, &fits, &bins)?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64);
        if !spec.title.is_empty() {
            builder.caption(&spec.title, ("sans-serif", 26));
        }
        let mut chart = builder
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        for (i, dataset) in datasets.iter().enumerate() {
            let color = dataset.color;
            match spec.kind {
                PlotKind::Line => {
                    chart
                        .draw_series(LineSeries::new(
                            dataset.points.iter().copied(),
                            color.stroke_width(2),
                        ))
                        .map_err(render_err)?
                        .label(dataset.name.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }
                PlotKind::Scatter => {
                    chart
                        .draw_series(
                            dataset
                                .points
                                .iter()
                                .map(|&point| Circle::new(point, 3, color.filled())),
                        )
                        .map_err(render_err)?
                        .label(dataset.name.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
                }
                PlotKind::Bar => {
                    chart
                        .draw_series(dataset.points.iter().map(|&(x, y)| {
                            Rectangle::new(
                                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, y)],
                                color.filled(),
                            )
                        }))
                        .map_err(render_err)?
                        .label(dataset.name.as_str())
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
                        });
                }
                PlotKind::Histogram => {
                    let fill = color.mix(0.5).filled();
                    chart
                        .draw_series(bins[i].iter().map(|bin| {
                            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], fill)
                        }))
                        .map_err(render_err)?
                        .label(dataset.name.as_str())
                        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
                }
            }

            let ends = span(dataset.points.iter().map(|(x, _)| *x));
            if let (Some(fit), Some((lo, hi))) = (fits[i], ends) {
                chart
                    .draw_series(DashedLineSeries::new(
                        [(lo, fit.predict(lo)), (hi, fit.predict(hi))],
                        10,
                        6,
                        BLACK.stroke_width(2),
                    ))
                    .map_err(render_err)?;
            }
        }

        if datasets.len() > 1 {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }

    Ok(RenderedChart { svg, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_data(name: &str, index: usize) -> Dataset {
        Dataset::new(name, vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)], index)
    }

    #[test]
    fn test_plot_kind_parse() {
        assert_eq!("Scatter".parse::<PlotKind>().unwrap(), PlotKind::Scatter);
        assert_eq!("hist".parse::<PlotKind>().unwrap(), PlotKind::Histogram);
        assert!("pie".parse::<PlotKind>().is_err());
    }

    #[test]
    fn test_regression_only_for_line_and_scatter() {
        let datasets = vec![line_data("a.csv", 0)];
        for kind in [PlotKind::Bar, PlotKind::Histogram] {
            let spec = ChartSpec {
                kind,
                regression: true,
                ..Default::default()
            };
            let rendered = render_svg(&spec, &datasets).unwrap();
            assert!(rendered.stats.is_empty());
        }

        let spec = ChartSpec {
            kind: PlotKind::Scatter,
            regression: true,
            ..Default::default()
        };
        let rendered = render_svg(&spec, &datasets).unwrap();
        assert_eq!(rendered.stats_text(), "Regression: y = 2.00x + 1.00\nR² = 1.00");
    }

    #[test]
    fn test_regression_failure_is_a_warning() {
        let datasets = vec![
            Dataset::new("flat.csv", vec![(1.0, 1.0), (1.0, 2.0)], 0),
            line_data("ok.csv", 1),
        ];
        let spec = ChartSpec {
            regression: true,
            ..Default::default()
        };
        let rendered = render_svg(&spec, &datasets).unwrap();
        assert_eq!(rendered.stats.len(), 2);
        assert!(rendered.stats[0].starts_with("Regression failed for flat.csv"));
        assert!(rendered.stats[1].starts_with("[ok.csv] Regression: y = 2.00x + 1.00"));
    }

    #[test]
    fn test_render_produces_svg_with_title() {
        let spec = ChartSpec {
            title: "Sales".to_string(),
            x_label: "Month".to_string(),
            y_label: "Units".to_string(),
            ..Default::default()
        };
        let rendered = render_svg(&spec, &[line_data("a.csv", 0)]).unwrap();
        assert!(rendered.svg.contains("<svg"));
        assert!(rendered.svg.contains("Sales"));
    }

    #[test]
    fn test_render_empty_tab() {
        let rendered = render_svg(&ChartSpec::default(), &[]).unwrap();
        assert!(rendered.svg.contains("<svg"));
        assert!(rendered.stats.is_empty());
    }

    #[test]
    fn test_bounds_include_zero_for_bars() {
        let datasets = vec![Dataset::new("b.csv", vec![(1.0, 5.0), (2.0, 7.0)], 0)];
        let ((x_lo, x_hi), (y_lo, _)) = chart_bounds(PlotKind::Bar, &datasets, &[None], &[]).unwrap();
        assert!(x_lo < 0.6 && x_hi > 2.4);
        assert!(y_lo <= 0.0);
    }

    #[test]
    fn test_bounds_default_when_empty() {
        assert_eq!(
            chart_bounds(PlotKind::Line, &[], &[], &[]).unwrap(),
            ((0.0, 1.0), (0.0, 1.0))
        );
    }

    #[test]
    fn test_render_rejects_range_wider_than_f64() {
        let datasets = vec![Dataset::new("wide.csv", vec![(0.0, -1e308), (1.0, 1e308)], 0)];
        let err = render_svg(&ChartSpec::default(), &datasets).unwrap_err();
        assert!(matches!(err, DeskError::Render(_)));

        let control = vec![Dataset::new("wide.csv", vec![(0.0, -1e300), (1.0, 1e300)], 0)];
        assert!(render_svg(&ChartSpec::default(), &control).is_ok());
    }

    #[test]
    fn test_render_rejects_non_finite_points() {
        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let datasets = vec![Dataset::new("bad.csv", vec![(1.0, 2.0), (2.0, bad)], 0)];
            for kind in [PlotKind::Line, PlotKind::Histogram] {
                let spec = ChartSpec {
                    kind,
                    ..Default::default()
                };
                let err = render_svg(&spec, &datasets).unwrap_err();
                assert!(err.to_string().contains("bad.csv"));
            }
        }
    }

    #[test]
    fn test_regression_line_is_dashed() {
        let count = |regression: bool| {
            let spec = ChartSpec {
                kind: PlotKind::Scatter,
                regression,
                ..Default::default()
            };
            let rendered = render_svg(&spec, &[line_data("a.csv", 0)]).unwrap();
            rendered.svg.matches("<polyline").count()
        };
        // a solid overlay would add a single path
        assert!(count(true) > count(false) + 1);
    }
}
