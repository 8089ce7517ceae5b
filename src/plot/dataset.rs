use crate::error::{DeskError, DeskResult};
use plotters::style::RGBColor;
use std::fs;
use std::path::Path;

/// Colors handed out to datasets by their position in a load batch
pub const PALETTE: [(&str, RGBColor); 5] = [
    ("red", RGBColor(255, 0, 0)),
    ("blue", RGBColor(0, 0, 255)),
    ("green", RGBColor(0, 128, 0)),
    ("orange", RGBColor(255, 165, 0)),
    ("purple", RGBColor(128, 0, 128)),
];

/// Palette entry for the `index`-th file of a batch
pub fn color_for(index: usize) -> (&'static str, RGBColor) {
    PALETTE[index % PALETTE.len()]
}

/// Two numeric columns read from one file
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Source path, also used as the legend label
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub color_name: &'static str,
    pub color: RGBColor,
}

impl Dataset {
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>, palette_index: usize) -> Self {
        let (color_name, color) = color_for(palette_index);
        Self {
            name: name.into(),
            points,
            color_name,
            color,
        }
    }

    /// Read a headerless comma-separated file; columns 0 and 1 are x and y
    pub fn from_csv(path: impl AsRef<Path>, palette_index: usize) -> DeskResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let points = parse_points(&content).map_err(|(line, message)| DeskError::Dataset {
            path: path.to_path_buf(),
            line,
            message,
        })?;
        Ok(Self::new(path.display().to_string(), points, palette_index))
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|(x, _)| *x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }
}

/// Parse `x,y[,...]` rows; extra columns are ignored
///
/// Errors carry the 1-based line number.
pub fn parse_points(content: &str) -> Result<Vec<(f64, f64)>, (usize, String)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut points = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let fallback = index + 1;
        let record = record.map_err(|e| {
            let line = e.position().map_or(fallback, |p| p.line() as usize);
            (line, e.to_string())
        })?;
        let line = record.position().map_or(fallback, |p| p.line() as usize);

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() < 2 {
            return Err((line, "expected two numeric columns".to_string()));
        }

        let x = parse_number(&record[0]).map_err(|m| (line, m))?;
        let y = parse_number(&record[1]).map_err(|m| (line, m))?;
        points.push((x, y));
    }
    Ok(points)
}

fn parse_number(field: &str) -> Result<f64, String> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("'{}' is not a finite number", field)),
        Err(_) => Err(format!("'{}' is not a number", field)),
    }
}
