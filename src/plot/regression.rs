use crate::error::{DeskError, DeskResult};

/// Least-squares fit `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub r_value: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }

    /// Two-line summary shown under a chart
    pub fn summary(&self) -> String {
        format!(
            "Regression: y = {:.2}x + {:.2}\nR² = {:.2}",
            self.slope,
            self.intercept,
            self.r_squared()
        )
    }
}

/// Ordinary least-squares regression of `ys` on `xs`
///
/// Fails for mismatched lengths, fewer than two points, or when every x is
/// identical. A constant y gives `r_value = 0`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> DeskResult<Regression> {
    if xs.len() != ys.len() {
        return Err(DeskError::Regression(format!(
            "x and y have different lengths ({} and {})",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(DeskError::Regression(
            "at least two points are required".to_string(),
        ));
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    if ss_xx == 0.0 {
        return Err(DeskError::Regression(
            "cannot fit a line when all x values are identical".to_string(),
        ));
    }

    let slope = ss_xy / ss_xx;
    let intercept = y_mean - slope * x_mean;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(DeskError::Regression(
            "values are too large to fit a line".to_string(),
        ));
    }
    let denominator = (ss_xx * ss_yy).sqrt();
    let r_value = if denominator == 0.0 {
        0.0
    } else {
        (ss_xy / denominator).clamp(-1.0, 1.0)
    };

    Ok(Regression {
        slope,
        intercept,
        r_value,
    })
}
