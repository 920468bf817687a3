//! Terminal rendering of sensor trends, results and the RUL gauge

use colored::{ColoredString, Colorize};
use inference_engine::{HealthStatus, PredictionResult, SensorWindow};

/// Number of sensor channels drawn as trends
pub const TREND_CHANNELS: usize = 3;

/// Upper end of the gauge axis, in cycles
pub const GAUGE_MAX: f64 = 200.0;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Colored band of the RUL gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeBand {
    /// `[0, 50)`
    Danger,
    /// `[50, 100)`
    Warning,
    /// `[100, 200]`
    Healthy,
}

impl GaugeBand {
    /// Band containing `value` on the gauge axis
    pub fn for_value(value: f64) -> Self {
        HealthStatus::classify(value).into()
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            GaugeBand::Danger => text.red(),
            GaugeBand::Warning => text.truecolor(255, 165, 0),
            GaugeBand::Healthy => text.green(),
        }
    }
}

impl From<HealthStatus> for GaugeBand {
    fn from(status: HealthStatus) -> Self {
        match status {
            HealthStatus::Critical => GaugeBand::Danger,
            HealthStatus::Warning => GaugeBand::Warning,
            HealthStatus::Healthy => GaugeBand::Healthy,
        }
    }
}

/// Render values as a one-line sparkline scaled to their own range
pub fn sparkline(values: &[f32]) -> String {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f32;

    values
        .iter()
        .map(|&v| {
            if range > 0.0 {
                SPARK_LEVELS[((v - min) / range * top).round() as usize]
            } else {
                SPARK_LEVELS[0]
            }
        })
        .collect()
}

/// Trends of the first sensor channels over the window's cycles
pub fn render_trends(window: &SensorWindow) -> String {
    let mut out = String::from("Sensor Trends (last 50 cycles)\n");
    for sensor in 0..TREND_CHANNELS {
        if let Some(column) = window.column(sensor) {
            let min = column.iter().copied().fold(f32::INFINITY, f32::min);
            let max = column.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            out.push_str(&format!(
                "  Sensor {:<2} {} [{:.3}, {:.3}]\n",
                sensor + 1,
                sparkline(&column),
                min,
                max
            ));
        }
    }
    out
}

/// Summary metrics of a prediction
pub fn render_summary(result: &PredictionResult) -> String {
    let band = GaugeBand::from(result.status);
    format!(
        "Prediction Results (engine {})\n  Predicted RUL (cycles): {}\n  Health Status:          {}\n  Recommendation:         {}\n",
        result.engine_id,
        format!("{:.2}", result.predicted_rul).as_str().bold(),
        band.paint(result.status.as_str()).bold(),
        result.recommendation
    )
}

/// Band of each gauge cell, left to right across `[0, GAUGE_MAX]`
pub fn gauge_cells(width: usize) -> Vec<GaugeBand> {
    let last = width.saturating_sub(1).max(1) as f64;
    (0..width)
        .map(|i| GaugeBand::for_value(i as f64 / last * GAUGE_MAX))
        .collect()
}

/// Cell the needle points at. Values off the axis are pinned to its ends.
pub fn needle_position(rul: f64, width: usize) -> usize {
    let last = width.saturating_sub(1);
    let clamped = rul.clamp(0.0, GAUGE_MAX);
    ((clamped / GAUGE_MAX) * last as f64).round() as usize
}

/// Gauge with colored bands and a needle under the predicted RUL
pub fn render_gauge(rul: f64, width: usize) -> String {
    let bar: String = gauge_cells(width)
        .iter()
        .map(|band| band.paint("█").to_string())
        .collect();
    let needle = needle_position(rul, width);

    format!(
        "Remaining Useful Life Indicator: {:.2}\n  {}\n  {}▲\n  0{:>w$}\n",
        rul,
        bar,
        " ".repeat(needle),
        GAUGE_MAX as u32,
        w = width.saturating_sub(1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(GaugeBand::for_value(0.0), GaugeBand::Danger);
        assert_eq!(GaugeBand::for_value(49.9), GaugeBand::Danger);
        assert_eq!(GaugeBand::for_value(50.0), GaugeBand::Warning);
        assert_eq!(GaugeBand::for_value(100.0), GaugeBand::Healthy);
        assert_eq!(GaugeBand::for_value(200.0), GaugeBand::Healthy);
    }

    #[test]
    fn test_gauge_cells_follow_bands() {
        let cells = gauge_cells(41);
        assert_eq!(cells.len(), 41);
        // Each cell spans 5 cycles
        assert_eq!(cells[9], GaugeBand::Danger);
        assert_eq!(cells[10], GaugeBand::Warning);
        assert_eq!(cells[19], GaugeBand::Warning);
        assert_eq!(cells[20], GaugeBand::Healthy);
        assert_eq!(cells[40], GaugeBand::Healthy);
    }

    #[test]
    fn test_needle_clamps_to_axis() {
        assert_eq!(needle_position(-30.0, 41), 0);
        assert_eq!(needle_position(100.0, 41), 20);
        assert_eq!(needle_position(350.0, 41), 40);
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[0.0, 0.5, 1.0]), "▁▅█");
        assert_eq!(sparkline(&[2.0, 2.0]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_trends_show_three_channels() {
        let text = render_trends(&SensorWindow::zeros());
        assert!(text.contains("Sensor 1"));
        assert!(text.contains("Sensor 3"));
        assert!(!text.contains("Sensor 4"));
    }

    #[test]
    fn test_summary_lists_result_fields() {
        let result = PredictionResult {
            engine_id: 3,
            predicted_rul: 42.5,
            status: HealthStatus::Critical,
            recommendation: HealthStatus::Critical.recommendation().to_string(),
        };
        let text = render_summary(&result);
        assert!(text.contains("42.50"));
        assert!(text.contains("Critical"));
        assert!(text.contains("Immediate maintenance required"));
    }
}
