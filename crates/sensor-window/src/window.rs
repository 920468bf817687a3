//! Sensor Window Type

use crate::error::ValidationError;
use serde::Serialize;

/// Number of time steps (cycles) in a window
pub const WINDOW_LEN: usize = 50;

/// Number of sensor channels per time step
pub const NUM_SENSORS: usize = 17;

/// A validated block of `WINDOW_LEN` cycles by `NUM_SENSORS` readings.
///
/// Readings are stored row-major, one row per cycle, which is also the
/// memory layout of the `(1, 50, 17)` model input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Vec<Vec<f32>>")]
pub struct SensorWindow {
    values: Vec<f32>,
}

impl SensorWindow {
    /// Shape every window must have, as `(rows, columns)`
    pub const SHAPE: (usize, usize) = (WINDOW_LEN, NUM_SENSORS);

    /// Build a window from rows, rejecting any shape other than 50x17
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, ValidationError> {
        if rows.len() != WINDOW_LEN || rows.iter().any(|row| row.len() != NUM_SENSORS) {
            return Err(ValidationError::InvalidShape {
                expected: format!("({}, {})", WINDOW_LEN, NUM_SENSORS),
                actual: describe_shape(rows),
            });
        }

        let mut values = Vec::with_capacity(WINDOW_LEN * NUM_SENSORS);
        for (cycle, row) in rows.iter().enumerate() {
            for (sensor, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(ValidationError::NonFinite { cycle, sensor, value });
                }
                values.push(value);
            }
        }

        Ok(Self { values })
    }

    /// Build a window from row-major values produced by a trusted source
    pub fn from_flat(values: Vec<f32>) -> Result<Self, ValidationError> {
        if values.len() != WINDOW_LEN * NUM_SENSORS {
            return Err(ValidationError::InvalidShape {
                expected: format!("{} values", WINDOW_LEN * NUM_SENSORS),
                actual: format!("{} values", values.len()),
            });
        }
        let rows: Vec<Vec<f32>> = values.chunks(NUM_SENSORS).map(<[f32]>::to_vec).collect();
        Self::from_rows(&rows)
    }

    /// Window of all-zero readings
    pub fn zeros() -> Self {
        Self {
            values: vec![0.0; WINDOW_LEN * NUM_SENSORS],
        }
    }

    /// Reading at `(cycle, sensor)`
    pub fn get(&self, cycle: usize, sensor: usize) -> Option<f32> {
        if cycle >= WINDOW_LEN || sensor >= NUM_SENSORS {
            return None;
        }
        Some(self.values[cycle * NUM_SENSORS + sensor])
    }

    /// Readings of one sensor channel across all cycles
    pub fn column(&self, sensor: usize) -> Option<Vec<f32>> {
        if sensor >= NUM_SENSORS {
            return None;
        }
        Some(
            self.values
                .iter()
                .skip(sensor)
                .step_by(NUM_SENSORS)
                .copied()
                .collect(),
        )
    }

    /// Iterate rows (one per cycle)
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks(NUM_SENSORS)
    }

    /// Copy into the nested wire form
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.rows().map(<[f32]>::to_vec).collect()
    }

    /// Row-major readings
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Apply `f(sensor, value)` to every reading, keeping the shape
    pub(crate) fn map_columns(&self, mut f: impl FnMut(usize, f32) -> f32) -> Self {
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i % NUM_SENSORS, v))
            .collect();
        Self { values }
    }
}

impl TryFrom<Vec<Vec<f32>>> for SensorWindow {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<SensorWindow> for Vec<Vec<f32>> {
    fn from(window: SensorWindow) -> Self {
        window.to_rows()
    }
}

/// Describe the received shape for error messages
fn describe_shape(rows: &[Vec<f32>]) -> String {
    let first = rows.first().map_or(0, Vec::len);
    match rows.iter().position(|row| row.len() != first) {
        Some(i) => format!(
            "({}, ragged: row {} has {} columns, row 0 has {})",
            rows.len(),
            i,
            rows[i].len(),
            first
        ),
        None => format!("({}, {})", rows.len(), first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(rows: usize, cols: usize, value: f32) -> Vec<Vec<f32>> {
        vec![vec![value; cols]; rows]
    }

    #[test]
    fn test_accepts_model_shape() {
        let window = SensorWindow::from_rows(&matrix(50, 17, 0.25)).unwrap();
        assert_eq!(window.as_slice().len(), 850);
        assert_eq!(window.get(49, 16), Some(0.25));
        assert_eq!(window.get(50, 0), None);
    }

    #[test]
    fn test_rejects_legacy_eighteen_columns() {
        let err = SensorWindow::from_rows(&matrix(50, 18, 0.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid sensor window shape: expected (50, 17), got (50, 18)"
        );
    }

    #[test]
    fn test_ragged_rows_name_offending_row() {
        let mut rows = matrix(50, 17, 0.0);
        rows[3].pop();
        let err = SensorWindow::from_rows(&rows).unwrap_err();
        match err {
            ValidationError::InvalidShape { actual, .. } => {
                assert!(actual.contains("row 3 has 16 columns"), "{actual}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let err = SensorWindow::from_rows(&[]).unwrap_err();
        assert!(err.to_string().ends_with("got (0, 0)"));
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut rows = matrix(50, 17, 1.0);
        rows[10][4] = f32::NAN;
        let err = SensorWindow::from_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonFinite { cycle: 10, sensor: 4, .. }
        ));
    }

    #[test]
    fn test_column_and_rows_preserve_order() {
        let rows: Vec<Vec<f32>> = (0..50)
            .map(|c| (0..17).map(|s| (c * 100 + s) as f32).collect())
            .collect();
        let window = SensorWindow::try_from(rows.clone()).unwrap();

        let column = window.column(2).unwrap();
        assert_eq!(column.len(), 50);
        assert_eq!(column[7], 702.0);
        assert!(window.column(17).is_none());
        assert_eq!(window.to_rows(), rows);
    }

    #[test]
    fn test_from_flat_checks_length() {
        assert!(SensorWindow::from_flat(vec![0.0; 850]).is_ok());
        assert!(SensorWindow::from_flat(vec![0.0; 849]).is_err());
    }

    #[test]
    fn test_serializes_as_nested_rows() {
        let json = serde_json::to_value(SensorWindow::zeros()).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[0].as_array().unwrap().len(), 17);
    }

    proptest! {
        #[test]
        fn prop_any_other_shape_is_rejected(
            (rows, cols) in (0usize..60, 0usize..24)
                .prop_filter("model shape", |shape| *shape != SensorWindow::SHAPE)
        ) {
            let result = SensorWindow::from_rows(&matrix(rows, cols, 0.5));
            let is_shape_error = matches!(result, Err(ValidationError::InvalidShape { .. }));
            prop_assert!(is_shape_error);
        }

        #[test]
        fn prop_finite_model_shape_is_accepted(values in proptest::collection::vec(-1.0e6f32..1.0e6, 850)) {
            let window = SensorWindow::from_flat(values.clone()).unwrap();
            prop_assert_eq!(window.as_slice(), values.as_slice());
        }
    }
}
