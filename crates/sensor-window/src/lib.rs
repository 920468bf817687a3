//! Sensor Window Validation and Scaling
//!
//! Provides the fixed 50x17 sensor window type, boundary validation, and the
//! feature scaler artifact used ahead of RUL inference.

mod error;
mod scaler;
mod window;

pub use error::{ScalerError, ValidationError};
pub use scaler::FeatureScaler;
pub use window::{SensorWindow, NUM_SENSORS, WINDOW_LEN};
