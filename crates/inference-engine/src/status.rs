//! Health Status Classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Estimates strictly below this many cycles are critical
pub const CRITICAL_BELOW: f64 = 50.0;

/// Estimates strictly below this many cycles (and not critical) are warnings
pub const WARNING_BELOW: f64 = 100.0;

/// Engine health derived from the predicted RUL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Less than 50 cycles remaining
    Critical,
    /// Between 50 and 100 cycles remaining
    Warning,
    /// 100 cycles or more remaining
    Healthy,
}

impl HealthStatus {
    /// Classify a raw (unrounded) RUL estimate.
    ///
    /// Bands are closed on the lower bound and open on the upper bound.
    pub fn classify(rul: f64) -> Self {
        if rul < CRITICAL_BELOW {
            HealthStatus::Critical
        } else if rul < WARNING_BELOW {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "Critical",
            HealthStatus::Warning => "Warning",
            HealthStatus::Healthy => "Healthy",
        }
    }

    /// Get recommended action
    pub fn recommendation(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "Immediate maintenance required",
            HealthStatus::Warning => "Schedule maintenance soon",
            HealthStatus::Healthy => "No immediate action required",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round an estimate to two decimals for presentation
pub fn round_rul(rul: f64) -> f64 {
    (rul * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(HealthStatus::classify(49.99), HealthStatus::Critical);
        assert_eq!(HealthStatus::classify(50.0), HealthStatus::Warning);
        assert_eq!(HealthStatus::classify(99.999), HealthStatus::Warning);
        assert_eq!(HealthStatus::classify(100.0), HealthStatus::Healthy);
    }

    #[test]
    fn test_negative_and_large_estimates() {
        assert_eq!(HealthStatus::classify(-3.0), HealthStatus::Critical);
        assert_eq!(HealthStatus::classify(1.0e9), HealthStatus::Healthy);
    }

    #[test]
    fn test_classification_ignores_rounding() {
        // 49.996 rounds to 50.0 for display but is still critical
        let raw = 49.996;
        assert_eq!(round_rul(raw), 50.0);
        assert_eq!(HealthStatus::classify(raw), HealthStatus::Critical);
    }

    #[test]
    fn test_round_rul() {
        assert_eq!(round_rul(120.0), 120.0);
        assert_eq!(round_rul(87.456), 87.46);
        assert_eq!(round_rul(12.3449), 12.34);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&HealthStatus::Critical).unwrap();
        assert_eq!(json, "\"Critical\"");
        assert_eq!(HealthStatus::Warning.recommendation(), "Schedule maintenance soon");
    }

    proptest! {
        #[test]
        fn prop_classification_follows_bands(rul in -1.0e4f64..1.0e4) {
            let expected = if rul < 50.0 {
                HealthStatus::Critical
            } else if rul < 100.0 {
                HealthStatus::Warning
            } else {
                HealthStatus::Healthy
            };
            prop_assert_eq!(HealthStatus::classify(rul), expected);
        }
    }
}
