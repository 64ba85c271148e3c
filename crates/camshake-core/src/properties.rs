use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameters of a single shake, fixed for the lifetime of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    /// Initial shake direction in degrees, counter-clockwise from +X.
    pub angle: f32,
    /// Maximum radius of the positional displacement.
    pub strength: f32,
    /// How fast the camera travels between waypoints.
    pub speed: f32,
    /// Total shake duration in seconds.
    pub duration: f32,
    /// Weight of the random angular variation (0..=1).
    pub noise_percent: f32,
    /// Shape of the decay curve (0..=1). Near 0 decays steadily, near 1
    /// holds strength longer and then drops sharply.
    pub damping_percent: f32,
    /// How much displacement is mirrored into rotation (0..=1).
    pub rotation_percent: f32,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            angle: 0.0,
            strength: 0.3,
            speed: 20.0,
            duration: 0.5,
            noise_percent: 0.3,
            damping_percent: 0.5,
            rotation_percent: 0.5,
        }
    }
}

impl Properties {
    pub fn new(
        angle: f32,
        strength: f32,
        speed: f32,
        duration: f32,
        noise_percent: f32,
        damping_percent: f32,
        rotation_percent: f32,
    ) -> Self {
        Self {
            angle,
            strength,
            speed,
            duration,
            noise_percent,
            damping_percent,
            rotation_percent,
        }
    }

    /// Report values outside the documented ranges.
    ///
    /// Nothing is corrected: the animator runs with whatever it is given,
    /// and degenerate values (zero duration, zero speed) produce degenerate
    /// motion rather than an error.
    pub fn validate(&self) -> Result<(), Vec<PropertyIssue>> {
        let mut issues = Vec::new();

        for (field, value) in self.fields() {
            if !value.is_finite() {
                issues.push(PropertyIssue::NonFinite { field });
            }
        }
        if self.strength < 0.0 {
            issues.push(PropertyIssue::NegativeStrength(self.strength));
        }
        if self.speed <= 0.0 {
            issues.push(PropertyIssue::NonPositiveSpeed(self.speed));
        }
        if self.duration <= 0.0 {
            issues.push(PropertyIssue::NonPositiveDuration(self.duration));
        }
        for (field, value) in [
            ("noise_percent", self.noise_percent),
            ("damping_percent", self.damping_percent),
            ("rotation_percent", self.rotation_percent),
        ] {
            if value.is_finite() && !(0.0..=1.0).contains(&value) {
                issues.push(PropertyIssue::PercentOutOfRange { field, value });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    fn fields(&self) -> [(&'static str, f32); 7] {
        [
            ("angle", self.angle),
            ("strength", self.strength),
            ("speed", self.speed),
            ("duration", self.duration),
            ("noise_percent", self.noise_percent),
            ("damping_percent", self.damping_percent),
            ("rotation_percent", self.rotation_percent),
        ]
    }
}

/// A single out-of-range finding from [`Properties::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyIssue {
    NegativeStrength(f32),
    NonPositiveSpeed(f32),
    NonPositiveDuration(f32),
    PercentOutOfRange { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
}

impl fmt::Display for PropertyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeStrength(v) => write!(f, "strength must be >= 0, got {v}"),
            Self::NonPositiveSpeed(v) => {
                write!(f, "speed must be > 0, got {v} (the camera will never reach a waypoint)")
            },
            Self::NonPositiveDuration(v) => write!(f, "duration must be > 0, got {v}"),
            Self::PercentOutOfRange { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            },
            Self::NonFinite { field } => write!(f, "{field} is not a finite number"),
        }
    }
}

impl std::error::Error for PropertyIssue {}
