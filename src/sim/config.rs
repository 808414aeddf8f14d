//! Physics configuration
//!
//! Built once at startup from [`crate::consts`] and read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound applied to the ground line while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GroundClamp {
    /// Ground stops one radius above the scene bottom, where resize puts it
    #[default]
    RestLine,
    /// Ground may be dragged all the way to the scene bottom
    ViewportEdge,
}

impl GroundClamp {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroundClamp::RestLine => "rest-line",
            GroundClamp::ViewportEdge => "viewport-edge",
        }
    }
}

/// Physical constants and integrator tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Ball radius (scene units)
    pub radius: f64,
    /// Downward acceleration (units/s²)
    pub gravity: f64,
    /// Contact spring stiffness per unit mass (1/s²)
    pub spring: f64,
    /// Viscous drag coefficient (1/s)
    pub drag: f64,
    /// Simulated milliseconds per sub-step
    pub substep_ms: f64,
    /// Simulated milliseconds per real millisecond
    pub rate: f64,
    /// Sub-step cap per tick
    pub max_substeps: u32,
    /// Upper clamp for ground dragging
    pub ground_clamp: GroundClamp,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            gravity: GRAVITY,
            spring: SPRING,
            drag: DRAG,
            substep_ms: SUBSTEP_MS,
            rate: SIM_RATE,
            max_substeps: MAX_SUBSTEPS,
            ground_clamp: GroundClamp::RestLine,
        }
    }
}

impl PhysicsConfig {
    /// Default constants with a nonzero drag so the ball settles
    pub fn damped(drag: f64) -> Self {
        Self {
            drag,
            ..Self::default()
        }
    }

    /// Sub-step length in simulated seconds
    #[inline]
    pub fn substep_seconds(&self) -> f64 {
        self.substep_ms / 1000.0
    }

    /// Fractional sub-steps covered by `elapsed_ms` of real time
    #[inline]
    pub fn substeps_for(&self, elapsed_ms: f64) -> f64 {
        elapsed_ms * self.rate / self.substep_ms
    }

    /// Allowed range of the ground line for a scene of the given height.
    ///
    /// The upper bound never drops below the lower one, so a scene shorter than
    /// the minimum collapses the range to a single line.
    pub fn ground_range(&self, scene_height: f64) -> (f64, f64) {
        let min = MIN_GROUND_RADII * self.radius;
        let max = match self.ground_clamp {
            GroundClamp::RestLine => scene_height - self.radius,
            GroundClamp::ViewportEdge => scene_height,
        };
        (min, max.max(min))
    }

    /// Resting ball center for a ground at `ground`: gravity balanced by the spring
    pub fn rest_height(&self, ground: f64) -> f64 {
        ground - self.radius + self.gravity / self.spring
    }
}
