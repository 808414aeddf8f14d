//! Simulation state and derived ball geometry
//!
//! Coordinates are scene space: origin at the top-left, `y` grows downward.

use super::config::PhysicsConfig;
use super::integrator::compression;

/// Complete simulation state (one per running instance)
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Ball center height
    pub y: f64,
    /// Vertical velocity (units/s, positive is downward)
    pub v: f64,
    /// Ground line height
    pub h: f64,
    /// Scene width
    pub width: f64,
    /// Scene height
    pub height: f64,
    /// Last pointer coordinate while a drag is active
    pub drag_anchor: Option<f64>,
    /// Cached diagnostics line
    pub text: String,
    /// Fraction of a sub-step of elapsed time not simulated yet, in [0, 1)
    pub substep_carry: f64,
}

impl SimulationState {
    /// Ball resting at `y` with ground at `h` in an empty scene.
    /// The readout stays empty until the first `annotate`.
    pub fn new(y: f64, h: f64) -> Self {
        Self {
            y,
            v: 0.0,
            h,
            width: 0.0,
            height: 0.0,
            drag_anchor: None,
            text: String::new(),
            substep_carry: 0.0,
        }
    }

    /// Ball dropped from the top of a window of the given size
    pub fn for_window(config: &PhysicsConfig, width: u32, height: u32) -> Self {
        let mut state = Self::new(config.radius, 0.0);
        super::controller::resize(&mut state, config, width, height);
        super::diagnostics::annotate(&mut state, config);
        state
    }

    /// Whether a drag gesture is in progress
    #[inline]
    pub fn dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Whether the ball currently touches the ground
    #[inline]
    pub fn in_contact(&self, config: &PhysicsConfig) -> bool {
        compression(self.y, self.h, config.radius) > 0.0
    }

    /// Ellipse to draw for the ball, flattened against the ground while in contact
    pub fn ball_ellipse(&self, config: &PhysicsConfig) -> BallEllipse {
        let r = config.radius;
        let c = compression(self.y, self.h, r);
        let ry = r - 0.5 * c;
        BallEllipse {
            cx: 0.5 * self.width,
            cy: self.y - 0.5 * c,
            rx: r * r / ry,
            ry,
        }
    }
}

/// Axis-aligned ellipse in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallEllipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl BallEllipse {
    /// Lowest point of the ellipse
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.cy + self.ry
    }
}
