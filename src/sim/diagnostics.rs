//! Energy diagnostics and the on-screen readout

use super::config::PhysicsConfig;
use super::integrator::compression;
use super::state::SimulationState;
use crate::consts::DIAGNOSTIC_COLUMN;

/// Energy terms for a unit-mass ball, measured against the current ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    /// Height of the ball center above the ground line
    pub height: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub compression: f64,
    /// Energy stored in the contact spring
    pub deformation: f64,
    pub total: f64,
}

impl Energy {
    pub fn measure(state: &SimulationState, config: &PhysicsConfig) -> Self {
        let height = state.h - state.y;
        let kinetic = 0.5 * state.v * state.v;
        let potential = config.gravity * height;
        let compression = compression(state.y, state.h, config.radius);
        let deformation = 0.5 * config.spring * compression * compression;

        Self {
            height,
            kinetic,
            potential,
            compression,
            deformation,
            total: kinetic + potential + deformation,
        }
    }
}

/// Round to the nearest integer and right-align in a fixed column
fn column(value: f64) -> String {
    // Integer conversion also folds -0 into 0
    let n = value.round() as i64;
    format!("{:>width$}", n, width = DIAGNOSTIC_COLUMN)
}

/// Render the fixed-width readout line
pub fn format_line(energy: &Energy, velocity: f64) -> String {
    format!(
        "h={} v={} K={} P={} D={} E={}",
        column(energy.height),
        column(velocity),
        column(energy.kinetic),
        column(energy.potential),
        column(energy.deformation),
        column(energy.total),
    )
}

/// Recompute the cached diagnostics line from the current state
pub fn annotate(state: &mut SimulationState, config: &PhysicsConfig) {
    let energy = Energy::measure(state, config);
    state.text = format_line(&energy, state.v);
}
