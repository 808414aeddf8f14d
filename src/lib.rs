//! Energy Bounce - a ball on a draggable spring ground
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integrator, energy diagnostics, input handling)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Display preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, Theme};
pub use sim::{Event, PhysicsConfig, SimulationState, update};

/// Simulation configuration constants
pub mod consts {
    /// Ball radius (scene units, CSS pixels)
    pub const BALL_RADIUS: f64 = 50.0;
    /// Gravity (units/s², positive pulls the ball down the screen)
    pub const GRAVITY: f64 = 1000.0;
    /// Contact spring stiffness per unit mass (1/s²)
    pub const SPRING: f64 = 2000.0;
    /// Viscous drag coefficient (1/s). Zero bounces forever.
    pub const DRAG: f64 = 0.0;

    /// Simulated milliseconds per integrator sub-step
    pub const SUBSTEP_MS: f64 = 0.1;
    /// Simulated milliseconds per real millisecond
    pub const SIM_RATE: f64 = 1.0;
    /// Maximum sub-steps per tick to prevent long freezes after a stall
    pub const MAX_SUBSTEPS: u32 = 2000;

    /// Scene size as a fraction of the window
    pub const SCENE_WIDTH_FRACTION: f64 = 0.9;
    pub const SCENE_HEIGHT_FRACTION: f64 = 0.5;
    /// Lowest ground line the user can drag to, in ball radii from the top
    pub const MIN_GROUND_RADII: f64 = 1.5;

    /// Column width of each diagnostics value
    pub const DIAGNOSTIC_COLUMN: usize = 5;
    /// Relative energy error tolerated before the monitor complains
    pub const ENERGY_TOLERANCE: f64 = 0.01;

    /// Nominal frame time used when no previous frame timestamp exists
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
}
