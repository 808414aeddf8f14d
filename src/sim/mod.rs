//! Deterministic simulation module
//!
//! All physics and interaction logic lives here. This module must be pure and deterministic:
//! - Fixed sub-step size only
//! - No wall clock reads (elapsed time is an input)
//! - No rendering or platform dependencies

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod integrator;
pub mod monitor;
pub mod state;
pub mod tick;

pub use config::{GroundClamp, PhysicsConfig};
pub use controller::{drag_end, drag_move, drag_start, drop_ball, resize};
pub use diagnostics::{Energy, annotate, format_line};
pub use integrator::{advance, compression, step};
pub use monitor::{EnergyMonitor, Violation};
pub use state::{BallEllipse, SimulationState};
pub use tick::{Event, update};
