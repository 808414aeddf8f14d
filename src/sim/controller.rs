//! Drag and resize handling
//!
//! Pointer coordinates are vertical scene coordinates. A non-finite coordinate
//! means the host had no usable point (e.g. a touch end without touches) and
//! is ignored.

use super::config::PhysicsConfig;
use super::state::SimulationState;
use crate::consts::{SCENE_HEIGHT_FRACTION, SCENE_WIDTH_FRACTION};

/// Begin dragging the ground line at `pointer`
pub fn drag_start(state: &mut SimulationState, pointer: f64) {
    if !pointer.is_finite() {
        return;
    }
    state.drag_anchor = Some(pointer);
}

/// Move the ground by the pointer delta since the last drag event.
///
/// Returns true if the ground line was updated.
pub fn drag_move(state: &mut SimulationState, config: &PhysicsConfig, pointer: f64) -> bool {
    let Some(last) = state.drag_anchor else {
        return false;
    };
    if !pointer.is_finite() {
        return false;
    }

    let (min, max) = config.ground_range(state.height);
    state.h = (state.h + (pointer - last)).clamp(min, max);
    state.drag_anchor = Some(pointer);
    true
}

/// Finish the current drag gesture (if any)
pub fn drag_end(state: &mut SimulationState) {
    state.drag_anchor = None;
}

/// Fit the scene to a new window size and put the ground back on the rest line
pub fn resize(state: &mut SimulationState, config: &PhysicsConfig, width: u32, height: u32) {
    state.width = SCENE_WIDTH_FRACTION * width as f64;
    state.height = SCENE_HEIGHT_FRACTION * height as f64;
    state.h = state.height - config.radius;
    log::debug!(
        "Scene resized to {}x{}, ground at {}",
        state.width,
        state.height,
        state.h
    );
}

/// Drop the ball again from the top of the scene
pub fn drop_ball(state: &mut SimulationState, config: &PhysicsConfig) {
    state.y = config.radius;
    state.v = 0.0;
    state.substep_carry = 0.0;
}
