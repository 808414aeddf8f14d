//! Fixed sub-step integrator for the ball on the spring ground
//!
//! The contact is a stiff linear spring, so a frame is split into many short
//! sub-steps. Each sub-step evaluates the spring at the predicted midpoint and
//! advances the position with the average of the old and new velocity, which
//! keeps the total energy flat over long runs.

use super::config::PhysicsConfig;
use super::state::SimulationState;

/// Depth of the ball's lower hemisphere below the ground line, in [0, radius]
#[inline]
pub fn compression(y: f64, h: f64, radius: f64) -> f64 {
    (y + radius - h).clamp(0.0, radius)
}

/// Advance the state by `elapsed_ms` of real time.
///
/// Returns the number of sub-steps executed. Zero (or non-positive) elapsed
/// time leaves the state untouched.
pub fn advance(state: &mut SimulationState, config: &PhysicsConfig, elapsed_ms: f64) -> u32 {
    // Also rejects NaN
    if !(elapsed_ms > 0.0) {
        return 0;
    }

    let pending = state.substep_carry + config.substeps_for(elapsed_ms);
    let whole = pending.floor();
    let (steps, carry) = if whole > config.max_substeps as f64 {
        log::debug!(
            "Tick of {:.1} ms needs {} sub-steps, capping at {}",
            elapsed_ms,
            whole,
            config.max_substeps
        );
        (config.max_substeps, 0.0)
    } else {
        (whole as u32, pending - whole)
    };

    let dt = config.substep_seconds();
    for _ in 0..steps {
        step(state, config, dt);
    }
    state.substep_carry = carry;

    steps
}

/// One sub-step of `dt` simulated seconds
#[inline]
pub fn step(state: &mut SimulationState, config: &PhysicsConfig, dt: f64) {
    let y_mid = state.y + 0.5 * state.v * dt;
    let c = compression(y_mid, state.h, config.radius);

    let accel = config.gravity - config.spring * c - config.drag * state.v;
    let v_next = state.v + accel * dt;

    state.y += 0.5 * (state.v + v_next) * dt;
    state.v = v_next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::diagnostics::Energy;
    use proptest::prelude::*;

    const FRAME_MS: f64 = 16.0;

    fn drop_state(config: &PhysicsConfig) -> SimulationState {
        SimulationState::new(config.radius, 3.0 * config.radius)
    }

    #[test]
    fn test_zero_tick_is_identity() {
        let config = PhysicsConfig::default();
        let mut state = drop_state(&config);
        state.v = 123.0;
        state.substep_carry = 0.25;
        let before = state.clone();

        assert_eq!(advance(&mut state, &config, 0.0), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_negative_and_nan_ticks_are_ignored() {
        let config = PhysicsConfig::default();
        let mut state = drop_state(&config);
        let before = state.clone();

        assert_eq!(advance(&mut state, &config, -5.0), 0);
        assert_eq!(advance(&mut state, &config, f64::NAN), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_fractional_time_is_carried() {
        let config = PhysicsConfig::default();
        let mut state = drop_state(&config);

        // 0.25 sub-steps each: nothing runs until the fourth call
        let mut total = 0;
        for _ in 0..3 {
            total += advance(&mut state, &config, 0.025);
        }
        assert_eq!(total, 0);
        assert!(state.substep_carry > 0.7);
        total += advance(&mut state, &config, 0.025);
        assert_eq!(total, 1);
        assert!(state.substep_carry < 1e-6 || state.substep_carry > 1.0 - 1e-6);
    }

    #[test]
    fn test_huge_tick_is_capped_and_finite() {
        let config = PhysicsConfig::default();
        let mut state = drop_state(&config);

        let steps = advance(&mut state, &config, 1.0e12);
        assert_eq!(steps, config.max_substeps);
        assert_eq!(state.substep_carry, 0.0);
        assert!(state.y.is_finite());
        assert!(state.v.is_finite());

        let steps = advance(&mut state, &config, f64::INFINITY);
        assert_eq!(steps, config.max_substeps);
        assert!(state.y.is_finite());
    }

    #[test]
    fn test_drop_falls_then_rebounds() {
        let config = PhysicsConfig::default();
        let mut state = drop_state(&config);
        let start_y = state.y;

        let mut heights = Vec::new();
        let mut elapsed = 0.0;
        while elapsed < 1000.0 {
            let dt = FRAME_MS.min(1000.0 - elapsed);
            advance(&mut state, &config, dt);
            elapsed += dt;
            heights.push(state.y);
        }

        // Fell
        let (peak_idx, peak) = heights
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, y)| if y > best.1 { (i, y) } else { best });
        assert!(peak > start_y);

        // Touched the ground
        assert!(peak + config.radius > state.h);

        // Came back up after the lowest point
        assert!(peak_idx + 1 < heights.len());
        assert!(heights[peak_idx + 1..].iter().any(|&y| y < peak - 10.0));
    }

    #[test]
    fn test_energy_conserved_without_drag() {
        let config = PhysicsConfig::default();
        let mut state = drop_state(&config);
        let e0 = Energy::measure(&state, &config).total;

        // 20 simulated seconds
        for _ in 0..1250 {
            advance(&mut state, &config, FRAME_MS);
            let e = Energy::measure(&state, &config).total;
            assert!(
                ((e - e0) / e0).abs() < 0.01,
                "energy drifted from {} to {}",
                e0,
                e
            );
        }
    }

    #[test]
    fn test_drag_settles_ball() {
        let config = PhysicsConfig::damped(5.0);
        let mut state = drop_state(&config);
        let e0 = Energy::measure(&state, &config).total;
        let mut prev = e0;

        for _ in 0..1250 {
            advance(&mut state, &config, FRAME_MS);
            let e = Energy::measure(&state, &config).total;
            assert!(e <= prev + 1e-6 * e0, "energy rose from {} to {}", prev, e);
            prev = e;
        }

        assert!(prev < e0);
        assert!((state.y - config.rest_height(state.h)).abs() < 0.01);
        assert!(state.v.abs() < 0.01);
    }

    proptest! {
        #[test]
        fn prop_compression_within_radius(
            y in -1.0e6f64..1.0e6,
            h in -1.0e6f64..1.0e6,
            radius in 0.1f64..500.0,
        ) {
            let c = compression(y, h, radius);
            prop_assert!(c >= 0.0);
            prop_assert!(c <= radius);
        }

        #[test]
        fn prop_advance_stays_finite(
            y in 0.0f64..2000.0,
            v in -5000.0f64..5000.0,
            h in 75.0f64..2000.0,
            ticks in proptest::collection::vec(0.0f64..250.0, 1..20),
        ) {
            let config = PhysicsConfig::default();
            let mut state = SimulationState::new(y, h);
            state.v = v;
            for dt in ticks {
                advance(&mut state, &config, dt);
                prop_assert!(state.y.is_finite());
                prop_assert!(state.v.is_finite());
                prop_assert!((0.0..1.0).contains(&state.substep_carry));
            }
        }
    }
}
