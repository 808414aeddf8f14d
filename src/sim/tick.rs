//! Event dispatch
//!
//! The host feeds a strictly sequential stream of events into [`update`].

use super::config::PhysicsConfig;
use super::controller::{drag_end, drag_move, drag_start, drop_ball, resize};
use super::diagnostics::annotate;
use super::integrator::advance;
use super::state::SimulationState;

/// Everything that can happen to the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Real time elapsed since the previous tick (ms)
    Tick { elapsed_ms: f64 },
    /// Pointer/touch pressed at a vertical coordinate
    DragStart { pointer: f64 },
    /// Pointer/touch moved to a vertical coordinate
    DragMove { pointer: f64 },
    /// Pointer/touch released, cancelled or left the scene
    DragEnd,
    /// Window resized (CSS pixels)
    Resize { width: u32, height: u32 },
    /// Drop the ball again from the top
    Drop,
}

impl Event {
    #[inline]
    pub fn is_tick(&self) -> bool {
        matches!(self, Event::Tick { .. })
    }
}

/// Apply one event and refresh the diagnostics line
pub fn update(state: &mut SimulationState, config: &PhysicsConfig, event: Event) {
    match event {
        Event::Tick { elapsed_ms } => {
            advance(state, config, elapsed_ms);
        }
        Event::DragStart { pointer } => drag_start(state, pointer),
        Event::DragMove { pointer } => {
            drag_move(state, config, pointer);
        }
        Event::DragEnd => drag_end(state),
        Event::Resize { width, height } => resize(state, config, width, height),
        Event::Drop => {
            drop_ball(state, config);
            log::debug!("Ball dropped from {}", state.y);
        }
    }

    annotate(state, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::diagnostics::{Energy, format_line};

    fn assert_text_current(state: &SimulationState, config: &PhysicsConfig) {
        let expected = format_line(&Energy::measure(state, config), state.v);
        assert_eq!(state.text, expected);
    }

    #[test]
    fn test_gesture_sequence() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::for_window(&config, 1000, 800);

        let events = [
            Event::Tick { elapsed_ms: 16.0 },
            Event::DragStart { pointer: 350.0 },
            Event::DragMove { pointer: 300.0 },
            Event::Tick { elapsed_ms: 16.0 },
            Event::DragMove { pointer: 280.0 },
            Event::DragEnd,
            Event::DragMove { pointer: 0.0 },
            Event::Tick { elapsed_ms: 16.0 },
        ];

        for event in events {
            update(&mut state, &config, event);
            assert_text_current(&state, &config);
        }

        // Only the two moves inside the gesture count
        assert_eq!(state.h, 350.0 - 50.0 - 20.0);
        assert!(!state.dragging());
        assert!(state.y > config.radius);
    }

    #[test]
    fn test_resize_event_rebases_ground() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::for_window(&config, 1000, 800);

        update(
            &mut state,
            &config,
            Event::Resize {
                width: 1000,
                height: 800,
            },
        );
        assert_eq!(state.width, 900.0);
        assert_eq!(state.height, 400.0);
        assert_eq!(state.h, 400.0 - config.radius);
        assert_text_current(&state, &config);
    }

    #[test]
    fn test_zero_tick_keeps_state() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::for_window(&config, 1280, 720);
        update(&mut state, &config, Event::Tick { elapsed_ms: 33.0 });
        let before = state.clone();

        update(&mut state, &config, Event::Tick { elapsed_ms: 0.0 });
        assert_eq!(state, before);
    }

    #[test]
    fn test_drop_event() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::for_window(&config, 1000, 800);
        for _ in 0..30 {
            update(&mut state, &config, Event::Tick { elapsed_ms: 16.0 });
        }
        assert!(state.y > config.radius);

        update(&mut state, &config, Event::Drop);
        assert_eq!(state.y, config.radius);
        assert_eq!(state.v, 0.0);
        assert_text_current(&state, &config);
    }

    #[test]
    fn test_determinism() {
        let config = PhysicsConfig::default();
        let mut state1 = SimulationState::for_window(&config, 1024, 768);
        let mut state2 = SimulationState::for_window(&config, 1024, 768);

        let events = [
            Event::Tick { elapsed_ms: 16.7 },
            Event::DragStart { pointer: 100.0 },
            Event::DragMove { pointer: 90.0 },
            Event::Tick { elapsed_ms: 8.3 },
            Event::DragEnd,
            Event::Tick { elapsed_ms: 250.0 },
        ];

        for event in events {
            update(&mut state1, &config, event);
            update(&mut state2, &config, event);
        }

        assert_eq!(state1, state2);
    }

    #[test]
    fn test_is_tick() {
        assert!(Event::Tick { elapsed_ms: 1.0 }.is_tick());
        assert!(!Event::DragEnd.is_tick());
    }
}
