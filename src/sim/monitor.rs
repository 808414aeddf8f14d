//! Energy conservation monitoring
//!
//! Without drag the integrator should keep the total energy flat; with drag it
//! may only lose energy. The monitor tracks a baseline and flags either kind
//! of numerical misbehaviour.

use std::fmt;

use super::config::PhysicsConfig;
use crate::consts::ENERGY_TOLERANCE;

/// A conservation problem found by [`EnergyMonitor::observe`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    /// Undamped run drifted away from its baseline (relative error)
    Drift { relative: f64 },
    /// Damped run gained energy since the previous observation
    Gain { amount: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Drift { relative } => {
                write!(f, "energy drifted {:.2}% from baseline", relative * 100.0)
            }
            Violation::Gain { amount } => write!(f, "energy rose by {:.1} despite drag", amount),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnergyMonitor {
    baseline: Option<f64>,
    last: Option<f64>,
    tolerance: f64,
    damped: bool,
}

impl EnergyMonitor {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            baseline: None,
            last: None,
            tolerance: ENERGY_TOLERANCE,
            damped: config.drag > 0.0,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Forget the baseline. Moving the ground does work on the ball, so the
    /// next observation starts a new one.
    pub fn rebase(&mut self) {
        self.baseline = None;
        self.last = None;
    }

    /// Baseline total energy, if one has been recorded
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Record a total energy sample
    pub fn observe(&mut self, total: f64) -> Option<Violation> {
        let Some(baseline) = self.baseline else {
            self.baseline = Some(total);
            self.last = Some(total);
            return None;
        };
        let last = self.last.replace(total).unwrap_or(baseline);

        if self.damped {
            let amount = total - last;
            (amount > self.tolerance * baseline.abs()).then_some(Violation::Gain { amount })
        } else {
            // Relative error (avoid division by zero)
            let relative = if baseline.abs() > 1e-12 {
                (total - baseline).abs() / baseline.abs()
            } else {
                (total - baseline).abs()
            };
            (relative > self.tolerance).then_some(Violation::Drift { relative })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::diagnostics::Energy;
    use crate::sim::integrator::advance;
    use crate::sim::state::SimulationState;

    #[test]
    fn test_first_sample_sets_baseline() {
        let mut monitor = EnergyMonitor::new(&PhysicsConfig::default());
        assert_eq!(monitor.baseline(), None);
        assert_eq!(monitor.observe(100.0), None);
        assert_eq!(monitor.baseline(), Some(100.0));
    }

    #[test]
    fn test_undamped_drift_is_reported() {
        let mut monitor = EnergyMonitor::new(&PhysicsConfig::default());
        monitor.observe(1000.0);
        assert_eq!(monitor.observe(1005.0), None);
        match monitor.observe(1020.0) {
            Some(Violation::Drift { relative }) => assert!((relative - 0.02).abs() < 1e-12),
            other => panic!("expected drift, got {:?}", other),
        }
    }

    #[test]
    fn test_damped_gain_is_reported() {
        let mut monitor = EnergyMonitor::new(&PhysicsConfig::damped(1.0));
        monitor.observe(1000.0);
        assert_eq!(monitor.observe(900.0), None);
        assert_eq!(monitor.observe(905.0), None);
        assert_eq!(monitor.observe(950.0), Some(Violation::Gain { amount: 45.0 }));
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::Drift { relative: 0.0234 }.to_string(),
            "energy drifted 2.34% from baseline"
        );
        assert_eq!(
            Violation::Gain { amount: 12.0 }.to_string(),
            "energy rose by 12.0 despite drag"
        );
    }

    #[test]
    fn test_rebase_forgets_baseline() {
        let mut monitor = EnergyMonitor::new(&PhysicsConfig::default());
        monitor.observe(10.0);
        monitor.rebase();
        assert_eq!(monitor.observe(500.0), None);
        assert_eq!(monitor.baseline(), Some(500.0));
    }

    #[test]
    fn test_zero_baseline_uses_absolute_error() {
        let mut monitor = EnergyMonitor::new(&PhysicsConfig::default()).with_tolerance(0.5);
        monitor.observe(0.0);
        assert_eq!(monitor.observe(0.25), None);
        assert!(monitor.observe(1.0).is_some());
    }

    #[test]
    fn test_quiet_during_free_bounce() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::for_window(&config, 1920, 1080);
        let mut monitor = EnergyMonitor::new(&config);

        for _ in 0..600 {
            advance(&mut state, &config, 16.0);
            let total = Energy::measure(&state, &config).total;
            assert_eq!(monitor.observe(total), None);
        }
    }
}
