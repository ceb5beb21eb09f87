//! Simulated service invocations.
//!
//! Nothing is executed: each call only draws the service's error trial.

use rand::Rng;
use serde::Serialize;
use soa_core::DataService;

/// Outcome counts of simulated calls to one service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InvocationStats {
    /// Number of simulated calls.
    pub calls: u64,
    /// Calls whose error trial fired.
    pub failures: u64,
}

impl InvocationStats {
    /// Fraction of calls that failed.
    pub fn observed_error_rate(&self) -> f64 {
        if self.calls > 0 {
            self.failures as f64 / self.calls as f64
        } else {
            0.0
        }
    }
}

/// Simulate `calls` invocations of `service`.
pub fn simulate_invocations<R: Rng>(service: &DataService, calls: u64, rng: &mut R) -> InvocationStats {
    let failures = (0..calls).filter(|_| service.rand_error_rate(rng)).count() as u64;
    InvocationStats { calls, failures }
}
