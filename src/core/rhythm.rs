//! Rhythmic reference series.

use std::f32::consts::PI;

use crate::core::util::linspace;

/// Instantaneous phase of a reference oscillation, one sample per
/// (possibly decimated) simulation time step.
///
/// Values are radians in (-PI, PI]. Construction debug-asserts finiteness;
/// consumers assume it and do not re-validate (non-finite samples corrupt
/// downstream statistics silently).
#[derive(Clone, Debug, PartialEq)]
pub struct RhythmSeries {
    phases: Vec<f32>,
}

impl RhythmSeries {
    pub fn new(phases: Vec<f32>) -> Self {
        debug_assert!(
            phases.iter().all(|p| p.is_finite()),
            "rhythm phases must be finite"
        );
        Self { phases }
    }

    /// Evenly spaced phase ramp from -PI to PI inclusive.
    ///
    /// One full cycle across `n` samples; handy as a synthetic rhythm in
    /// tests and demos.
    pub fn phase_ramp(n: usize) -> Self {
        Self::new(linspace(-PI, PI, n))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[inline]
    pub fn get(&self, bucket: usize) -> Option<f32> {
        self.phases.get(bucket).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.phases
    }
}
