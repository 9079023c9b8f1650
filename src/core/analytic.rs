//! Instantaneous phase of a raw oscillatory recording.
//!
//! The rhythm source upstream of the entrainment pipeline: a band-limited
//! reference signal (e.g. an afferent LFP oscillation) is turned into its
//! analytic signal via FFT, and the argument of each sample gives the
//! instantaneous phase in (-PI, PI].

use rustfft::{num_complex::Complex32, num_traits::Zero, FftPlanner};

use crate::core::rhythm::RhythmSeries;

/// FFT-based analytic signal (same length as input).
pub fn analytic_signal(input: &[f32]) -> Vec<Complex32> {
    let n0 = input.len();
    if n0 == 0 {
        return Vec::new();
    }
    let n = n0.next_power_of_two();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut x: Vec<Complex32> = input.iter().map(|&v| Complex32::new(v, 0.0)).collect();
    x.resize(n, Complex32::zero());

    fft.process(&mut x);

    // Analytic spectrum: keep DC and Nyquist, double positive
    // frequencies, zero negative ones.
    for i in 1..n {
        if i < n / 2 {
            x[i] *= Complex32::new(2.0, 0.0);
        } else if i > n / 2 {
            x[i] = Complex32::zero();
        }
    }

    ifft.process(&mut x);

    // rustfft does not scale the inverse transform
    let scale = 1.0 / n as f32;
    for xi in x.iter_mut() {
        *xi *= scale;
    }

    x.truncate(n0);
    x
}

/// Instantaneous phase (radians) of each input sample.
pub fn instantaneous_phase(input: &[f32]) -> Vec<f32> {
    analytic_signal(input)
        .iter()
        .map(|c| c.im.atan2(c.re))
        .collect()
}

/// Rhythm series from a raw signal, decimated by `step`.
///
/// Keeps the phase of the first sample of each `step`-wide bucket, so the
/// result pairs with `event_phases` called at the same step.
pub fn rhythm_from_signal(input: &[f32], step: u64) -> RhythmSeries {
    assert!(step > 0, "decimation step must be positive");
    let phases = instantaneous_phase(input);
    let decimated: Vec<f32> = phases.iter().copied().step_by(step as usize).collect();
    RhythmSeries::new(decimated)
}
