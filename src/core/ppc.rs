//! Pairwise phase consistency.
//!
//! PPC is the mean of cos(theta_i - theta_j) over all unordered pairs,
//! an estimator of phase-locking strength that is unbiased with respect
//! to sample count (the squared mean resultant length is biased upward
//! for small n). Computed in O(n) via the resultant-vector identity
//!
//!     PPC = (|sum e^{i theta}|^2 - n) / (n^2 - n)
//!
//! rather than the O(n^2) pair loop; event counts can run into the
//! thousands per segment.

/// PPC of a set of phase angles (radians).
///
/// Returns NaN when n <= 1: a single event carries no pairwise
/// information. The NaN propagates into aggregation, where NaN-aware
/// medians treat it as missing; it is never reported as 0.
///
/// Inputs are assumed finite, in (-PI, PI]; non-finite phases corrupt
/// the result silently.
pub fn ppc(phases: &[f32]) -> f32 {
    let n = phases.len();
    if n <= 1 {
        return f32::NAN;
    }
    let mut re = 0.0f64;
    let mut im = 0.0f64;
    for &p in phases {
        let p = p as f64;
        re += p.cos();
        im += p.sin();
    }
    let n = n as f64;
    let resultant_sq = re * re + im * im;
    ((resultant_sq - n) / (n * (n - 1.0))) as f32
}
