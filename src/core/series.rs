//! Decimated binary occupancy series for event trains.
//!
//! An alternative event representation used by the series-entrainment
//! pipeline: each rhythm bucket holds 1 while an event is in progress and
//! 0 otherwise, so onsets reappear as rising edges.

use crate::table::event::EventSeries;

/// Render a segment's events as a 0/1 series of `len` buckets at
/// decimation `step`.
///
/// Interval events occupy every bucket from onset through offset; point
/// events occupy their onset bucket alone. Events whose bucket falls past
/// `len` are outside the analysis window and ignored.
pub fn occupancy_series(events: &EventSeries, len: usize, step: u64) -> Vec<u8> {
    assert!(step > 0, "decimation step must be positive");
    let mut series = vec![0u8; len];
    match events {
        EventSeries::Point { onsets } => {
            for &on in onsets {
                let b = (on / step) as usize;
                if b < len {
                    series[b] = 1;
                }
            }
        }
        EventSeries::Interval { onsets, offsets } => {
            for (&on, &off) in onsets.iter().zip(offsets.iter()) {
                let lo = (on / step) as usize;
                let hi = (off / step) as usize;
                if lo >= len {
                    continue;
                }
                let hi = hi.min(len - 1);
                for b in &mut series[lo..=hi] {
                    *b = 1;
                }
            }
        }
    }
    series
}

/// Bucket indices where the series steps 0 -> 1.
///
/// Matches difference-based edge detection: an occupied first bucket has
/// no rising edge and is not reported.
pub fn rising_edges(series: &[u8]) -> Vec<usize> {
    series
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] == 0 && w[1] != 0)
        .map(|(i, _)| i + 1)
        .collect()
}
