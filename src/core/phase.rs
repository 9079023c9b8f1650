//! Event-index to phase mapping.
//!
//! Events are recorded as integer sample-indices of the simulation clock;
//! the rhythm series is sampled once every `step` simulation samples. An
//! event at index i therefore falls in rhythm bucket i / step.

use std::f32::consts::{PI, TAU};
use std::fmt;

use crate::core::rhythm::RhythmSeries;
use crate::table::event::EventSeries;

/// Normalize to the range [-PI, PI).
#[inline]
pub fn wrap_pm_pi(x: f32) -> f32 {
    (x + PI).rem_euclid(TAU) - PI
}

/// Errors from mapping event indices into a rhythm series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseError {
    /// An event index lands past the end of the rhythm series. The caller
    /// must supply a rhythm covering the full event index range; this is
    /// a contract violation, never clamped.
    RhythmTooShort {
        index: u64,
        bucket: usize,
        len: usize,
    },
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseError::RhythmTooShort { index, bucket, len } => write!(
                f,
                "rhythm series too short: event index {index} maps to bucket {bucket}, \
                 series has {len} samples"
            ),
        }
    }
}

impl std::error::Error for PhaseError {}

/// Phase of the rhythm at each event index, at decimation `step`.
///
/// No interpolation: bucket = index / step (integer floor division), then
/// a plain lookup.
pub fn event_phases(
    rhythm: &RhythmSeries,
    indices: &[u64],
    step: u64,
) -> Result<Vec<f32>, PhaseError> {
    assert!(step > 0, "decimation step must be positive");
    let mut phases = Vec::with_capacity(indices.len());
    for &index in indices {
        let bucket = (index / step) as usize;
        match rhythm.get(bucket) {
            Some(phase) => phases.push(phase),
            None => {
                return Err(PhaseError::RhythmTooShort {
                    index,
                    bucket,
                    len: rhythm.len(),
                })
            }
        }
    }
    Ok(phases)
}

/// The one or two phase sets derived from a segment's events.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentPhases {
    pub onset: Vec<f32>,
    /// Present for duration-based events only.
    pub offset: Option<Vec<f32>>,
}

/// Map a segment's event series to phases, dispatching on the variant:
/// interval events (NMDA / calcium plateaus) yield onset- and offset-phase
/// sets in one pass, point events the onset set alone.
pub fn segment_phases(
    rhythm: &RhythmSeries,
    events: &EventSeries,
    step: u64,
) -> Result<SegmentPhases, PhaseError> {
    match events {
        EventSeries::Point { onsets } => Ok(SegmentPhases {
            onset: event_phases(rhythm, onsets, step)?,
            offset: None,
        }),
        EventSeries::Interval { onsets, offsets } => Ok(SegmentPhases {
            onset: event_phases(rhythm, onsets, step)?,
            offset: Some(event_phases(rhythm, offsets, step)?),
        }),
    }
}
