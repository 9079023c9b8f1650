//! Typed dendritic-event table.
//!
//! One row per dendritic segment, with the event kind and its bound
//! sequences as statically known fields instead of name-matched columns.

use std::fmt;

/// Dendritic event kind, resolved once from the source column name.
///
/// NMDA and calcium events are plateau-like and carry a duration
/// (onset/offset pairs); every other kind is treated as instantaneous.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Nmda,
    Ca,
    Point(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "nmda" => EventKind::Nmda,
            "ca" => EventKind::Ca,
            other => EventKind::Point(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EventKind::Nmda => "nmda",
            EventKind::Ca => "ca",
            EventKind::Point(name) => name,
        }
    }

    /// Whether events of this kind carry an offset bound.
    pub fn has_duration(&self) -> bool {
        matches!(self, EventKind::Nmda | EventKind::Ca)
    }
}

/// Malformed event data, rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Onset and offset sequences differ in length.
    RaggedBounds { onsets: usize, offsets: usize },
    /// offset[i] precedes onset[i].
    InvertedBound { index: usize },
    /// A bound sequence is not in ascending sample order.
    Unsorted { index: usize },
    /// Duration-based kind paired with a point series, or vice versa.
    KindSeriesMismatch { kind: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::RaggedBounds { onsets, offsets } => write!(
                f,
                "onset/offset length mismatch: {onsets} onsets vs {offsets} offsets"
            ),
            TableError::InvertedBound { index } => {
                write!(f, "event {index}: offset precedes onset")
            }
            TableError::Unsorted { index } => {
                write!(f, "bound sequence not ascending at position {index}")
            }
            TableError::KindSeriesMismatch { kind } => {
                write!(f, "event kind '{kind}' does not match the series variant")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// A segment's event train: either instantaneous events or events with
/// duration. The tagged variant replaces the "nmda"/"ca" name branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventSeries {
    Point { onsets: Vec<u64> },
    Interval { onsets: Vec<u64>, offsets: Vec<u64> },
}

fn check_ascending(seq: &[u64]) -> Result<(), TableError> {
    for (i, w) in seq.windows(2).enumerate() {
        if w[1] < w[0] {
            return Err(TableError::Unsorted { index: i + 1 });
        }
    }
    Ok(())
}

impl EventSeries {
    pub fn point(onsets: Vec<u64>) -> Result<Self, TableError> {
        check_ascending(&onsets)?;
        Ok(EventSeries::Point { onsets })
    }

    pub fn interval(onsets: Vec<u64>, offsets: Vec<u64>) -> Result<Self, TableError> {
        if onsets.len() != offsets.len() {
            return Err(TableError::RaggedBounds {
                onsets: onsets.len(),
                offsets: offsets.len(),
            });
        }
        check_ascending(&onsets)?;
        check_ascending(&offsets)?;
        for (i, (&on, &off)) in onsets.iter().zip(offsets.iter()).enumerate() {
            if off < on {
                return Err(TableError::InvertedBound { index: i });
            }
        }
        Ok(EventSeries::Interval { onsets, offsets })
    }

    pub fn onsets(&self) -> &[u64] {
        match self {
            EventSeries::Point { onsets } => onsets,
            EventSeries::Interval { onsets, .. } => onsets,
        }
    }

    pub fn offsets(&self) -> Option<&[u64]> {
        match self {
            EventSeries::Point { .. } => None,
            EventSeries::Interval { offsets, .. } => Some(offsets),
        }
    }

    pub fn len(&self) -> usize {
        self.onsets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.onsets().is_empty()
    }

    /// Largest sample index referenced by any bound.
    pub fn last_index(&self) -> Option<u64> {
        let last_on = self.onsets().last().copied();
        let last_off = self.offsets().and_then(|o| o.last().copied());
        match (last_on, last_off) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (Some(a), None) => Some(a),
            (None, _) => None,
        }
    }
}

/// One recorded dendritic segment.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentRecord {
    /// Electrotonic-distance quantile bucket.
    pub elec_distance_q: u32,
    /// Event/segment type category (the `Type` column).
    pub seg_type: String,
    pub kind: EventKind,
    pub events: EventSeries,
}

impl SegmentRecord {
    pub fn new(
        elec_distance_q: u32,
        seg_type: String,
        kind: EventKind,
        events: EventSeries,
    ) -> Result<Self, TableError> {
        let duration_series = matches!(events, EventSeries::Interval { .. });
        if kind.has_duration() != duration_series {
            return Err(TableError::KindSeriesMismatch {
                kind: kind.name().to_string(),
            });
        }
        Ok(Self {
            elec_distance_q,
            seg_type,
            kind,
            events,
        })
    }
}

/// Per-segment event table; rows keep their input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventTable {
    pub rows: Vec<SegmentRecord>,
}

impl EventTable {
    pub fn new(rows: Vec<SegmentRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
