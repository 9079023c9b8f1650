//! Top-level entrainment pipelines.
//!
//! Each pipeline runs the same strictly sequential stages: map event
//! indices to phases, derive per-segment statistics (percent-deviation
//! histogram, PPC), then merge segments by group with NaN-aware medians.
//! Stages are pure; failures propagate to the caller untouched.

use std::error::Error;
use std::path::Path;

use tracing::debug;

use crate::core::histogram::{phase_histogram, BinEdges};
use crate::core::phase::{segment_phases, PhaseError};
use crate::core::ppc::ppc;
use crate::core::rhythm::RhythmSeries;
use crate::core::series::{occupancy_series, rising_edges};
use crate::io::dendevt_csv::load_dendevt_csv;
use crate::table::aggregate::{group_rows, nan_median, nan_median_across, stack, GroupKey, Stacked};
use crate::table::event::EventTable;

/// Median percent-deviation histogram per (distance quantile, type) group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupHistograms {
    pub key: GroupKey,
    pub onset: Vec<f32>,
    /// Present when the group's events carry durations.
    pub offset: Option<Vec<f32>>,
}

/// Median PPC per (distance quantile, type) group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupPpc {
    pub key: GroupKey,
    pub onset: f32,
    pub offset: Option<f32>,
}

/// Group-level histograms restacked by type alone.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeHistograms {
    pub seg_type: String,
    pub onset: Stacked,
    pub offset: Option<Stacked>,
}

/// Group-level PPC values collected by type alone.
#[derive(Clone, Debug, PartialEq)]
pub struct TypePpc {
    pub seg_type: String,
    pub onset: Vec<f32>,
    pub offset: Option<Vec<f32>>,
}

/// Median PPC of series-derived onsets per group.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPpc {
    pub key: GroupKey,
    pub ppc: f32,
}

struct SegmentStats {
    onset_hist: Vec<f32>,
    offset_hist: Option<Vec<f32>>,
    onset_ppc: f32,
    offset_ppc: Option<f32>,
}

/// Entrainment of dendritic events by electrotonic distance and type.
///
/// For every segment, event onsets (and offsets, for duration-based
/// kinds) are mapped to rhythm phases, binned into a percent-deviation
/// histogram with `edge_count` evenly spaced edges over (-PI, PI], and
/// scored with PPC. Segments are then merged per observed
/// (Elec_distanceQ, Type) combination by element-wise NaN-median.
pub fn entrainment_by_distance(
    table: &EventTable,
    rhythm: &RhythmSeries,
    step: u64,
    edge_count: usize,
) -> Result<(Vec<GroupHistograms>, Vec<GroupPpc>), PhaseError> {
    let edges = BinEdges::spanning(edge_count);

    let mut per_row = Vec::with_capacity(table.len());
    for row in &table.rows {
        let phases = segment_phases(rhythm, &row.events, step)?;
        let stats = SegmentStats {
            onset_hist: phase_histogram(&phases.onset, &edges),
            offset_hist: phases.offset.as_ref().map(|p| phase_histogram(p, &edges)),
            onset_ppc: ppc(&phases.onset),
            offset_ppc: phases.offset.as_ref().map(|p| ppc(p)),
        };
        let key = GroupKey {
            elec_distance_q: row.elec_distance_q,
            seg_type: row.seg_type.clone(),
        };
        per_row.push((key, stats));
    }

    let groups = group_rows(per_row, |(key, _)| key.clone());
    debug!(
        target: "pipeline",
        "{} segments in {} (distance, type) groups",
        table.len(),
        groups.len()
    );

    let mut hist_table = Vec::with_capacity(groups.len());
    let mut ppc_table = Vec::with_capacity(groups.len());
    for (key, rows) in groups {
        let onset_hists: Vec<Vec<f32>> = rows.iter().map(|(_, s)| s.onset_hist.clone()).collect();
        let offset_hists: Vec<Vec<f32>> = rows
            .iter()
            .filter_map(|(_, s)| s.offset_hist.clone())
            .collect();
        hist_table.push(GroupHistograms {
            key: key.clone(),
            onset: nan_median_across(&onset_hists),
            offset: if offset_hists.is_empty() {
                None
            } else {
                Some(nan_median_across(&offset_hists))
            },
        });

        let onset_ppcs: Vec<f32> = rows.iter().map(|(_, s)| s.onset_ppc).collect();
        let offset_ppcs: Vec<f32> = rows.iter().filter_map(|(_, s)| s.offset_ppc).collect();
        ppc_table.push(GroupPpc {
            key,
            onset: nan_median(&onset_ppcs),
            offset: if offset_ppcs.is_empty() {
                None
            } else {
                Some(nan_median(&offset_ppcs))
            },
        });
    }

    Ok((hist_table, ppc_table))
}

/// File-level pipeline: load the event CSV, compute per-(distance, type)
/// entrainment, then regroup both tables by type alone: histograms
/// stacked row-major, PPC values collected in distance order.
pub fn entrainment_from_file(
    path: &Path,
    rhythm: &RhythmSeries,
    step: u64,
    edge_count: usize,
) -> Result<(Vec<TypeHistograms>, Vec<TypePpc>), Box<dyn Error>> {
    let table = load_dendevt_csv(path)?;
    let (hist_by_distance, ppc_by_distance) =
        entrainment_by_distance(&table, rhythm, step, edge_count)?;

    let hist_groups = group_rows(hist_by_distance, |g| g.key.seg_type.clone());
    let hist_by_type = hist_groups
        .into_iter()
        .map(|(seg_type, rows)| {
            let onsets: Vec<Vec<f32>> = rows.iter().map(|g| g.onset.clone()).collect();
            let offsets: Vec<Vec<f32>> = rows.iter().filter_map(|g| g.offset.clone()).collect();
            TypeHistograms {
                seg_type,
                onset: stack(&onsets),
                offset: if offsets.is_empty() {
                    None
                } else {
                    Some(stack(&offsets))
                },
            }
        })
        .collect();

    let ppc_groups = group_rows(ppc_by_distance, |g| g.key.seg_type.clone());
    let ppc_by_type = ppc_groups
        .into_iter()
        .map(|(seg_type, rows)| {
            let offsets: Vec<f32> = rows.iter().filter_map(|g| g.offset).collect();
            TypePpc {
                seg_type,
                onset: rows.iter().map(|g| g.onset).collect(),
                offset: if offsets.is_empty() { None } else { Some(offsets) },
            }
        })
        .collect();

    Ok((hist_by_type, ppc_by_type))
}

/// Entrainment of the decimated binary occupancy series.
///
/// Each segment's events are rendered as a 0/1 series over the rhythm's
/// buckets; onsets recovered from rising edges are scored with PPC and
/// merged per group by NaN-median. Events past the rhythm window are
/// outside the analysis and ignored.
pub fn entrainment_of_series(
    table: &EventTable,
    rhythm: &RhythmSeries,
    step: u64,
) -> Vec<SeriesPpc> {
    let mut per_row = Vec::with_capacity(table.len());
    for row in &table.rows {
        let series = occupancy_series(&row.events, rhythm.len(), step);
        // rising-edge buckets are indices into the series, so they are
        // always within the rhythm
        let phases: Vec<f32> = rising_edges(&series)
            .into_iter()
            .map(|b| rhythm.as_slice()[b])
            .collect();
        let key = GroupKey {
            elec_distance_q: row.elec_distance_q,
            seg_type: row.seg_type.clone(),
        };
        per_row.push((key, ppc(&phases)));
    }

    group_rows(per_row, |(key, _)| key.clone())
        .into_iter()
        .map(|(key, rows)| {
            let values: Vec<f32> = rows.iter().map(|(_, v)| *v).collect();
            SeriesPpc {
                key,
                ppc: nan_median(&values),
            }
        })
        .collect()
}
