//! Group-by reductions over per-segment statistics.
//!
//! Groups are the unique (Elec_distanceQ, Type) combinations observed in
//! the input; a combination with no rows never appears. Keys come out in
//! sorted order, rows within a group keep their input order.

use std::collections::BTreeMap;

/// Grouping key: electrotonic-distance quantile x segment type.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub elec_distance_q: u32,
    pub seg_type: String,
}

/// Partition rows by key, preserving row order within each group.
pub fn group_rows<T, K, F>(rows: Vec<T>, key_fn: F) -> BTreeMap<K, Vec<T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for row in rows {
        groups.entry(key_fn(&row)).or_default().push(row);
    }
    groups
}

/// Row-major stack of equal-length vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct Stacked {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl Stacked {
    pub fn row(&self, r: usize) -> &[f32] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }
}

/// Stack rows' vectors into a 2-D array, preserving order.
pub fn stack(rows: &[Vec<f32>]) -> Stacked {
    let cols = rows.first().map(|r| r.len()).unwrap_or(0);
    assert!(
        rows.iter().all(|r| r.len() == cols),
        "stacked rows must have equal length"
    );
    let mut data = Vec::with_capacity(rows.len() * cols);
    for row in rows {
        data.extend_from_slice(row);
    }
    Stacked {
        rows: rows.len(),
        cols,
        data,
    }
}

/// Median of a slice, ignoring NaN entries; NaN when nothing is left.
pub fn nan_median(values: &[f32]) -> f32 {
    let mut finite: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return f32::NAN;
    }
    finite.sort_by(f32::total_cmp);
    let n = finite.len();
    if n % 2 == 1 {
        finite[n / 2]
    } else {
        0.5 * (finite[n / 2 - 1] + finite[n / 2])
    }
}

/// Element-wise NaN-excluding median across equal-length rows.
///
/// The robust central tendency used to merge segments: a degenerate row
/// (NaN from an empty phase set or zero-mean histogram) drops out per
/// element instead of poisoning the group.
pub fn nan_median_across(rows: &[Vec<f32>]) -> Vec<f32> {
    let cols = rows.first().map(|r| r.len()).unwrap_or(0);
    assert!(
        rows.iter().all(|r| r.len() == cols),
        "median rows must have equal length"
    );
    (0..cols)
        .map(|c| {
            let column: Vec<f32> = rows.iter().map(|r| r[c]).collect();
            nan_median(&column)
        })
        .collect()
}
