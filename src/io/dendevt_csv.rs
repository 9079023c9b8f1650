//! Dendritic-event CSV loader.
//!
//! Expected shape: one row per segment with categorical columns
//! `Elec_distanceQ` and `Type`, plus `<kind>_lower_bound` and (for
//! duration-based kinds) `<kind>_upper_bound` columns whose cells are
//! `;`-separated ascending sample indices. The kind is resolved from the
//! header once; rows then parse into the typed table.
//!
//! Example:
//! ```text
//! Elec_distanceQ,Type,nmda_lower_bound,nmda_upper_bound
//! 0,apical,10;50,15;55
//! 1,apical,20;60,25;65
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::table::event::{EventKind, EventSeries, EventTable, SegmentRecord};

const LOWER_SUFFIX: &str = "_lower_bound";
const UPPER_SUFFIX: &str = "_upper_bound";

/// Load an event table from a CSV file.
pub fn load_dendevt_csv(path: &Path) -> Result<EventTable, String> {
    let file =
        File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    let table = parse_dendevt(file)?;
    debug!(
        target: "io::dendevt",
        "loaded {} segments from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parse event CSV from a reader.
pub fn parse_dendevt<R: Read>(reader: R) -> Result<EventTable, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| format!("cannot read header row: {e}"))?
        .clone();

    let dist_col = find_column(&headers, "Elec_distanceQ")?;
    let type_col = find_column(&headers, "Type")?;

    let (lower_col, kind) = headers
        .iter()
        .enumerate()
        .find_map(|(i, h)| {
            h.strip_suffix(LOWER_SUFFIX)
                .map(|prefix| (i, EventKind::from_name(prefix)))
        })
        .ok_or_else(|| format!("no column ending in '{LOWER_SUFFIX}'"))?;

    let upper_col = if kind.has_duration() {
        let name = format!("{}{}", kind.name(), UPPER_SUFFIX);
        Some(find_column(&headers, &name)?)
    } else {
        None
    };

    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| format!("CSV row {}: {e}", row_idx + 1))?;

        let elec_distance_q: u32 = field(&record, row_idx, dist_col)?
            .trim()
            .parse()
            .map_err(|e| format!("row {}: bad Elec_distanceQ: {e}", row_idx + 1))?;
        let seg_type = field(&record, row_idx, type_col)?.trim().to_string();

        let onsets = parse_index_list(field(&record, row_idx, lower_col)?)
            .map_err(|e| format!("row {}: {e}", row_idx + 1))?;

        let events = match upper_col {
            Some(col) => {
                let offsets = parse_index_list(field(&record, row_idx, col)?)
                    .map_err(|e| format!("row {}: {e}", row_idx + 1))?;
                EventSeries::interval(onsets, offsets)
            }
            None => EventSeries::point(onsets),
        }
        .map_err(|e| format!("row {}: {e}", row_idx + 1))?;

        let row = SegmentRecord::new(elec_distance_q, seg_type, kind.clone(), events)
            .map_err(|e| format!("row {}: {e}", row_idx + 1))?;
        rows.push(row);
    }

    Ok(EventTable::new(rows))
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, String> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| format!("missing '{name}' column"))
}

fn field<'r>(
    record: &'r csv::StringRecord,
    row_idx: usize,
    col: usize,
) -> Result<&'r str, String> {
    record
        .get(col)
        .ok_or_else(|| format!("row {}: missing field {col}", row_idx + 1))
}

/// Parse a `;`-separated list of sample indices; an empty cell is an
/// empty list.
fn parse_index_list(cell: &str) -> Result<Vec<u64>, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(Vec::new());
    }
    cell.split(';')
        .map(|s| {
            s.trim()
                .parse::<u64>()
                .map_err(|e| format!("bad sample index '{s}': {e}"))
        })
        .collect()
}
