use dendrophase::core::rhythm::RhythmSeries;
use dendrophase::pipeline::entrainment_by_distance;
use dendrophase::table::event::{EventKind, EventSeries, EventTable, SegmentRecord};

fn point_row(q: u32, seg_type: &str, onsets: Vec<u64>) -> SegmentRecord {
    SegmentRecord::new(
        q,
        seg_type.to_string(),
        EventKind::from_name("na"),
        EventSeries::point(onsets).unwrap(),
    )
    .unwrap()
}

#[test]
fn one_output_row_per_observed_key_combination() {
    let table = EventTable::new(vec![
        point_row(0, "apical", vec![5, 15]),
        point_row(1, "apical", vec![25, 35]),
        point_row(0, "basal", vec![45, 55]),
        point_row(0, "apical", vec![65, 75]),
    ]);
    let rhythm = RhythmSeries::phase_ramp(100);
    let (hist, ppc) = entrainment_by_distance(&table, &rhythm, 1, 5).unwrap();

    // 3 distinct (q, type) pairs; (1, "basal") never occurs and never appears
    assert_eq!(hist.len(), 3);
    assert_eq!(ppc.len(), 3);
    assert!(!hist
        .iter()
        .any(|g| g.key.elec_distance_q == 1 && g.key.seg_type == "basal"));

    // keys come out sorted
    let keys: Vec<(u32, &str)> = hist
        .iter()
        .map(|g| (g.key.elec_distance_q, g.key.seg_type.as_str()))
        .collect();
    assert_eq!(keys, vec![(0, "apical"), (0, "basal"), (1, "apical")]);
}

#[test]
fn degenerate_rows_drop_out_of_the_group_median() {
    // Two rows in the same group: one with events, one without. The empty
    // row's histogram is all-NaN (zero-mean percent deviation) and its
    // PPC is NaN; the median must equal the populated row's statistics.
    let populated = point_row(0, "apical", vec![10, 20, 30, 40]);
    let empty = point_row(0, "apical", vec![]);
    let table = EventTable::new(vec![populated.clone(), empty]);
    let rhythm = RhythmSeries::phase_ramp(100);

    let (hist, ppc) = entrainment_by_distance(&table, &rhythm, 1, 5).unwrap();
    assert_eq!(hist.len(), 1);

    let (solo_hist, solo_ppc) =
        entrainment_by_distance(&EventTable::new(vec![populated]), &rhythm, 1, 5).unwrap();
    assert_eq!(hist[0].onset, solo_hist[0].onset);
    assert_eq!(ppc[0].onset, solo_ppc[0].onset);
    assert!(ppc[0].onset.is_finite());
}

#[test]
fn all_degenerate_group_stays_nan() {
    let table = EventTable::new(vec![
        point_row(2, "apical", vec![]),
        point_row(2, "apical", vec![]),
    ]);
    let rhythm = RhythmSeries::phase_ramp(50);
    let (hist, ppc) = entrainment_by_distance(&table, &rhythm, 1, 4).unwrap();

    assert!(hist[0].onset.iter().all(|v| v.is_nan()));
    assert!(ppc[0].onset.is_nan());
}
