use dendrophase::core::rhythm::RhythmSeries;
use dendrophase::pipeline::entrainment_of_series;
use dendrophase::table::event::{EventKind, EventSeries, EventTable, SegmentRecord};

fn ca_row(q: u32, onsets: Vec<u64>, offsets: Vec<u64>) -> SegmentRecord {
    SegmentRecord::new(
        q,
        "apical".to_string(),
        EventKind::Ca,
        EventSeries::interval(onsets, offsets).unwrap(),
    )
    .unwrap()
}

#[test]
fn series_ppc_matches_onset_phase_cosine() {
    // Two calcium plateaus per segment; rising edges of the occupancy
    // series land on the decimated onset buckets, so the n=2 PPC equals
    // the cosine of the two onset-phase difference.
    let rhythm = RhythmSeries::phase_ramp(100);
    let table = EventTable::new(vec![ca_row(0, vec![40, 600], vec![80, 650])]);

    let out = entrainment_of_series(&table, &rhythm, 10);
    assert_eq!(out.len(), 1);

    let expected = (rhythm.get(4).unwrap() - rhythm.get(60).unwrap()).cos();
    assert!((out[0].ppc - expected).abs() < 1e-5, "ppc {}", out[0].ppc);
}

#[test]
fn series_groups_reduce_by_median() {
    let rhythm = RhythmSeries::phase_ramp(100);
    // Same group: one informative row, one with a single event (NaN PPC).
    let table = EventTable::new(vec![
        ca_row(1, vec![100, 300, 500], vec![150, 350, 550]),
        ca_row(1, vec![200], vec![250]),
    ]);

    let out = entrainment_of_series(&table, &rhythm, 10);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].key.elec_distance_q, 1);
    // the NaN row is excluded, the group's median is the informative value
    assert!(out[0].ppc.is_finite());
}

#[test]
fn events_past_the_rhythm_window_are_windowed_out() {
    let rhythm = RhythmSeries::phase_ramp(10);
    let table = EventTable::new(vec![ca_row(0, vec![20, 5000], vec![30, 5100])]);

    // The second plateau is outside the 10-bucket window; only one rising
    // edge remains, so the PPC is the n<=1 NaN sentinel.
    let out = entrainment_of_series(&table, &rhythm, 10);
    assert!(out[0].ppc.is_nan());
}
