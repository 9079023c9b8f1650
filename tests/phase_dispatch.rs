use dendrophase::core::phase::{segment_phases, PhaseError};
use dendrophase::core::rhythm::RhythmSeries;
use dendrophase::table::event::EventSeries;

#[test]
fn interval_events_yield_onset_and_offset_sets() {
    let rhythm = RhythmSeries::phase_ramp(100);
    let events = EventSeries::interval(vec![10, 40], vec![20, 50]).unwrap();
    let phases = segment_phases(&rhythm, &events, 1).unwrap();

    assert_eq!(phases.onset.len(), 2);
    let offset = phases.offset.expect("interval events carry offset phases");
    assert_eq!(offset.len(), 2);
    assert_eq!(phases.onset[0], rhythm.get(10).unwrap());
    assert_eq!(offset[1], rhythm.get(50).unwrap());
}

#[test]
fn point_events_yield_onset_set_only() {
    let rhythm = RhythmSeries::phase_ramp(100);
    let events = EventSeries::point(vec![3, 30, 99]).unwrap();
    let phases = segment_phases(&rhythm, &events, 1).unwrap();

    assert_eq!(phases.onset.len(), 3);
    assert!(phases.offset.is_none());
}

#[test]
fn decimation_floor_divides_both_bounds() {
    let rhythm = RhythmSeries::phase_ramp(10);
    let events = EventSeries::interval(vec![19], vec![42]).unwrap();
    let phases = segment_phases(&rhythm, &events, 10).unwrap();

    assert_eq!(phases.onset[0], rhythm.get(1).unwrap());
    assert_eq!(phases.offset.unwrap()[0], rhythm.get(4).unwrap());
}

#[test]
fn uncovered_event_range_is_a_contract_violation() {
    let rhythm = RhythmSeries::phase_ramp(5);
    let events = EventSeries::point(vec![2, 70]).unwrap();
    let err = segment_phases(&rhythm, &events, 10).unwrap_err();
    assert_eq!(
        err,
        PhaseError::RhythmTooShort {
            index: 70,
            bucket: 7,
            len: 5
        }
    );
}
