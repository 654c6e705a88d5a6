use stave_domain_sheet::{
    frequency_for_position, PITCH_POS_BOTTOM, PITCH_POS_TOP, PITCH_STEP, PITCH_STOP_COUNT,
};

#[test]
fn every_stop_has_a_frequency() {
    let mut count = 0;
    let mut pos = PITCH_POS_BOTTOM;
    while pos >= PITCH_POS_TOP {
        assert!(frequency_for_position(pos).is_some(), "no tone at {pos}");
        count += 1;
        pos -= PITCH_STEP;
    }
    assert_eq!(count, PITCH_STOP_COUNT);
}

#[test]
fn frequency_rises_toward_the_top_of_the_staff() {
    let mut pos = PITCH_POS_BOTTOM;
    let mut previous = 0.0;
    while pos >= PITCH_POS_TOP {
        let freq = frequency_for_position(pos).unwrap();
        assert!(freq > previous, "not monotonic at {pos}");
        previous = freq;
        pos -= PITCH_STEP;
    }
}

#[test]
fn endpoints_are_b3_and_f5() {
    assert_eq!(frequency_for_position(PITCH_POS_BOTTOM), Some(246.94));
    assert_eq!(frequency_for_position(PITCH_POS_TOP), Some(698.46));
}

#[test]
fn off_grid_positions_have_no_tone() {
    assert_eq!(frequency_for_position(PITCH_POS_TOP - PITCH_STEP), None);
    assert_eq!(frequency_for_position(PITCH_POS_BOTTOM + PITCH_STEP), None);
    assert_eq!(frequency_for_position(PITCH_POS_TOP + 1), None);
    assert_eq!(frequency_for_position(-4), None);
}
