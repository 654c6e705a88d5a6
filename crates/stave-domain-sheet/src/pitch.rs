/// Staff position of the highest stop (F5). Smaller y is higher pitch.
pub const PITCH_POS_TOP: i32 = 10;
/// Staff position of the lowest stop (B3).
pub const PITCH_POS_BOTTOM: i32 = 43;
/// Vertical distance between adjacent stops (half a staff line gap).
pub const PITCH_STEP: i32 = 3;
pub const PITCH_STOP_COUNT: usize = 12;

// B3 up to F5, indexed from the bottom stop.
const FREQUENCIES_HZ: [f32; PITCH_STOP_COUNT] = [
    246.94, // B3
    261.63, // C4
    293.66, // D4
    329.63, // E4
    349.23, // F4
    392.00, // G4
    440.00, // A4
    493.88, // B4
    523.25, // C5
    587.33, // D5
    659.25, // E5
    698.46, // F5
];

/// Frequency of the stop at `pitch_pos`, or `None` for anything off the
/// 12-stop grid. Total over all integers so a corrupt position can never
/// panic the sequencer.
pub fn frequency_for_position(pitch_pos: i32) -> Option<f32> {
    if pitch_pos < PITCH_POS_TOP || pitch_pos > PITCH_POS_BOTTOM {
        return None;
    }
    let offset = PITCH_POS_BOTTOM - pitch_pos;
    if offset % PITCH_STEP != 0 {
        return None;
    }
    FREQUENCIES_HZ.get((offset / PITCH_STEP) as usize).copied()
}
