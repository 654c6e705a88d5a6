use serde::{Deserialize, Serialize};
use stave_domain_sheet::{frequency_for_position, NoteSheet};
use stave_ports::audio::{AudioError, AudioSink};

/// One timed playback command. `frequency_hz` is `None` for silence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayCommand {
    pub frequency_hz: Option<f32>,
    pub duration_ms: u32,
}

/// Maps the sheet to its command stream, front to back. A note whose
/// position somehow left the 12-stop grid degrades to silence instead
/// of panicking.
pub fn playback_commands(sheet: &NoteSheet) -> Vec<PlayCommand> {
    sheet
        .events()
        .iter()
        .map(|event| {
            let frequency_hz = if event.kind.is_note() {
                frequency_for_position(event.pitch_pos)
            } else {
                None
            };
            PlayCommand {
                frequency_hz,
                duration_ms: event.kind.rank().duration_ms(),
            }
        })
        .collect()
}

/// Plays the whole sheet to completion, one event at a time. Every
/// command is followed by a gap of the same length before the next
/// event starts. Blocking; there is no pause or seek.
pub fn play_sheet(sheet: &NoteSheet, sink: &dyn AudioSink) -> Result<(), AudioError> {
    for command in playback_commands(sheet) {
        match command.frequency_hz {
            Some(frequency_hz) => sink.tone(frequency_hz, command.duration_ms)?,
            None => sink.silence(command.duration_ms)?,
        }
        sink.silence(command.duration_ms)?;
    }
    Ok(())
}
