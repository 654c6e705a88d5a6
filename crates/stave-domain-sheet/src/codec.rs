use crate::model::{EventKind, NoteSheet, StaffEvent, SHEET_CAPACITY};
use std::fmt::Write;

#[derive(thiserror::Error, Debug)]
pub enum SheetCodecError {
    #[error("no valid records")]
    Empty,
}

/// Flat text encoding: one `x,pitch_pos,ordinal;` record per event, in
/// sheet order. No header, no version tag, no checksum.
pub fn encode_sheet(sheet: &NoteSheet) -> String {
    let mut out = String::new();
    for event in sheet.events() {
        let _ = write!(
            out,
            "{},{},{};",
            event.x,
            event.pitch_pos,
            event.kind.ordinal()
        );
    }
    out
}

/// Decodes a sheet, skipping malformed records and stopping once the
/// capacity is reached. The cursor of the returned sheet is at the
/// front. Input that yields no valid record at all is rejected so a
/// corrupt file can never produce an empty sheet.
pub fn decode_sheet(input: &str) -> Result<NoteSheet, SheetCodecError> {
    let mut events = Vec::new();
    for record in input.split(';') {
        if events.len() >= SHEET_CAPACITY {
            break;
        }
        if let Some(event) = parse_record(record) {
            events.push(event);
        }
    }
    NoteSheet::from_events(events).ok_or(SheetCodecError::Empty)
}

fn parse_record(record: &str) -> Option<StaffEvent> {
    let mut fields = record.split(',');
    let x = fields.next()?.trim().parse::<i32>().ok()?;
    let pitch_pos = fields.next()?.trim().parse::<i32>().ok()?;
    let ordinal = fields.next()?.trim().parse::<i64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    let kind = EventKind::from_ordinal(ordinal)?;
    Some(StaffEvent { x, pitch_pos, kind })
}
