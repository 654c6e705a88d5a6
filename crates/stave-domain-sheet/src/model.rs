use crate::pitch::{PITCH_POS_BOTTOM, PITCH_POS_TOP, PITCH_STEP};
use serde::{Deserialize, Serialize};
use stave_ports::render::DISPLAY_WIDTH;

/// Hard cap on events per sheet.
pub const SHEET_CAPACITY: usize = 16;
/// Horizontal position of the first event.
pub const FIRST_EVENT_X: i32 = 10;
/// Horizontal distance between consecutively created events.
pub const EVENT_SPACING: i32 = 15;

const DEFAULT_PITCH_POS: i32 = 40;
const VIEWPORT_MARGIN: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationRank {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl DurationRank {
    pub const ALL: [DurationRank; 5] = [
        DurationRank::Whole,
        DurationRank::Half,
        DurationRank::Quarter,
        DurationRank::Eighth,
        DurationRank::Sixteenth,
    ];

    pub fn index(self) -> usize {
        match self {
            DurationRank::Whole => 0,
            DurationRank::Half => 1,
            DurationRank::Quarter => 2,
            DurationRank::Eighth => 3,
            DurationRank::Sixteenth => 4,
        }
    }

    /// Next shorter rank, wrapping from sixteenth back to whole.
    pub fn next_wrapping(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Next shorter rank, or `None` past the shortest.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn duration_ms(self) -> u32 {
        match self {
            DurationRank::Whole => 1000,
            DurationRank::Half => 500,
            DurationRank::Quarter => 250,
            DurationRank::Eighth => 125,
            DurationRank::Sixteenth => 62,
        }
    }
}

/// Sounding or silent duration of one staff event. Notes and rests are
/// separate halves; nothing relies on numeric adjacency between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Note(DurationRank),
    Rest(DurationRank),
}

impl EventKind {
    pub fn rank(self) -> DurationRank {
        match self {
            EventKind::Note(rank) | EventKind::Rest(rank) => rank,
        }
    }

    pub fn is_note(self) -> bool {
        matches!(self, EventKind::Note(_))
    }

    /// Advance the duration one step within the current half, wrapping.
    pub fn cycled(self) -> Self {
        match self {
            EventKind::Note(rank) => EventKind::Note(rank.next_wrapping()),
            EventKind::Rest(rank) => EventKind::Rest(rank.next_wrapping()),
        }
    }

    /// Wire ordinal: note ranks 0..=4, rest ranks 5..=9.
    pub fn ordinal(self) -> u8 {
        match self {
            EventKind::Note(rank) => rank.index() as u8,
            EventKind::Rest(rank) => rank.index() as u8 + 5,
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0..=4 => Some(EventKind::Note(DurationRank::ALL[ordinal as usize])),
            5..=9 => Some(EventKind::Rest(DurationRank::ALL[ordinal as usize - 5])),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffEvent {
    pub x: i32,
    pub pitch_pos: i32,
    pub kind: EventKind,
}

impl StaffEvent {
    /// The event every fresh or reset sheet starts with.
    pub fn canonical() -> Self {
        Self {
            x: FIRST_EVENT_X,
            pitch_pos: DEFAULT_PITCH_POS,
            kind: EventKind::Note(DurationRank::Whole),
        }
    }
}

/// Ordered event sequence plus cursor and viewport. Never empty: the
/// last event is reset to [`StaffEvent::canonical`] instead of removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteSheet {
    events: Vec<StaffEvent>,
    cursor: usize,
    viewport_offset: i32,
}

impl NoteSheet {
    pub fn new() -> Self {
        Self {
            events: vec![StaffEvent::canonical()],
            cursor: 0,
            viewport_offset: 0,
        }
    }

    /// Builds a sheet from decoded events; `None` when there are none.
    /// Events beyond capacity are dropped. Cursor and viewport start at
    /// the front.
    pub fn from_events(mut events: Vec<StaffEvent>) -> Option<Self> {
        if events.is_empty() {
            return None;
        }
        events.truncate(SHEET_CAPACITY);
        Some(Self {
            events,
            cursor: 0,
            viewport_offset: 0,
        })
    }

    pub fn events(&self) -> &[StaffEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_full(&self) -> bool {
        self.events.len() >= SHEET_CAPACITY
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport_offset(&self) -> i32 {
        self.viewport_offset
    }

    pub fn current(&self) -> &StaffEvent {
        &self.events[self.cursor]
    }

    fn current_mut(&mut self) -> &mut StaffEvent {
        &mut self.events[self.cursor]
    }

    /// Confirm in editing mode: cycle the current event's duration
    /// within its note/rest half.
    pub fn cycle_kind(&mut self) {
        let event = self.current_mut();
        event.kind = event.kind.cycled();
    }

    /// Raise the current event one stop; no-op at the top of the staff.
    pub fn move_pitch_up(&mut self) {
        let event = self.current_mut();
        if event.pitch_pos > PITCH_POS_TOP {
            event.pitch_pos -= PITCH_STEP;
        }
    }

    /// Lower the current event one stop. At the bottom stop a note
    /// becomes the rest of the same rank, a rest steps to the next
    /// shorter rest, and stepping past the shortest rest removes the
    /// event (or resets a sole event to the canonical default).
    pub fn move_pitch_down(&mut self) {
        let event = self.current_mut();
        if event.pitch_pos < PITCH_POS_BOTTOM {
            event.pitch_pos += PITCH_STEP;
            return;
        }
        match event.kind {
            EventKind::Note(rank) => event.kind = EventKind::Rest(rank),
            EventKind::Rest(rank) => match rank.next() {
                Some(next) => event.kind = EventKind::Rest(next),
                None => self.remove_current(),
            },
        }
    }

    /// Advance the cursor, appending a copy of the current event at the
    /// next horizontal step when already on the last one and capacity
    /// remains.
    pub fn cursor_right(&mut self) {
        if self.cursor + 1 < self.events.len() {
            self.cursor += 1;
        } else if !self.is_full() {
            let mut event = *self.current();
            self.cursor += 1;
            event.x = self.cursor as i32 * EVENT_SPACING + FIRST_EVENT_X;
            self.events.push(event);
        }
        self.follow_cursor();
    }

    /// Retreat the cursor; never creates events.
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.follow_cursor();
    }

    /// Menu "New": back to the canonical single-event sheet.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn remove_current(&mut self) {
        if self.events.len() > 1 {
            self.events.remove(self.cursor);
            if self.cursor >= self.events.len() {
                self.cursor = self.events.len() - 1;
            }
        } else {
            self.events[0] = StaffEvent {
                x: self.events[0].x,
                pitch_pos: PITCH_POS_BOTTOM,
                kind: EventKind::Note(DurationRank::Whole),
            };
        }
        self.follow_cursor();
    }

    // Keep the cursor's event inside the visible window.
    fn follow_cursor(&mut self) {
        let x = self.current().x;
        if x - self.viewport_offset > DISPLAY_WIDTH {
            self.viewport_offset = x - DISPLAY_WIDTH + VIEWPORT_MARGIN;
        } else if x - self.viewport_offset < 0 {
            self.viewport_offset = (x - VIEWPORT_MARGIN).max(0);
        }
    }
}

impl Default for NoteSheet {
    fn default() -> Self {
        Self::new()
    }
}
