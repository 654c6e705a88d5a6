use crate::sequencer::play_sheet;
use serde::{Deserialize, Serialize};
use stave_domain_sheet::{decode_sheet, encode_sheet, NoteSheet, SheetCodecError};
use stave_ports::audio::{AudioError, AudioSink};
use stave_ports::input::InputEvent;
use stave_ports::storage::{SheetEntry, StorageError, StoragePort};

pub const MENU_OPTIONS: [&str; 5] = ["Play", "Save", "Load", "New", "Exit"];

pub const FILENAME_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const FILENAME_MAX_LEN: usize = 8;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("sheet decode failed: {0}")]
    Codec(#[from] SheetCodecError),
    #[error("audio error: {0}")]
    Audio(#[from] AudioError),
}

/// Pending filename being spelled out in Save mode. Each character is
/// addressable and cycles through [`FILENAME_CHARSET`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    chars: Vec<u8>,
    cursor: usize,
}

impl SaveState {
    fn new() -> Self {
        Self {
            chars: vec![FILENAME_CHARSET[0]],
            cursor: 0,
        }
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filename(&self) -> String {
        self.chars.iter().map(|&c| c as char).collect()
    }

    fn cycle(&mut self, delta: i32) {
        let len = FILENAME_CHARSET.len() as i32;
        let at = FILENAME_CHARSET
            .iter()
            .position(|&c| c == self.chars[self.cursor])
            .unwrap_or(0) as i32;
        let next = (at + delta).rem_euclid(len) as usize;
        self.chars[self.cursor] = FILENAME_CHARSET[next];
    }

    fn append(&mut self) {
        if self.chars.len() < FILENAME_MAX_LEN {
            self.chars.push(FILENAME_CHARSET[0]);
            self.cursor = self.chars.len() - 1;
        }
    }

    fn retreat(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }
}

/// Directory snapshot taken on entering Load mode; dropped on leaving.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadState {
    entries: Vec<SheetEntry>,
    selected: usize,
}

impl LoadState {
    pub fn entries(&self) -> &[SheetEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn step(&mut self, delta: i32) {
        // Empty list: no selection to move, and no modulo by zero.
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Editing,
    Menu,
    Save(SaveState),
    Load(LoadState),
}

/// Top-level controller: owns the sheet, the current mode, and the
/// storage/audio collaborators. One input event is processed to
/// completion at a time; playback blocks the session for the whole
/// piece.
pub struct EditorSession {
    sheet: NoteSheet,
    mode: Mode,
    menu_index: usize,
    exited: bool,
    storage: Box<dyn StoragePort>,
    audio: Box<dyn AudioSink>,
}

impl EditorSession {
    pub fn new(storage: Box<dyn StoragePort>, audio: Box<dyn AudioSink>) -> Self {
        Self {
            sheet: NoteSheet::new(),
            mode: Mode::Editing,
            menu_index: 0,
            exited: false,
            storage,
            audio,
        }
    }

    pub fn sheet(&self) -> &NoteSheet {
        &self.sheet
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }

    /// Dispatches one input event against the current mode and installs
    /// the mode it transitions to. All recoverable errors are logged
    /// and absorbed here; the sheet is left untouched by a failed
    /// save, load, or playback.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.exited {
            return;
        }
        let mode = std::mem::replace(&mut self.mode, Mode::Editing);
        self.mode = match mode {
            Mode::Editing => self.on_editing(event),
            Mode::Menu => self.on_menu(event),
            Mode::Save(state) => self.on_save(state, event),
            Mode::Load(state) => self.on_load(state, event),
        };
    }

    fn on_editing(&mut self, event: InputEvent) -> Mode {
        match event {
            InputEvent::Confirm => self.sheet.cycle_kind(),
            InputEvent::Up => self.sheet.move_pitch_up(),
            InputEvent::Down => self.sheet.move_pitch_down(),
            InputEvent::Right => self.sheet.cursor_right(),
            InputEvent::Left => self.sheet.cursor_left(),
            InputEvent::Cancel => {
                self.menu_index = 0;
                return Mode::Menu;
            }
        }
        Mode::Editing
    }

    fn on_menu(&mut self, event: InputEvent) -> Mode {
        match event {
            InputEvent::Up => {
                self.menu_index = (self.menu_index + MENU_OPTIONS.len() - 1) % MENU_OPTIONS.len();
                Mode::Menu
            }
            InputEvent::Down => {
                self.menu_index = (self.menu_index + 1) % MENU_OPTIONS.len();
                Mode::Menu
            }
            InputEvent::Confirm => self.dispatch_menu(),
            InputEvent::Cancel => Mode::Editing,
            InputEvent::Left | InputEvent::Right => Mode::Menu,
        }
    }

    fn dispatch_menu(&mut self) -> Mode {
        match self.menu_index {
            0 => {
                // Play is transient: run to completion, back to editing.
                if let Err(e) = play_sheet(&self.sheet, self.audio.as_ref()) {
                    log::warn!("playback aborted: {e}");
                }
                Mode::Editing
            }
            1 => Mode::Save(SaveState::new()),
            2 => match self.storage.list_sheets() {
                Ok(entries) => Mode::Load(LoadState {
                    entries,
                    selected: 0,
                }),
                Err(e) => {
                    log::warn!("cannot list sheets: {e}");
                    Mode::Menu
                }
            },
            3 => {
                self.sheet.reset();
                Mode::Editing
            }
            _ => {
                self.exited = true;
                Mode::Editing
            }
        }
    }

    fn on_save(&mut self, mut state: SaveState, event: InputEvent) -> Mode {
        match event {
            InputEvent::Up => state.cycle(1),
            InputEvent::Down => state.cycle(-1),
            InputEvent::Right => state.append(),
            InputEvent::Left => state.retreat(),
            InputEvent::Confirm => {
                let name = state.filename();
                match self.storage.write_sheet(&name, &encode_sheet(&self.sheet)) {
                    Ok(()) => log::info!("saved sheet {name}"),
                    Err(e) => log::warn!("save of {name} failed: {e}"),
                }
                return Mode::Editing;
            }
            InputEvent::Cancel => return Mode::Menu,
        }
        Mode::Save(state)
    }

    fn on_load(&mut self, mut state: LoadState, event: InputEvent) -> Mode {
        match event {
            InputEvent::Up => state.step(-1),
            InputEvent::Down => state.step(1),
            InputEvent::Confirm => {
                let Some(entry) = state.entries.get(state.selected) else {
                    // Nothing to load; stay until the user backs out.
                    return Mode::Load(state);
                };
                let name = entry.name.clone();
                match self.load_sheet(&name) {
                    Ok(()) => log::info!("loaded sheet {name}"),
                    Err(e) => log::warn!("load of {name} failed: {e}"),
                }
                return Mode::Editing;
            }
            InputEvent::Cancel => return Mode::Menu,
            InputEvent::Left | InputEvent::Right => {}
        }
        Mode::Load(state)
    }

    // Replaces the sheet only after both the read and the decode
    // succeed.
    fn load_sheet(&mut self, name: &str) -> Result<(), SessionError> {
        let text = self.storage.read_sheet(name)?;
        self.sheet = decode_sheet(&text)?;
        Ok(())
    }
}
