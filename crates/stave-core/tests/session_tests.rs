use stave_core::{EditorSession, Mode};
use stave_domain_sheet::{DurationRank, EventKind};
use stave_ports::audio::{AudioError, AudioSink};
use stave_ports::input::InputEvent;
use stave_ports::storage::{SheetEntry, StorageError, StoragePort};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct MemoryStorage {
    sheets: Arc<Mutex<BTreeMap<String, String>>>,
}

impl StoragePort for MemoryStorage {
    fn list_sheets(&self) -> Result<Vec<SheetEntry>, StorageError> {
        Ok(self
            .sheets
            .lock()
            .unwrap()
            .iter()
            .map(|(name, contents)| SheetEntry {
                name: name.clone(),
                size: contents.len() as u64,
            })
            .collect())
    }

    fn read_sheet(&self, name: &str) -> Result<String, StorageError> {
        self.sheets
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn write_sheet(&self, name: &str, contents: &str) -> Result<(), StorageError> {
        self.sheets
            .lock()
            .unwrap()
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

struct BrokenStorage;

impl StoragePort for BrokenStorage {
    fn list_sheets(&self) -> Result<Vec<SheetEntry>, StorageError> {
        Err(StorageError::Io("disk on fire".to_string()))
    }
    fn read_sheet(&self, name: &str) -> Result<String, StorageError> {
        Err(StorageError::NotFound(name.to_string()))
    }
    fn write_sheet(&self, _: &str, _: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("disk on fire".to_string()))
    }
}

#[derive(Clone, Default)]
struct CountingSink {
    tones: Arc<Mutex<Vec<(f32, u32)>>>,
}

impl AudioSink for CountingSink {
    fn tone(&self, frequency_hz: f32, duration_ms: u32) -> Result<(), AudioError> {
        self.tones.lock().unwrap().push((frequency_hz, duration_ms));
        Ok(())
    }
    fn silence(&self, _: u32) -> Result<(), AudioError> {
        Ok(())
    }
}

fn session() -> (EditorSession, MemoryStorage, CountingSink) {
    let storage = MemoryStorage::default();
    let sink = CountingSink::default();
    let session = EditorSession::new(Box::new(storage.clone()), Box::new(sink.clone()));
    (session, storage, sink)
}

fn feed(session: &mut EditorSession, events: &[InputEvent]) {
    for &event in events {
        session.handle_input(event);
    }
}

// Menu order is Play, Save, Load, New, Exit; open with Cancel, then
// step down to the wanted row.
fn open_menu_at(session: &mut EditorSession, row: usize) {
    session.handle_input(InputEvent::Cancel);
    for _ in 0..row {
        session.handle_input(InputEvent::Down);
    }
}

#[test]
fn cancel_opens_the_menu_at_the_first_option() {
    let (mut session, _, _) = session();
    feed(&mut session, &[InputEvent::Cancel]);
    assert!(matches!(session.mode(), Mode::Menu));
    assert_eq!(session.menu_index(), 0);
}

#[test]
fn menu_selection_wraps_both_ways() {
    let (mut session, _, _) = session();
    feed(&mut session, &[InputEvent::Cancel, InputEvent::Up]);
    assert_eq!(session.menu_index(), 4);
    feed(&mut session, &[InputEvent::Down]);
    assert_eq!(session.menu_index(), 0);
}

#[test]
fn menu_cancel_returns_to_editing_without_side_effects() {
    let (mut session, _, _) = session();
    let before = session.sheet().clone();
    feed(&mut session, &[InputEvent::Cancel, InputEvent::Cancel]);
    assert!(matches!(session.mode(), Mode::Editing));
    assert_eq!(session.sheet(), &before);
}

#[test]
fn editing_inputs_reach_the_sheet() {
    let (mut session, _, _) = session();
    feed(
        &mut session,
        &[InputEvent::Confirm, InputEvent::Up, InputEvent::Right],
    );
    assert_eq!(session.sheet().len(), 2);
    assert_eq!(session.sheet().cursor(), 1);
    assert_eq!(
        session.sheet().current().kind,
        EventKind::Note(DurationRank::Half)
    );
    assert_eq!(session.sheet().current().pitch_pos, 37);
}

#[test]
fn new_resets_the_sheet() {
    let (mut session, _, _) = session();
    feed(&mut session, &[InputEvent::Right, InputEvent::Right]);
    assert_eq!(session.sheet().len(), 3);

    open_menu_at(&mut session, 3);
    session.handle_input(InputEvent::Confirm);
    assert!(matches!(session.mode(), Mode::Editing));
    assert_eq!(session.sheet().len(), 1);
}

#[test]
fn exit_is_terminal() {
    let (mut session, _, _) = session();
    open_menu_at(&mut session, 4);
    session.handle_input(InputEvent::Confirm);
    assert!(session.is_exited());

    // Input after exit is ignored.
    session.handle_input(InputEvent::Right);
    assert_eq!(session.sheet().len(), 1);
}

#[test]
fn play_runs_the_sheet_and_returns_to_editing() {
    let (mut session, _, sink) = session();
    open_menu_at(&mut session, 0);
    session.handle_input(InputEvent::Confirm);

    assert!(matches!(session.mode(), Mode::Editing));
    let tones = sink.tones.lock().unwrap().clone();
    assert_eq!(tones, vec![(261.63, 1000)]);
}

#[test]
fn playback_failure_is_absorbed() {
    struct DeadSink;
    impl AudioSink for DeadSink {
        fn tone(&self, _: f32, _: u32) -> Result<(), AudioError> {
            Err(AudioError::Backend("unplugged".to_string()))
        }
        fn silence(&self, _: u32) -> Result<(), AudioError> {
            Err(AudioError::Backend("unplugged".to_string()))
        }
    }

    let mut session = EditorSession::new(Box::new(MemoryStorage::default()), Box::new(DeadSink));
    open_menu_at(&mut session, 0);
    session.handle_input(InputEvent::Confirm);
    assert!(matches!(session.mode(), Mode::Editing));
    assert!(!session.is_exited());
}

#[test]
fn save_spells_a_name_and_persists_the_sheet() {
    let (mut session, storage, _) = session();
    open_menu_at(&mut session, 1);
    session.handle_input(InputEvent::Confirm);
    assert!(matches!(session.mode(), Mode::Save(_)));

    // A -> B, append a second char, leave it at A, confirm.
    feed(
        &mut session,
        &[InputEvent::Up, InputEvent::Right, InputEvent::Confirm],
    );
    assert!(matches!(session.mode(), Mode::Editing));

    let saved = storage.sheets.lock().unwrap();
    assert_eq!(saved.get("BA").map(String::as_str), Some("10,40,0;"));
}

#[test]
fn filename_chars_wrap_through_the_charset() {
    let (mut session, storage, _) = session();
    open_menu_at(&mut session, 1);
    session.handle_input(InputEvent::Confirm);

    // One step down from 'A' wraps to the last charset symbol.
    feed(&mut session, &[InputEvent::Down, InputEvent::Confirm]);
    assert!(storage.sheets.lock().unwrap().contains_key("9"));
}

#[test]
fn save_cancel_returns_to_the_menu() {
    let (mut session, storage, _) = session();
    open_menu_at(&mut session, 1);
    feed(&mut session, &[InputEvent::Confirm, InputEvent::Cancel]);
    assert!(matches!(session.mode(), Mode::Menu));
    assert!(storage.sheets.lock().unwrap().is_empty());
}

#[test]
fn save_failure_leaves_the_session_editing() {
    let mut session =
        EditorSession::new(Box::new(BrokenStorage), Box::new(CountingSink::default()));
    open_menu_at(&mut session, 1);
    feed(&mut session, &[InputEvent::Confirm, InputEvent::Confirm]);
    assert!(matches!(session.mode(), Mode::Editing));
}

#[test]
fn load_replaces_the_sheet_and_resets_the_cursor() {
    let (mut session, storage, _) = session();
    storage
        .write_sheet("SONG", "10,40,0;25,37,2;40,43,7;")
        .unwrap();
    feed(&mut session, &[InputEvent::Right, InputEvent::Right]);

    open_menu_at(&mut session, 2);
    session.handle_input(InputEvent::Confirm);
    assert!(matches!(session.mode(), Mode::Load(_)));
    session.handle_input(InputEvent::Confirm);

    assert!(matches!(session.mode(), Mode::Editing));
    assert_eq!(session.sheet().len(), 3);
    assert_eq!(session.sheet().cursor(), 0);
    assert_eq!(
        session.sheet().events()[2].kind,
        EventKind::Rest(DurationRank::Quarter)
    );
}

#[test]
fn load_selection_wraps_over_the_snapshot() {
    let (mut session, storage, _) = session();
    storage.write_sheet("A", "10,40,0;").unwrap();
    storage.write_sheet("B", "10,37,0;").unwrap();

    open_menu_at(&mut session, 2);
    session.handle_input(InputEvent::Confirm);
    feed(&mut session, &[InputEvent::Up]);
    let Mode::Load(state) = session.mode() else {
        panic!("expected load mode");
    };
    assert_eq!(state.selected(), 1);

    feed(&mut session, &[InputEvent::Down]);
    let Mode::Load(state) = session.mode() else {
        panic!("expected load mode");
    };
    assert_eq!(state.selected(), 0);
}

#[test]
fn load_with_no_files_is_fully_guarded() {
    let (mut session, _, _) = session();
    let before = session.sheet().clone();

    open_menu_at(&mut session, 2);
    session.handle_input(InputEvent::Confirm);
    assert!(matches!(session.mode(), Mode::Load(_)));

    // Navigation and confirm are no-ops with nothing listed.
    feed(&mut session, &[InputEvent::Up, InputEvent::Down, InputEvent::Confirm]);
    assert!(matches!(session.mode(), Mode::Load(_)));

    session.handle_input(InputEvent::Cancel);
    assert!(matches!(session.mode(), Mode::Menu));
    assert_eq!(session.sheet(), &before);
}

#[test]
fn load_cancel_keeps_the_sheet() {
    let (mut session, storage, _) = session();
    storage.write_sheet("SONG", "10,40,0;25,37,2;").unwrap();
    let before = session.sheet().clone();

    open_menu_at(&mut session, 2);
    feed(&mut session, &[InputEvent::Confirm, InputEvent::Cancel]);
    assert!(matches!(session.mode(), Mode::Menu));
    assert_eq!(session.sheet(), &before);
}

#[test]
fn corrupt_file_leaves_the_sheet_unchanged() {
    let (mut session, storage, _) = session();
    storage.write_sheet("BAD", "definitely;not;records").unwrap();
    let before = session.sheet().clone();

    open_menu_at(&mut session, 2);
    feed(&mut session, &[InputEvent::Confirm, InputEvent::Confirm]);
    assert!(matches!(session.mode(), Mode::Editing));
    assert_eq!(session.sheet(), &before);
}

#[test]
fn listing_failure_stays_in_the_menu() {
    let mut session =
        EditorSession::new(Box::new(BrokenStorage), Box::new(CountingSink::default()));
    open_menu_at(&mut session, 2);
    session.handle_input(InputEvent::Confirm);
    assert!(matches!(session.mode(), Mode::Menu));
}
