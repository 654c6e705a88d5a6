use crate::session::{EditorSession, LoadState, Mode, SaveState, MENU_OPTIONS};
use stave_domain_sheet::{DurationRank, EventKind, NoteSheet, StaffEvent};
use stave_ports::render::{DrawPrimitive, DISPLAY_HEIGHT, DISPLAY_WIDTH};

const STAFF_TOP_Y: i32 = 10;
const STAFF_LINE_SPACING: i32 = 6;
const STAFF_MIDDLE_Y: i32 = STAFF_TOP_Y + 2 * STAFF_LINE_SPACING;
const MENU_LINE_SPACING: i32 = 10;
const GLYPH_WIDTH: i32 = 6;

/// Projects the full session state into a display list. Recomputed from
/// scratch on every call; no diffing.
pub fn project(session: &EditorSession) -> Vec<DrawPrimitive> {
    match session.mode() {
        Mode::Editing => project_staff(session.sheet()),
        Mode::Menu => project_menu(session.menu_index()),
        Mode::Save(state) => project_save(state),
        Mode::Load(state) => project_load(state),
    }
}

fn project_staff(sheet: &NoteSheet) -> Vec<DrawPrimitive> {
    let mut out = Vec::new();
    for i in 0..5 {
        let y = STAFF_TOP_Y + i * STAFF_LINE_SPACING;
        out.push(DrawPrimitive::Line {
            x1: 0,
            y1: y,
            x2: DISPLAY_WIDTH,
            y2: y,
        });
    }

    for (index, event) in sheet.events().iter().enumerate() {
        let x = event.x - sheet.viewport_offset();
        if x < 0 || x >= DISPLAY_WIDTH {
            continue;
        }
        draw_event(&mut out, event, x);
        if index == sheet.cursor() {
            out.push(DrawPrimitive::Text {
                x: x - 2,
                y: 54,
                text: "^".to_string(),
            });
        }
    }

    out.push(DrawPrimitive::Text {
        x: 0,
        y: DISPLAY_HEIGHT,
        text: format!("Note: {}", sheet.cursor() + 1),
    });
    out
}

fn draw_event(out: &mut Vec<DrawPrimitive>, event: &StaffEvent, x: i32) {
    match event.kind {
        EventKind::Note(rank) => draw_note(out, rank, x, event.pitch_pos),
        EventKind::Rest(rank) => draw_rest(out, rank, x),
    }
}

fn draw_note(out: &mut Vec<DrawPrimitive>, rank: DurationRank, x: i32, y: i32) {
    match rank {
        DurationRank::Whole | DurationRank::Half => {
            out.push(DrawPrimitive::Circle { x, y, radius: 3 });
        }
        _ => {
            out.push(DrawPrimitive::FilledBox {
                x: x - 3,
                y: y - 3,
                width: 6,
                height: 6,
            });
        }
    }
    if rank != DurationRank::Whole {
        // Stem on everything shorter than a whole note.
        out.push(DrawPrimitive::Line {
            x1: x + 3,
            y1: y,
            x2: x + 3,
            y2: y - 10,
        });
    }
    if matches!(rank, DurationRank::Eighth | DurationRank::Sixteenth) {
        out.push(DrawPrimitive::Line {
            x1: x + 3,
            y1: y - 10,
            x2: x + 6,
            y2: y - 13,
        });
    }
    if rank == DurationRank::Sixteenth {
        out.push(DrawPrimitive::Line {
            x1: x + 3,
            y1: y - 7,
            x2: x + 6,
            y2: y - 10,
        });
    }
}

// Rest glyphs hang off the middle staff line, whatever the retained
// pitch position is.
fn draw_rest(out: &mut Vec<DrawPrimitive>, rank: DurationRank, x: i32) {
    match rank {
        DurationRank::Whole => out.push(DrawPrimitive::FilledBox {
            x: x - 3,
            y: STAFF_MIDDLE_Y + 2,
            width: 6,
            height: 2,
        }),
        DurationRank::Half => out.push(DrawPrimitive::FilledBox {
            x: x - 3,
            y: STAFF_MIDDLE_Y - 2,
            width: 6,
            height: 2,
        }),
        _ => out.push(DrawPrimitive::FilledBox {
            x: x - 2,
            y: STAFF_MIDDLE_Y - 2,
            width: 4,
            height: 4,
        }),
    }
    if matches!(rank, DurationRank::Eighth | DurationRank::Sixteenth) {
        out.push(DrawPrimitive::Line {
            x1: x,
            y1: STAFF_MIDDLE_Y - 2,
            x2: x,
            y2: STAFF_MIDDLE_Y - 6,
        });
    }
    if rank == DurationRank::Sixteenth {
        out.push(DrawPrimitive::Line {
            x1: x,
            y1: STAFF_MIDDLE_Y - 4,
            x2: x - 2,
            y2: STAFF_MIDDLE_Y - 8,
        });
    }
}

fn project_menu(selected: usize) -> Vec<DrawPrimitive> {
    let mut out = Vec::new();
    for (i, option) in MENU_OPTIONS.iter().enumerate() {
        let y = STAFF_TOP_Y + i as i32 * MENU_LINE_SPACING;
        if i == selected {
            out.push(DrawPrimitive::Text {
                x: 10,
                y,
                text: ">".to_string(),
            });
        }
        out.push(DrawPrimitive::Text {
            x: 20,
            y,
            text: (*option).to_string(),
        });
    }
    out
}

fn project_save(state: &SaveState) -> Vec<DrawPrimitive> {
    vec![
        DrawPrimitive::Text {
            x: 10,
            y: 10,
            text: "Save as:".to_string(),
        },
        DrawPrimitive::Text {
            x: 10,
            y: 24,
            text: state.filename(),
        },
        DrawPrimitive::Text {
            x: 10 + state.cursor() as i32 * GLYPH_WIDTH,
            y: 32,
            text: "^".to_string(),
        },
    ]
}

fn project_load(state: &LoadState) -> Vec<DrawPrimitive> {
    if state.entries().is_empty() {
        return vec![DrawPrimitive::Text {
            x: 10,
            y: 10,
            text: "No files".to_string(),
        }];
    }

    // Scroll the 5-line window so the selection stays visible.
    let first = state.selected().saturating_sub(4);
    let mut out = Vec::new();
    for (row, (index, entry)) in state
        .entries()
        .iter()
        .enumerate()
        .skip(first)
        .take(5)
        .enumerate()
    {
        let y = STAFF_TOP_Y + row as i32 * MENU_LINE_SPACING;
        if index == state.selected() {
            out.push(DrawPrimitive::Text {
                x: 2,
                y,
                text: ">".to_string(),
            });
        }
        out.push(DrawPrimitive::Text {
            x: 10,
            y,
            text: format!("{} {}", entry.name, entry.size),
        });
    }
    out
}
