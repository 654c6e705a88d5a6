use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use stave_core::{project, EditorSession};
use stave_infra_audio_cpal::CpalToneSink;
use stave_infra_storage_fs::FsSheetStorage;
use stave_ports::input::InputEvent;
use stave_ports::render::{DrawPrimitive, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use std::io::{self, Write};
use std::time::Duration;

const WIDTH: usize = DISPLAY_WIDTH as usize;
const HEIGHT: usize = DISPLAY_HEIGHT as usize;

pub fn run_editor(storage: FsSheetStorage) -> Result<(), Box<dyn std::error::Error>> {
    let audio = CpalToneSink::new()?;
    let mut session = EditorSession::new(Box::new(storage), Box::new(audio));

    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = event_loop(&mut stdout, &mut session);

    execute!(stdout, LeaveAlternateScreen)?;
    crossterm::terminal::disable_raw_mode()?;
    result
}

fn event_loop(
    out: &mut impl Write,
    session: &mut EditorSession,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        draw(out, session)?;
        if session.is_exited() {
            return Ok(());
        }
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            if let Some(input) = map_key(key.code) {
                session.handle_input(input);
            }
        }
    }
}

fn map_key(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Up => Some(InputEvent::Up),
        KeyCode::Down => Some(InputEvent::Down),
        KeyCode::Left => Some(InputEvent::Left),
        KeyCode::Right => Some(InputEvent::Right),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(InputEvent::Cancel),
        _ => None,
    }
}

// One terminal cell covers a 1x2 pixel column; half blocks give the
// 128x64 logical space in 128x32 cells.
fn draw(out: &mut impl Write, session: &EditorSession) -> Result<(), Box<dyn std::error::Error>> {
    let mut pixels = [[false; WIDTH]; HEIGHT];
    let mut texts = Vec::new();

    for primitive in project(session) {
        match primitive {
            DrawPrimitive::Line { x1, y1, x2, y2 } => draw_line(&mut pixels, x1, y1, x2, y2),
            DrawPrimitive::Circle { x, y, radius } => draw_circle(&mut pixels, x, y, radius),
            DrawPrimitive::FilledBox {
                x,
                y,
                width,
                height,
            } => {
                for py in y..y + height {
                    for px in x..x + width {
                        plot(&mut pixels, px, py);
                    }
                }
            }
            DrawPrimitive::Text { x, y, text } => texts.push((x, y, text)),
        }
    }

    queue!(out, Clear(ClearType::All))?;
    for row in 0..HEIGHT / 2 {
        let mut line = String::with_capacity(WIDTH);
        for col in 0..WIDTH {
            let top = pixels[row * 2][col];
            let bottom = pixels[row * 2 + 1][col];
            line.push(match (top, bottom) {
                (false, false) => ' ',
                (true, false) => '\u{2580}',
                (false, true) => '\u{2584}',
                (true, true) => '\u{2588}',
            });
        }
        queue!(out, MoveTo(0, row as u16))?;
        out.write_all(line.as_bytes())?;
    }

    for (x, y, text) in texts {
        let col = x.clamp(0, DISPLAY_WIDTH - 1) as u16;
        let row = (y.clamp(0, DISPLAY_HEIGHT - 1) / 2) as u16;
        queue!(out, MoveTo(col, row))?;
        out.write_all(text.as_bytes())?;
    }

    out.flush()?;
    Ok(())
}

fn plot(pixels: &mut [[bool; WIDTH]; HEIGHT], x: i32, y: i32) {
    if (0..DISPLAY_WIDTH).contains(&x) && (0..DISPLAY_HEIGHT).contains(&y) {
        pixels[y as usize][x as usize] = true;
    }
}

fn draw_line(pixels: &mut [[bool; WIDTH]; HEIGHT], x1: i32, y1: i32, x2: i32, y2: i32) {
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);
    loop {
        plot(pixels, x, y);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_circle(pixels: &mut [[bool; WIDTH]; HEIGHT], cx: i32, cy: i32, radius: i32) {
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (cx + x, cy + y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx - x, cy + y),
            (cx - x, cy - y),
            (cx - y, cy - x),
            (cx + y, cy - x),
            (cx + x, cy - y),
        ] {
            plot(pixels, px, py);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}
