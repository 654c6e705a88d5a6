use serde::{Deserialize, Serialize};

pub const DISPLAY_WIDTH: i32 = 128;
pub const DISPLAY_HEIGHT: i32 = 64;

/// One item of the display list the core projects its state into.
/// Coordinates are in the fixed 128x64 logical space; the host renderer
/// owns scaling and the pixel format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawPrimitive {
    Line { x1: i32, y1: i32, x2: i32, y2: i32 },
    Circle { x: i32, y: i32, radius: i32 },
    FilledBox { x: i32, y: i32, width: i32, height: i32 },
    Text { x: i32, y: i32, text: String },
}
