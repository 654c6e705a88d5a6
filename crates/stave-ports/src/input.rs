use serde::{Deserialize, Serialize};

/// Abstract key event the host translates raw input into. Press and
/// auto-repeat are delivered identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}
