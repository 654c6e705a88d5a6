pub mod audio;
pub mod input;
pub mod render;
pub mod storage;

pub use audio::*;
pub use input::*;
pub use render::*;
pub use storage::*;
