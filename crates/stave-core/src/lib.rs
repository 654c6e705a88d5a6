pub mod projection;
pub mod sequencer;
pub mod session;

pub use projection::*;
pub use sequencer::*;
pub use session::*;
