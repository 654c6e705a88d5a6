pub mod codec;
pub mod model;
pub mod pitch;

pub use codec::*;
pub use model::*;
pub use pitch::*;
