pub mod compose;
pub mod preview;

pub use compose::*;
pub use preview::*;
