pub mod definition;
pub mod workflow;

pub use definition::*;
pub use workflow::*;
