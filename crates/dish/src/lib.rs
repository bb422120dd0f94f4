mod catalog;
mod input;

pub use catalog::*;
pub use input::*;
