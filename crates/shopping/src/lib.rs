mod grocery;

pub use grocery::*;
