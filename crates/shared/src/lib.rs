mod date;
pub mod dish;
mod error;
mod event;
pub mod mealplan;

pub use date::*;
pub use error::*;
pub use event::*;

#[doc(hidden)]
pub mod __private {
    pub use anyhow::anyhow;
}
