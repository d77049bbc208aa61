//! CLI commands module.

mod image;
mod util;

pub use image::ImageCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
