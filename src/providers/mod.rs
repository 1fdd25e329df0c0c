//! Provider implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod json;
pub mod text;

#[cfg(feature = "console")]
pub use console::ConsoleProvider;
#[cfg(feature = "file")]
pub use file::FileProvider;
pub use json::JsonProvider;

pub use crate::core::Provider;
