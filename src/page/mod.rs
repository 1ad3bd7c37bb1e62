//! Page assembly: the template adapter and the bootstrap that fills it.

mod bootstrap;
mod document;
pub mod wiring;

pub use self::bootstrap::{bootstrap, load_section, BootstrapOptions, BootstrapReport, Section};
pub use self::document::{Document, PageError};
