pub mod util;
pub mod error;
pub mod keycode;
pub mod document;
pub mod store;
pub mod serial;
pub mod controller;
pub mod cli;
pub mod event;
pub mod app;
pub mod ui;

pub use controller::{EditController, LoadOutcome, SaveOutcome, StatusKind};
pub use error::{MacropadError, Result};
