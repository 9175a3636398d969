//! Keyboard input handling for Robo
//!
//! Raw terminal key events are normalized into [`InputEvent`]s, which the
//! [`Debouncer`] turns into one [`Command`] per physical key press.

mod commands;
mod debounce;
mod keys;
pub mod terminal;

pub use commands::{lookup, Command, HELP_TEXT};
pub use debounce::{DebounceState, Debouncer, Step};
pub use keys::{InputEvent, Key};
