//! Library interface for spigot, a terminal front-end over Homebrew
//!
//! The core is UI-agnostic: a subprocess runner that streams brew's output,
//! typed parsers for its JSON responses, observable state containers, and a
//! progress state machine. The binary in `main.rs` is one consumer.

pub mod brew;
pub mod config;
pub mod error;
pub mod ops;
pub mod packages;
pub mod parse;
pub mod process;
pub mod progress;
pub mod state;

pub use error::{Result, SpigotError};
pub use process::{OutputEvent, OutputStream, shell};
pub use state::{BrewData, Store, TapList};
