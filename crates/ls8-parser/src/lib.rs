//! LS-8 program loader
//!
//! Turns the textual program format into the raw bytes the machine loads at
//! address 0. Each non-blank line holds one 8-digit binary literal, optionally
//! followed by a `#` comment:
//!
//! ```text
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! ```

pub mod error;
pub mod pest_parser;
pub mod program;

pub use error::ParseError;
pub use pest_parser::{load_file, parse};
pub use program::Program;
