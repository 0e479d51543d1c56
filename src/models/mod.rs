//! Data models for the class roster.
//!
//! Field names serialize as camelCase to match the browser front end.

mod class;
mod member;

pub use class::*;
pub use member::*;
