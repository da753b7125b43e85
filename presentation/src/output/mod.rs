//! Output formatting for chat turns

pub mod console;
