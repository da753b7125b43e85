//! Prompt composition for the fortune-teller persona.

pub mod template;
