//! Shared utility functions

pub mod file;
pub mod terminal;
