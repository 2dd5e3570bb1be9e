//! Helpers shared by the command-line commands.

pub mod validation;
