//! Subcommand handlers.

pub mod generate;
pub mod import;
pub mod issue;
pub mod used;
