//! User-facing prompts.

pub mod dialogs;
pub mod scripted;
