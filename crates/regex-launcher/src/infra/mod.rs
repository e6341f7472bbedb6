//! Infrastructure adapters for configuration, clipboard, processes, and the filesystem.

pub mod clipboard;
pub mod config;
pub mod l10n;
pub mod logging;
pub mod probe;
pub mod process;
