//! Application layer: the commands, run against injected host services.

pub mod context;
pub mod host;
pub mod launch;
pub mod reset;
pub mod setup;
