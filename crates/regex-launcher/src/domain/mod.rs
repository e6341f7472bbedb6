//! Core types and pure transformations shared by every command.

pub mod errors;
pub mod model;
pub mod template;
