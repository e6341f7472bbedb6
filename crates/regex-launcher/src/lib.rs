pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod ui;

pub fn init(verbosity: u8) {
    infra::logging::init(verbosity);
}
