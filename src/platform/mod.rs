// LogSift - platform/mod.rs
//
// Platform layer: config file location and loading, filesystem access.
// Dependencies: standard library, directories crate, util.
// Must NOT depend on: core, app, ui.

pub mod config;
pub mod fs;
