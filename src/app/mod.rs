// LogSift - app/mod.rs
//
// Application layer: request validation, scan orchestration, export.
// Dependencies: core, platform.
// Must NOT depend on: ui.

pub mod export;
pub mod request;
pub mod scan;
