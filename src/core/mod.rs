// LogSift - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app.

pub mod classify;
pub mod discovery;
pub mod export;
pub mod filter;
pub mod model;
pub mod parser;
pub mod registry;
pub mod scan;
