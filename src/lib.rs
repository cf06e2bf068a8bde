// LogSift - lib.rs
//
// Library entry point, exposing every module for integration testing and
// programmatic use. The binary in `main.rs` only parses arguments and wires
// these layers together.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
