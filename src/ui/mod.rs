// LogSift - ui/mod.rs
//
// UI layer: console presentation only.
// Dependencies: core (read-only models).
// Must NOT depend on: platform, app.

pub mod output;
pub mod theme;
