// CustView - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: util, core model (EngineConfig), directories, toml.
// Must NOT depend on: app, ui.

pub mod config;
