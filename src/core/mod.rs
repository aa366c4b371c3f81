// CustView - core/mod.rs
//
// Core business logic layer.
// Dependencies: util, chrono, serde, csv/serde_json (export only).
// Must NOT depend on: ui, platform, app, or spawn threads.

pub mod export;
pub mod matcher;
pub mod model;
pub mod sort;
pub mod source;
