// CustView - lib.rs
//
// Library entry point, exposing all non-GUI modules for integration testing
// and programmatic use of the paging/search engine.
//
// The eframe application (`gui`) lives beside `main.rs` and is not part of
// the library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
