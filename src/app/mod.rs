// CustView - app/mod.rs
//
// Application layer: page loading, search lifecycle, input debouncing and
// the view coordinator.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod debounce;
pub mod loader;
pub mod search;
pub mod state;
