// CustView - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (view state), core (read-only models), egui.
// Must NOT depend on: platform, direct I/O.

pub mod panels;
pub mod theme;
