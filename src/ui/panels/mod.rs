// CustView - ui/panels/mod.rs

pub mod table;
pub mod toolbar;
