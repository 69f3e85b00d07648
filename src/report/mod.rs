// Results output — the per-document CSV and terminal displays.

pub mod csv;
pub mod terminal;
