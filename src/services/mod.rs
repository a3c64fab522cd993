pub mod chart;
pub mod hourly;
pub mod loader;
pub mod table;
