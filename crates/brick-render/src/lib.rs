pub mod chart;
pub mod hit;
