//! Charts module - chart inputs and rendering

mod builder;
mod plotter;

pub use builder::{ChartData, ChartDataBuilder};
pub use plotter::ChartPlotter;
