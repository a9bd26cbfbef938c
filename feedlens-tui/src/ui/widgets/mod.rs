pub mod bars;
pub mod doughnut;

pub use bars::HorizontalBars;
pub use doughnut::Doughnut;
