pub mod math;
pub mod model;
pub mod io;

pub use model::population::{DelayParams, Population, PopulationConfig};
