mod chart;
pub mod routes;
mod startup;
mod utils;

pub use chart::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
