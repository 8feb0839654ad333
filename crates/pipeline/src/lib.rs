mod assembler;
mod error;
mod fetcher;
mod forecast;
mod planner;
mod utils;

pub use assembler::*;
pub use error::Error;
pub use fetcher::*;
pub use forecast::*;
pub use planner::*;
pub use utils::*;
