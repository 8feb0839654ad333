pub mod home;
pub mod series;

pub use home::*;
pub use series::*;
