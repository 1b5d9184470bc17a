pub mod meter;
pub mod model;
pub mod tracker;

pub use meter::*;
pub use model::*;
pub use tracker::*;
