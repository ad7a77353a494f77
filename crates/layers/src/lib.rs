pub mod layer;
pub mod list;
pub mod raster;

pub use layer::*;
pub use list::*;
