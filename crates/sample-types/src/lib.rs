pub mod bounds;
pub mod point;
pub mod result;

pub use bounds::*;
pub use point::*;
pub use result::*;
