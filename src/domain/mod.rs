pub mod order;
pub mod problem;
pub mod product;

pub use order::*;
pub use problem::*;
pub use product::*;
