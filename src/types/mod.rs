pub mod errors;
pub mod tile;

pub use errors::*;
pub use tile::*;
