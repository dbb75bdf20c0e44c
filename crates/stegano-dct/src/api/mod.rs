pub mod hide;
pub mod shared;
pub mod unveil;

pub use shared::*;
