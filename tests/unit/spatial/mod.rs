pub mod index;
pub mod tiles;
