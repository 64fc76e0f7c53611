pub mod color;
pub mod item;

pub use color::*;
pub use item::*;
