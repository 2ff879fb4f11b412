pub mod item;
pub mod product;

pub use item::Item;
pub use product::{Product, ProductError, ProductId};
