pub mod cart_service;
pub mod events;
pub mod product_service;

pub use cart_service::*;
pub use events::*;
pub use product_service::*;
