pub mod route;
pub mod store_router;

pub use route::{Route, RouteError};
pub use store_router::{RouterError, StoreRouter};
