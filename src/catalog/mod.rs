pub mod repositories;
pub mod source;

pub use source::DataSource;
