pub mod catalog;
pub mod cli;
pub mod models;
pub mod router;
pub mod services;
pub mod utils;
pub mod views;

pub use anyhow::{Error, Result};
