pub mod args;
pub mod commands;
pub mod session;

pub use args::*;
pub use commands::CliApp;
pub use session::SessionCommand;
