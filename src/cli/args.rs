use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse a product catalog and build an order from the terminal")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Product data URL or file path (overrides STORE_DATA_URL)
    #[arg(short, long, global = true)]
    pub data_url: Option<String>,

    /// Skip fade and pulse animations
    #[arg(long, global = true)]
    pub no_animation: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Interactive session (default)
    Browse,
    /// Print the product list
    List,
    /// Print the detail screen of a product
    Show {
        /// Product ID
        id: String,
    },
    /// Print the order summary of a product
    Summary {
        /// Product ID
        id: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}
