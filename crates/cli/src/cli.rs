//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Browse a product catalog and manage shopper session state")]
pub struct Cli {
    /// JSON file holding an array of products.
    #[arg(long, global = true, env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Session data directory (overrides STOREFRONT_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a query string and print the filtered, searched, sorted listing.
    Browse(BrowseArgs),
    /// Print the filter a query string decodes to.
    Decode { query: String },
    /// Record a product view in the recently viewed list.
    View { id: String },
    /// Manage the recently viewed list.
    #[command(subcommand)]
    Recent(RecentCommand),
    /// Manage the comparison set.
    #[command(subcommand)]
    Compare(CompareCommand),
    /// Price a group of catalog products as a bundle.
    Bundle(BundleArgs),
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Query string, e.g. "?search=lamp&sortBy=priceAsc".
    #[arg(default_value = "")]
    pub query: String,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum RecentCommand {
    List,
    Remove { id: String },
    Clear,
    /// Change the capacity for this run, evicting the oldest entries if needed.
    Capacity { capacity: usize },
}

#[derive(Debug, Subcommand)]
pub enum CompareCommand {
    List,
    Add { id: String },
    Remove { id: String },
    Clear,
}

#[derive(Debug, Args)]
pub struct BundleArgs {
    /// Comma-separated product ids.
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<String>,
    /// Percentage off the combined price.
    #[arg(long)]
    pub discount: f64,
    #[arg(long, default_value = "Bundle")]
    pub name: String,
    /// Skip the bundle construction rules (minimum size, discount range).
    #[arg(long)]
    pub unchecked: bool,
}
