//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod show;

use catalog_core::search::{Range, SortPreset};
use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Page to show (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page: 10, 50 or 100 (default from config).
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Name search. When set, every other filter is ignored.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category to include (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Price range, e.g. 0..2500000.
    #[arg(long)]
    pub price: Option<Range>,

    /// Weight range in grams, e.g. 1..10.
    #[arg(long)]
    pub weight: Option<Range>,

    /// Size range on the largest dimension.
    #[arg(long)]
    pub size: Option<Range>,

    /// Sort preset: name-asc, price-asc, price-desc, weight-asc, weight-desc, likes-desc.
    #[arg(long, default_value = "name-asc")]
    pub sort: SortPreset,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: i64,

    /// Catalog page to look the product up on.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page of that catalog page.
    #[arg(long)]
    pub per_page: Option<usize>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List the cart.
    List {
        /// Print each item's QR code.
        #[arg(long)]
        qr: bool,
    },
    /// Add a product from the catalog.
    Add {
        /// Product ID.
        id: i64,

        /// Catalog page the product is on.
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Items per page of that catalog page.
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Remove the entry at a position shown by `cart list`.
    Remove {
        /// Position (1-indexed).
        index: usize,
    },
    /// Empty the cart and end the session.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Review the cart for checkout, with a QR code per item for the cashier.
    Checkout,
    /// Print a share link for the cart.
    Share {
        /// Storefront origin (default from config).
        #[arg(long)]
        origin: Option<String>,
    },
    /// Load a shared cart from a link or bare token.
    Open {
        /// Share link or comma-separated ids.
        link: String,

        /// Catalog page to match the ids against.
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Items per page of that catalog page.
        #[arg(long)]
        per_page: Option<usize>,
    },
}
