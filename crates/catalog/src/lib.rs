//! AdForge Catalog
//!
//! Turns a storefront CSV export into a list of publishable products:
//! - **Columns:** header names resolved to typed column descriptors
//! - **Parser:** quote-aware line splitting and multi-row variant grouping
//! - **Product:** catalog entries with their nested variants
//! - **Filter:** vendor/category narrowing used by the product picker
//!
//! Rows sharing a handle merge into one product; only published products
//! with an image survive parsing.

pub mod columns;
pub mod filter;
pub mod parser;
pub mod product;

pub use columns::*;
pub use filter::*;
pub use parser::*;
pub use product::*;
