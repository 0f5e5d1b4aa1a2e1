//! Product catalog module.
//!
//! Contains the product shape and per-card like state.

mod like;
mod product;

pub use like::{LikeCooldown, LIKE_COOLDOWN};
pub use product::{find_duplicate_id, find_product, Dimensions, Product};
