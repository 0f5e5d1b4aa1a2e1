//! Cart module.
//!
//! Contains the selection itself, its session-backed store and share links.

mod cart;
mod share;
mod store;

pub use cart::Cart;
pub use share::{ShareLink, ShareToken, SHARE_PARAM, SHARE_PATH};
pub use store::{CartStore, SharedCart, CART_STORAGE_KEY};
