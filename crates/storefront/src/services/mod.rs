//! Per-visitor state kept in the session.
//!
//! # Services
//!
//! - `cart_store` - Load and save the visitor's cart
//! - `flash` - One-shot confirmation messages

pub mod cart_store;
pub mod flash;

pub use cart_store::{CartStore, CartStoreError};
