//! Patty Wagon Core - Shared menu, cart and catalog library.
//!
//! This crate provides the types and logic shared by all Patty Wagon components:
//! - `storefront` - Public menu site and per-visitor cart
//! - `admin` - Catalog dashboard for editing products and categories
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! Everything except [`store::postgres`] is free of I/O. The catalog store is
//! described by the [`CatalogStore`] trait so the binaries can run against
//! `PostgreSQL` in production and [`MemoryCatalogStore`] in tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, product and category records
//! - [`cart`] - Cart lines, quantity rules and totals
//! - [`catalog`] - Sorted catalog snapshot and menu filtering
//! - [`store`] - Catalog store trait and implementations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod store;
pub mod types;

pub use cart::{Cart, CartError, CartLine, OrderTicket, QuantityChange};
pub use catalog::{Catalog, CategoryCard, FAVORITES_LIMIT, MenuFilter, MenuSection};
pub use store::{CatalogStore, MemoryCatalogStore, StoreError, StoreResult};
pub use types::*;
