//! Core types for Patty Wagon.
//!
//! This module provides type-safe wrappers for the menu's domain records.

pub mod category;
pub mod id;
pub mod price;
pub mod product;

pub use category::{Category, CategoryInput};
pub use id::*;
pub use price::{Price, PriceError, format_amount};
pub use product::{PLACEHOLDER_IMAGE, Product, ProductInput};
