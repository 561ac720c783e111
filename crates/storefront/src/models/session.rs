//! Session keys.
//!
//! A visitor's session holds two values: the serialized cart and a one-shot
//! flash message.

/// Session keys for visitor data.
pub mod keys {
    /// Key for the serialized cart text.
    pub const CART: &str = "cart";

    /// Key for the confirmation message shown on the next page view.
    pub const FLASH: &str = "flash";
}
