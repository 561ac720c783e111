//! Visitor cart: an ordered list of product snapshots with quantities.
//!
//! Lines are addressed by position. Removing a line shifts every later line
//! down by one, so an index is only meaningful against the cart it was read
//! from.
//!
//! # Invariants
//!
//! - Every line has `quantity >= 1`. Setting a quantity to zero or below
//!   removes the line instead.
//! - At most one line exists per product ID; adding a product that is
//!   already in the cart increments that line.
//! - Lines are copies. Later catalog edits never reach a cart.
//!
//! Amounts are computed with checked `Decimal` arithmetic and saturate at
//! `Decimal::MAX` (about 7.9e28) rather than wrapping or panicking. No menu
//! price comes near that, so the cap is never reached in practice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Product, format_amount};

/// Errors returned by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The index does not address a line in the cart. `index` is kept as
    /// submitted, so negative and non-numeric values are reported too.
    #[error("cart has no line at index {index:?} (cart has {len} lines)")]
    InvalidIndex { index: String, len: usize },

    /// The requested quantity does not fit in a cart line.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),
}

/// A product snapshot plus how many of it the visitor wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity`, unrounded. Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product
            .price
            .amount()
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line at `index` now has `quantity`.
    Updated { index: usize, quantity: u32 },
    /// The requested quantity was zero or below, so the line was removed.
    Removed(CartLine),
}

/// The itemized summary shown when a visitor orders at the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTicket {
    /// One `"{quantity}x {name}"` entry per cart line, in cart order.
    pub items: Vec<String>,
    /// Unrounded order total.
    pub total: Decimal,
}

impl OrderTicket {
    /// Total formatted for display.
    #[must_use]
    pub fn display_total(&self) -> String {
        format_amount(self.total)
    }

    /// The full confirmation text.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Head to the counter with your order:\n\n{}\n\nTotal: {}\n\nThanks for stopping by!",
            self.items.join("\n"),
            self.display_total()
        )
    }
}

/// An ordered sequence of cart lines.
///
/// Serializes as a plain JSON array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from existing lines, dropping any with zero quantity.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self { lines };
        cart.lines.retain(|line| line.quantity > 0);
        cart
    }

    /// Restore a cart from its stored text.
    ///
    /// Stored text is untrusted: anything that fails to parse (truncated
    /// JSON, wrong shape, negative prices) yields an empty cart.
    #[must_use]
    pub fn from_stored(text: &str) -> Self {
        match serde_json::from_str::<Vec<CartLine>>(text) {
            Ok(lines) => Self::from_lines(lines),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                Self::new()
            }
        }
    }

    /// Serialize the cart for storage.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lines)
    }

    /// Lines in cart order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for the same product ID, or appends a new
    /// line with quantity 1. Returns the line's resulting quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        1
    }

    /// Set the quantity of the line at `index`.
    ///
    /// A quantity of zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidIndex` if `index` is out of range and
    /// `CartError::QuantityTooLarge` if `quantity` exceeds `u32::MAX`.
    pub fn update_quantity(
        &mut self,
        index: usize,
        quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        if quantity <= 0 {
            return self.remove(index).map(QuantityChange::Removed);
        }

        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or_else(|| CartError::InvalidIndex {
                index: index.to_string(),
                len,
            })?;
        let quantity = u32::try_from(quantity).map_err(|_| CartError::QuantityTooLarge(quantity))?;
        line.quantity = quantity;

        Ok(QuantityChange::Updated { index, quantity })
    }

    /// Remove the line at `index`, shifting later lines down.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidIndex` if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::InvalidIndex {
                index: index.to_string(),
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Resolve a line index as submitted by a client.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidIndex` if `raw` is not a whole number
    /// addressing an existing line (negative values included).
    pub fn line_index(&self, raw: &str) -> Result<usize, CartError> {
        let raw = raw.trim();
        raw.parse::<usize>()
            .ok()
            .filter(|index| *index < self.lines.len())
            .ok_or_else(|| CartError::InvalidIndex {
                index: raw.to_owned(),
                len: self.lines.len(),
            })
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price * quantity` over all lines, unrounded. Saturates at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line.subtotal()).unwrap_or(Decimal::MAX)
        })
    }

    /// Total formatted for display, rounded to cents.
    #[must_use]
    pub fn display_total(&self) -> String {
        format_amount(self.total())
    }

    /// Turn the cart into an order ticket and empty it.
    ///
    /// Returns `None`, leaving the cart as it was, when there is nothing to
    /// order.
    pub fn checkout(&mut self) -> Option<OrderTicket> {
        if self.is_empty() {
            return None;
        }

        let ticket = OrderTicket {
            items: self
                .lines
                .iter()
                .map(|line| format!("{}x {}", line.quantity, line.product.name))
                .collect(),
            total: self.total(),
        };
        self.clear();
        Some(ticket)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn product(id: &str, name: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: format!("{name} description"),
            price: Price::parse(price).unwrap(),
            category: "Mains".to_owned(),
            position: 0,
            favorite: false,
            image: String::new(),
        }
    }

    fn burger_and_fries() -> Cart {
        let mut cart = Cart::new();
        let burger = product("burger", "Burger", "8.00");
        cart.add(&burger);
        cart.add(&burger);
        cart.add(&product("fries", "Fries", "3.50"));
        cart
    }

    #[test]
    fn test_distinct_products_each_get_a_line() {
        let mut cart = Cart::new();
        for id in ["a", "b", "c", "d"] {
            cart.add(&product(id, id, "1"));
        }
        assert_eq!(cart.len(), 4);
        assert!(cart.lines().iter().all(|line| line.quantity == 1));
    }

    #[test]
    fn test_same_product_twice_merges() {
        let mut cart = Cart::new();
        let burger = product("burger", "Burger", "8");
        assert_eq!(cart.add(&burger), 1);
        assert_eq!(cart.add(&burger), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_copies_product_fields() {
        let mut cart = Cart::new();
        let mut burger = product("burger", "Burger", "8");
        cart.add(&burger);
        burger.name = "Renamed".to_owned();
        assert_eq!(cart.lines()[0].product.name, "Burger");
    }

    #[test]
    fn test_total_for_burger_and_fries() {
        let cart = burger_and_fries();
        assert_eq!(cart.total(), Decimal::new(1950, 2));
        assert_eq!(cart.display_total(), "$19.50");
    }

    #[test]
    fn test_total_is_order_independent() {
        let cart = burger_and_fries();
        let mut reversed: Vec<CartLine> = cart.lines().to_vec();
        reversed.reverse();
        assert_eq!(Cart::from_lines(reversed).total(), cart.total());
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = burger_and_fries();
        let change = cart.update_quantity(0, 0).unwrap();
        assert!(matches!(
            change,
            QuantityChange::Removed(ref line) if line.product.name == "Burger"
        ));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let mut cart = burger_and_fries();
        cart.update_quantity(1, -1).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product.name, "Burger");
    }

    #[test]
    fn test_update_quantity_overwrites_in_place() {
        let mut cart = burger_and_fries();
        let change = cart.update_quantity(1, 5).unwrap();
        assert_eq!(change, QuantityChange::Updated { index: 1, quantity: 5 });
        assert_eq!(cart.lines()[1].quantity, 5);
    }

    #[test]
    fn test_update_quantity_rejects_bad_index() {
        let mut cart = burger_and_fries();
        assert_eq!(
            cart.update_quantity(2, 3),
            Err(CartError::InvalidIndex {
                index: "2".to_owned(),
                len: 2
            })
        );
        assert_eq!(
            cart.update_quantity(7, 0),
            Err(CartError::InvalidIndex {
                index: "7".to_owned(),
                len: 2
            })
        );
    }

    #[test]
    fn test_update_quantity_rejects_overflow() {
        let mut cart = burger_and_fries();
        assert_eq!(
            cart.update_quantity(0, i64::MAX),
            Err(CartError::QuantityTooLarge(i64::MAX))
        );
    }

    #[test]
    fn test_remove_first_shifts_second_down() {
        let mut cart = burger_and_fries();
        let removed = cart.remove(0).unwrap();
        assert_eq!(removed.product.name, "Burger");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product.name, "Fries");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.remove(0),
            Err(CartError::InvalidIndex {
                index: "0".to_owned(),
                len: 0
            })
        );
    }

    #[test]
    fn test_line_index_accepts_existing_lines() {
        let cart = burger_and_fries();
        assert_eq!(cart.line_index("0"), Ok(0));
        assert_eq!(cart.line_index(" 1 "), Ok(1));
    }

    #[test]
    fn test_line_index_rejects_negative_and_garbage() {
        let cart = burger_and_fries();
        for raw in ["-1", "2", "1.5", "first", "", "99999999999999999999999"] {
            assert_eq!(
                cart.line_index(raw),
                Err(CartError::InvalidIndex {
                    index: raw.to_owned(),
                    len: 2
                }),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_amounts_saturate_instead_of_wrapping() {
        let mut cart = Cart::new();
        let mut huge = product("huge", "Huge", "1");
        huge.price = Price::new(Decimal::MAX).unwrap();
        cart.add(&huge);
        cart.update_quantity(0, 2).unwrap();
        assert_eq!(cart.lines()[0].subtotal(), Decimal::MAX);
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_checkout_empties_cart() {
        let mut cart = burger_and_fries();
        let ticket = cart.checkout().unwrap();
        assert_eq!(ticket.items, vec!["2x Burger".to_owned(), "1x Fries".to_owned()]);
        assert_eq!(ticket.display_total(), "$19.50");
        assert!(ticket.message().contains("2x Burger\n1x Fries"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.checkout().is_none());
    }

    #[test]
    fn test_stored_round_trip() {
        let cart = burger_and_fries();
        let text = cart.to_stored().unwrap();
        assert_eq!(Cart::from_stored(&text), cart);
    }

    #[test]
    fn test_truncated_stored_cart_is_empty() {
        let text = burger_and_fries().to_stored().unwrap();
        let truncated = &text[..text.len() / 2];
        assert!(Cart::from_stored(truncated).is_empty());
        assert!(Cart::from_stored("").is_empty());
        assert!(Cart::from_stored("{\"not\":\"a list\"}").is_empty());
    }

    #[test]
    fn test_stored_zero_quantity_lines_are_dropped() {
        let mut lines = burger_and_fries().lines().to_vec();
        lines[0].quantity = 0;
        let text = serde_json::to_string(&lines).unwrap();
        let cart = Cart::from_stored(&text);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product.name, "Fries");
    }

    #[test]
    fn test_item_count_sums_quantities() {
        assert_eq!(burger_and_fries().item_count(), 3);
    }
}
