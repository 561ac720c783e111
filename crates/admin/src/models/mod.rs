//! Form models for the admin panel.
//!
//! Forms arrive as raw text so that a rejected submission can be shown back
//! exactly as typed.

pub mod category_form;
pub mod product_form;

pub use category_form::CategoryForm;
pub use product_form::ProductForm;

/// Per-field validation messages for a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub price: Option<String>,
    pub position: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none() && self.position.is_none()
    }
}

/// Parse a sort position typed into a form.
pub(crate) fn parse_position(text: &str) -> Result<i32, String> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| format!("Position must be a whole number (got {:?})", text.trim()))
}
