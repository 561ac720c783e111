//! Category create form.

use patty_wagon_core::CategoryInput;
use serde::Deserialize;

use super::{FieldErrors, parse_position};

/// Category form fields as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
}

impl CategoryForm {
    /// Validate the form into writeable category fields.
    ///
    /// # Errors
    ///
    /// Returns a position message when position is not an integer.
    pub fn validate(&self) -> Result<CategoryInput, FieldErrors> {
        let position = parse_position(&self.position).map_err(|message| FieldErrors {
            position: Some(message),
            ..FieldErrors::default()
        })?;
        Ok(CategoryInput {
            name: self.name.trim().to_string(),
            position,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_category() {
        let form = CategoryForm {
            name: " Shakes ".to_string(),
            position: "3".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.name, "Shakes");
        assert_eq!(input.position, 3);
    }

    #[test]
    fn test_bad_position() {
        let form = CategoryForm {
            name: "Shakes".to_string(),
            position: "third".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.position.is_some());
        assert!(errors.price.is_none());
    }
}
