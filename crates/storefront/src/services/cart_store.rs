//! Cart persistence in the visitor session.
//!
//! The cart is stored as serialized text under a single session key, so every
//! page view sees the same cart until the session expires. The text is
//! untrusted on the way back in: anything unreadable becomes an empty cart.
//!
//! Two tabs writing the same session race; the last write wins.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use patty_wagon_core::Cart;
use thiserror::Error;
use tower_sessions::Session;

use crate::models::session_keys;

/// Errors from saving or clearing the stored cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the current visitor's stored cart.
///
/// Works as an extractor in any handler running under the session layer.
#[derive(Debug, Clone)]
pub struct CartStore {
    session: Session,
}

impl CartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Read the stored cart.
    ///
    /// Missing, malformed and unreadable values all yield an empty cart.
    pub async fn get(&self) -> Cart {
        match self.session.get::<String>(session_keys::CART).await {
            Ok(Some(text)) => Cart::from_stored(&text),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart");
                Cart::new()
            }
        }
    }

    /// Persist `cart`, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the cart cannot be serialized or the
    /// session cannot be written.
    pub async fn set(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let text = cart.to_stored()?;
        self.session.insert(session_keys::CART, text).await?;
        Ok(())
    }

    /// Remove the stored cart entirely.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError::Session` if the session cannot be written.
    pub async fn clear(&self) -> Result<(), CartStoreError> {
        self.session.remove_value(session_keys::CART).await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for CartStore
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self::new)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Session layer is not configured",
            ))
    }
}
