//! One-shot confirmation messages.
//!
//! A flash message is written by a form handler and consumed by the next
//! page render, which shows it as a toast that fades out after three seconds.

use tower_sessions::Session;

use crate::models::session_keys;

/// Queue `message` for the next page view.
///
/// Failures are logged and otherwise ignored; a lost toast never fails the
/// action that produced it.
pub async fn set(session: &Session, message: impl Into<String>) {
    if let Err(e) = session.insert(session_keys::FLASH, message.into()).await {
        tracing::warn!(error = %e, "Failed to store flash message");
    }
}

/// Take the pending flash message, if any.
pub async fn take(session: &Session) -> Option<String> {
    match session.remove::<String>(session_keys::FLASH).await {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_consumed_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        set(&session, "Burger added to your cart").await;

        assert_eq!(
            take(&session).await.as_deref(),
            Some("Burger added to your cart")
        );
        assert_eq!(take(&session).await, None);
    }
}
