//! Session-stored shopper identity.
//!
//! The session record holds a single value: the [`ShopperId`] that keys the
//! shopper's cart and trail in [`crate::services::ShopperStore`]. It is
//! written once and never changes, so concurrent requests writing the
//! record back cannot undo each other's cart or trail updates.

use std::fmt;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tower_sessions::session::Error;
use uuid::Uuid;

/// Session keys for shopper data.
pub mod keys {
    /// Key for the shopper's ID.
    pub const SHOPPER: &str = "shopper";
}

/// Identifies one shopper's server-side cart and trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopperId(Uuid);

impl ShopperId {
    /// A new random shopper ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShopperId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShopperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The session's shopper ID, if the shopper has interacted yet.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value is corrupt.
pub async fn find_shopper_id(session: &Session) -> Result<Option<ShopperId>, Error> {
    session.get::<ShopperId>(keys::SHOPPER).await
}

/// The session's shopper ID, assigning a new one on first interaction.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value is corrupt.
pub async fn shopper_id(session: &Session) -> Result<ShopperId, Error> {
    if let Some(id) = find_shopper_id(session).await? {
        return Ok(id);
    }

    let id = ShopperId::new();
    session.insert(keys::SHOPPER, id).await?;
    tracing::debug!(shopper = %id, "New shopper");
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_shopper_id_is_assigned_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert_eq!(find_shopper_id(&session).await.unwrap(), None);

        let first = shopper_id(&session).await.unwrap();
        let second = shopper_id(&session).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(find_shopper_id(&session).await.unwrap(), Some(first));
    }
}
