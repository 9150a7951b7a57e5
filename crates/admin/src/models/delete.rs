//! Two-step product deletion.
//!
//! Asking to delete a product records it as pending in the session and shows
//! a confirmation naming it. The delete is only carried out when the confirm
//! request names the same product; cancelling or confirming clears the
//! pending entry.

use kirana_core::RecordId;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::product::AdminProduct;
use super::session::keys;

/// A delete waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDelete {
    pub id: RecordId,
    pub name: String,
}

impl PendingDelete {
    #[must_use]
    pub fn for_product(product: &AdminProduct) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
        }
    }

    /// Confirmation prompt shown before deleting.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.name)
    }

    /// Record the pending delete, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns the session store error.
    pub async fn store(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(keys::PENDING_DELETE, self).await
    }

    /// Take the pending delete if it targets `id`.
    ///
    /// The pending entry is cleared either way, so a mismatched confirm must
    /// be requested again.
    ///
    /// # Errors
    ///
    /// Returns the session store error.
    pub async fn confirm(
        session: &Session,
        id: RecordId,
    ) -> Result<Option<Self>, tower_sessions::session::Error> {
        let pending = session.remove::<Self>(keys::PENDING_DELETE).await?;
        Ok(pending.filter(|p| p.id == id))
    }

    /// Drop any pending delete.
    ///
    /// # Errors
    ///
    /// Returns the session store error.
    pub async fn cancel(session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.remove::<Self>(keys::PENDING_DELETE).await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn pending(name: &str) -> PendingDelete {
        PendingDelete {
            id: RecordId::generate(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_prompt_names_target() {
        assert_eq!(
            pending("Toor Dal").prompt(),
            "Are you sure you want to delete \"Toor Dal\"?"
        );
    }

    #[tokio::test]
    async fn test_confirm_requires_matching_id() {
        let session = session();
        let target = pending("Sugar");
        target.store(&session).await.unwrap();

        let other = RecordId::generate();
        assert_eq!(PendingDelete::confirm(&session, other).await.unwrap(), None);
        // Cleared by the mismatched attempt
        assert_eq!(PendingDelete::confirm(&session, target.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_confirm_takes_pending() {
        let session = session();
        let target = pending("Salt");
        target.store(&session).await.unwrap();

        let confirmed = PendingDelete::confirm(&session, target.id).await.unwrap();
        assert_eq!(confirmed, Some(target));
    }

    #[tokio::test]
    async fn test_cancel_clears_pending() {
        let session = session();
        let target = pending("Bread");
        target.store(&session).await.unwrap();

        PendingDelete::cancel(&session).await.unwrap();
        assert_eq!(PendingDelete::confirm(&session, target.id).await.unwrap(), None);
    }
}
