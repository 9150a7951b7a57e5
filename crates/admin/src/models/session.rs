//! Session-stored panel state.

use kirana_core::Notification;
use tower_sessions::Session;
use tracing::warn;

/// Session keys for panel data.
pub mod keys {
    /// Key for the notification shown on the next page render.
    pub const FLASH: &str = "flash";

    /// Key for the product awaiting delete confirmation.
    pub const PENDING_DELETE: &str = "pending_delete";
}

/// Queue a notification for the next render.
pub async fn set_flash(session: &Session, notification: &Notification) {
    if let Err(e) = session.insert(keys::FLASH, notification).await {
        warn!(error = %e, "Failed to store flash notification");
    }
}

/// Take the queued notification, if any.
pub async fn take_flash(session: &Session) -> Option<Notification> {
    session.remove::<Notification>(keys::FLASH).await.ok().flatten()
}
