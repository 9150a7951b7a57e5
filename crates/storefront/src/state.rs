//! Application state shared across handlers.

use std::sync::Arc;

use kirana_core::{CurrencyCode, OrderPolicy};

use crate::catalog::CatalogSource;
use crate::config::{StoreInfo, StorefrontConfig};
use crate::services::WhatsAppChannel;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the product source and the order channel.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogSource,
    channel: WhatsAppChannel,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: CatalogSource) -> Self {
        let channel = WhatsAppChannel::new(config.order.whatsapp_number.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                channel,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product source.
    #[must_use]
    pub fn catalog(&self) -> &CatalogSource {
        &self.inner.catalog
    }

    /// Get a reference to the order hand-off channel.
    #[must_use]
    pub fn channel(&self) -> &WhatsAppChannel {
        &self.inner.channel
    }

    #[must_use]
    pub fn store(&self) -> &StoreInfo {
        &self.inner.config.store
    }

    #[must_use]
    pub fn policy(&self) -> OrderPolicy {
        OrderPolicy {
            require_address: self.inner.config.order.require_address,
        }
    }

    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.config.order.currency
    }
}
