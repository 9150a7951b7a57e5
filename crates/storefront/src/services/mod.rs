//! Outbound integrations for storefront.
//!
//! # Services
//!
//! - `whatsapp` - Order hand-off links for WhatsApp click-to-chat

pub mod whatsapp;

pub use whatsapp::WhatsAppChannel;
