//! Newtype IDs for type-safe entity references.
//!
//! Rows of the hosted products table are keyed by UUIDs ([`RecordId`]); the
//! ordering page refers to products by an opaque [`ProductId`] that either
//! kind of identifier converts into.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a product on the ordering page.
///
/// Built-in products use small numbers ("1" to "12"); products read from the
/// hosted table use their row id. The value is opaque and only compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Error parsing a blank product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("product id cannot be empty")]
pub struct EmptyProductId;

impl ProductId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = EmptyProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyProductId);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<RecordId> for ProductId {
    fn from(id: RecordId) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a row in the hosted products table.
///
/// The table assigns these on insert; the application never generates them
/// except for in-process tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random (v4) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parse_trims() {
        let id: ProductId = " 7 ".parse().unwrap();
        assert_eq!(id, ProductId::from(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_product_id_rejects_blank() {
        assert_eq!("  ".parse::<ProductId>(), Err(EmptyProductId));
    }

    #[test]
    fn test_product_id_from_record_id() {
        let record = RecordId::new(Uuid::nil());
        assert_eq!(ProductId::from(record).as_str(), Uuid::nil().to_string());
    }

    #[test]
    fn test_record_id_round_trips_through_display() {
        let id = RecordId::generate();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_record_id_serializes_as_plain_uuid() {
        let uuid = Uuid::nil();
        let json = serde_json::to_string(&RecordId::new(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
