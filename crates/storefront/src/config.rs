//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Server
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`)
//!
//! ## Catalog
//! - `CATALOG_SOURCE` - `static` (built-in list) or `remote` (products table); default `static`
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string, required for `remote`
//! - `CATALOG_CACHE_TTL_SECS` - How long the remote list is cached (default: 300)
//!
//! ## Orders
//! - `ORDER_WHATSAPP_NUMBER` - Digits of the number orders are sent to (default: 919876543210)
//! - `ORDER_REQUIRE_ADDRESS` - Whether a delivery address is required (default: true)
//! - `STORE_CURRENCY` - ISO currency code (default: INR)
//!
//! ## Store details
//! - `STORE_NAME`, `STORE_TAGLINE`, `STORE_ADDRESS`, `STORE_PHONE`, `STORE_HOURS`
//!
//! ## Error tracking
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use kirana_core::CurrencyCode;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the product list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSourceKind {
    #[default]
    Static,
    Remote,
}

impl std::str::FromStr for CatalogSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "remote" | "database" | "db" => Ok(Self::Remote),
            other => Err(format!("expected `static` or `remote`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    pub catalog: CatalogConfig,
    pub order: OrderConfig,
    pub store: StoreInfo,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Product source settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub source: CatalogSourceKind,
    /// `PostgreSQL` connection URL (contains password). Only set for `remote`.
    pub database_url: Option<SecretString>,
    pub cache_ttl: Duration,
}

/// Order hand-off settings.
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// International number without `+` or spaces, as `wa.me` expects.
    pub whatsapp_number: String,
    pub require_address: bool,
    pub currency: CurrencyCode,
}

/// Store details shown in the header and contact cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: "Sharma Ji's Kirana Store".to_string(),
            tagline: "Fresh \u{2022} Quality \u{2022} Affordable".to_string(),
            address: "Shop No. 15, Green Market Complex, Sector 21, Dwarka, New Delhi - 110075"
                .to_string(),
            phone: "+91 98765 43210".to_string(),
            hours: "Open: 7:00 AM - 10:00 PM Daily".to_string(),
        }
    }
}

const DEFAULT_WHATSAPP_NUMBER: &str = "919876543210";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid or the remote catalog is
    /// selected without a database URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let host = vars.parsed("STOREFRONT_HOST", "127.0.0.1")?;
        let port = vars.parsed("STOREFRONT_PORT", "3000")?;
        let base_url = vars.or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let catalog = CatalogConfig::from_vars(&vars)?;
        let order = OrderConfig::from_vars(&vars)?;

        let defaults = StoreInfo::default();
        let store = StoreInfo {
            name: vars.or_default("STORE_NAME", &defaults.name),
            tagline: vars.or_default("STORE_TAGLINE", &defaults.tagline),
            address: vars.or_default("STORE_ADDRESS", &defaults.address),
            phone: vars.or_default("STORE_PHONE", &defaults.phone),
            hours: vars.or_default("STORE_HOURS", &defaults.hours),
        };

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            order,
            store,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: vars.parsed("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: vars.parsed("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        let source: CatalogSourceKind = vars.parsed("CATALOG_SOURCE", "static")?;
        let database_url = vars.database_url("STOREFRONT_DATABASE_URL");
        if source == CatalogSourceKind::Remote && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar(
                "STOREFRONT_DATABASE_URL".to_string(),
            ));
        }
        let ttl_secs: u64 =
            vars.parsed("CATALOG_CACHE_TTL_SECS", &DEFAULT_CACHE_TTL_SECS.to_string())?;

        Ok(Self {
            source,
            database_url,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl OrderConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        let whatsapp_number = vars.or_default("ORDER_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        let digits: String = whatsapp_number
            .chars()
            .filter(|c| !matches!(c, '+' | ' ' | '-'))
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "ORDER_WHATSAPP_NUMBER".to_string(),
                "must contain only digits".to_string(),
            ));
        }

        Ok(Self {
            whatsapp_number: digits,
            require_address: parse_bool(
                "ORDER_REQUIRE_ADDRESS",
                vars.optional("ORDER_REQUIRE_ADDRESS"),
                true,
            )?,
            currency: vars.parsed("STORE_CURRENCY", "INR")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Borrowed variable source.
struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable (or its default) with `FromStr`.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
    fn database_url(&self, primary_key: &str) -> Option<SecretString> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got `{other}`"),
        )),
    }
}
