//! Client library for the AccessGrid NFC access card API.
//!
//! AccessGrid manages NFC-based digital access cards (employee badges, keys)
//! and the templates they are provisioned from. This crate provides typed
//! async operations for the full card lifecycle plus console-level template
//! and event-log management, over an authenticated request pipeline:
//! HMAC-SHA256 request signing, API error normalization, and polymorphic
//! decoding of card responses.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use accessgrid::{AccessGrid, ProvisionParams};
//!
//! # async fn example() -> accessgrid::Result<()> {
//! let client = AccessGrid::new("account-id", "secret-key")?;
//!
//! let params = ProvisionParams {
//!     card_template_id: "0xd3adb00b5".to_owned(),
//!     employee_id: "123456789".to_owned(),
//!     full_name: "Employee Name".to_owned(),
//!     email: "employee@example.com".to_owned(),
//!     classification: "full_time".to_owned(),
//!     ..ProvisionParams::default()
//! };
//!
//! let provisioned = client.cards.provision(&params).await?;
//! println!("install URL: {}", provisioned.install_url());
//! # Ok(())
//! # }
//! ```
//!
//! # Card or unified access pass
//!
//! Accounts configured for unified multi-device access passes receive a
//! [`UnifiedAccessPass`] (wrapping per-device card records) from the same
//! endpoints that otherwise return a flat [`Card`]. The wire format carries
//! no type tag, so [`AccessCards::provision`](services::AccessCards::provision)
//! and [`AccessCards::get`](services::AccessCards::get) return the closed sum
//! type [`CardOrPass`]:
//!
//! ```rust,no_run
//! use accessgrid::{AccessGrid, CardOrPass};
//!
//! # async fn example() -> accessgrid::Result<()> {
//! # let client = AccessGrid::new("account-id", "secret-key")?;
//! match client.cards.get("0xc4rd1d").await? {
//!     CardOrPass::Card(card) => println!("single card: {}", card.id),
//!     CardOrPass::UnifiedAccessPass(pass) => {
//!         println!("pass covering {} devices", pass.details.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`ClientConfig`] overrides the base URL (staging, local mock server) or
//! supplies a pre-configured [`reqwest::Client`]:
//!
//! ```rust
//! use accessgrid::{AccessGrid, ClientConfig};
//!
//! # fn example() -> accessgrid::Result<()> {
//! let client = AccessGrid::with_config(
//!     "account-id",
//!     "secret-key",
//!     ClientConfig {
//!         base_url: Some("https://staging.api.example.com".to_owned()),
//!         ..ClientConfig::default()
//!     },
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! A constructed client is immutable. Clone the service handles freely and
//! call them from as many tasks as you like; each operation is one
//! independent signed round trip over a pooled HTTP client. The crate never
//! retries; retry policy belongs to the caller.
//!
//! # Errors
//!
//! Everything returns [`Result`]. Service rejections (status >= 400) arrive
//! as [`AccessGridError::Api`] carrying the status, a best-effort message,
//! and the request ID when the service provided one; transport failures and
//! response-shape mismatches are separate variants. See [`error`] for the
//! full taxonomy.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod auth;
mod client;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

pub use client::ClientConfig;
pub use error::{AccessGridError, ApiError, Result};
pub use models::{
    Card, CardOrPass, CreateTemplateParams, Event, EventLogFilters, ListKeysParams,
    ProvisionParams, SupportInfo, Template, TemplateDesign, UnifiedAccessPass,
    UpdateParams, UpdateTemplateParams,
};
pub use services::{AccessCards, Console};

/// Entry point for the AccessGrid API.
///
/// Holds the two service façades, which share one authenticated transport.
#[derive(Debug, Clone)]
pub struct AccessGrid {
    /// Card provisioning and lifecycle operations.
    pub cards: AccessCards,
    /// Template management and event logs.
    pub console: Console,
}

impl AccessGrid {
    /// Creates a client with the production base URL and default transport.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGridError::MissingAccountId`] or
    /// [`AccessGridError::MissingSecretKey`] when a credential is empty.
    /// No network I/O is performed.
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(account_id, secret_key, ClientConfig::default())
    }

    /// Creates a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Credential validation as in [`new`](Self::new), plus
    /// [`AccessGridError::InvalidBaseUrl`] for an unparseable base-URL
    /// override.
    pub fn with_config(
        account_id: impl Into<String>,
        secret_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = Arc::new(client::Client::new(account_id.into(), secret_key.into(), config)?);
        Ok(Self {
            cards: AccessCards::new(Arc::clone(&client)),
            console: Console::new(client),
        })
    }
}
