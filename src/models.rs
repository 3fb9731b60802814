//! Data transfer types for the AccessGrid API.
//!
//! Field names mirror the service's JSON wire format. Response types are
//! container-level `#[serde(default)]` because the service omits fields it
//! considers irrelevant for an endpoint (a provision response, for example,
//! carries only the identifiers, state, and install URL). Request types skip
//! unset optional fields entirely rather than sending empty values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single provisioned NFC credential record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    /// Unique card identifier.
    pub id: String,
    /// Template the card was provisioned from.
    pub card_template_id: String,
    /// Employee identifier the card is issued to.
    pub employee_id: String,
    /// Physical card number.
    pub card_number: String,
    /// Site code, when the template protocol uses one.
    pub site_code: Option<String>,
    /// Cardholder full name.
    pub full_name: String,
    /// Cardholder email address.
    pub email: String,
    /// Cardholder phone number.
    pub phone_number: String,
    /// Employment classification (e.g. `full_time`, `contractor`).
    pub classification: String,
    /// Validity start.
    pub start_date: Option<DateTime<Utc>>,
    /// Validity end.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Cardholder photo, base64 or URL per account configuration.
    pub employee_photo: String,
    /// Lifecycle state (e.g. `active`, `suspended`).
    pub state: String,
    /// URL the cardholder visits to install the card on a device.
    pub install_url: String,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A multi-device access grant wrapping per-device card records.
///
/// Returned instead of a flat [`Card`] by accounts configured for unified
/// access passes. Each entry in `details` is a card-shaped record for one
/// enrolled device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifiedAccessPass {
    /// Unique pass identifier.
    pub id: String,
    /// Template the pass was provisioned from.
    pub card_template_id: String,
    /// Holder full name.
    pub full_name: String,
    /// Lifecycle state.
    pub state: String,
    /// Install URL for the pass.
    pub install_url: String,
    /// Per-device card records covered by this pass.
    pub details: Vec<Card>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of a card-fetching operation.
///
/// The service returns either a flat card or a unified access pass for the
/// same endpoints, depending on account configuration, with no explicit type
/// tag. See [`crate::services::AccessCards::provision`] for how the variant
/// is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum CardOrPass {
    /// A single-device card.
    Card(Card),
    /// A unified multi-device access pass.
    UnifiedAccessPass(UnifiedAccessPass),
}

impl CardOrPass {
    /// Identifier of the card or pass.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Card(card) => &card.id,
            Self::UnifiedAccessPass(pass) => &pass.id,
        }
    }

    /// Lifecycle state of the card or pass.
    #[must_use]
    pub fn state(&self) -> &str {
        match self {
            Self::Card(card) => &card.state,
            Self::UnifiedAccessPass(pass) => &pass.state,
        }
    }

    /// Install URL of the card or pass.
    #[must_use]
    pub fn install_url(&self) -> &str {
        match self {
            Self::Card(card) => &card.install_url,
            Self::UnifiedAccessPass(pass) => &pass.install_url,
        }
    }

    /// Returns the card, if this is the single-card variant.
    #[must_use]
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            Self::Card(card) => Some(card),
            Self::UnifiedAccessPass(_) => None,
        }
    }

    /// Returns the pass, if this is the unified-pass variant.
    #[must_use]
    pub fn as_unified_access_pass(&self) -> Option<&UnifiedAccessPass> {
        match self {
            Self::Card(_) => None,
            Self::UnifiedAccessPass(pass) => Some(pass),
        }
    }
}

/// Parameters for provisioning a new card.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvisionParams {
    /// Template to provision from.
    pub card_template_id: String,
    /// Employee identifier.
    pub employee_id: String,
    /// Physical card number.
    pub card_number: String,
    /// Site code, when the template protocol uses one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
    /// Cardholder full name.
    pub full_name: String,
    /// Cardholder email address.
    pub email: String,
    /// Cardholder phone number.
    pub phone_number: String,
    /// Employment classification.
    pub classification: String,
    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Validity start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Validity end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Cardholder photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
}

/// Parameters for updating an existing card.
///
/// `card_id` selects the card; every other field is applied only when set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateParams {
    /// Card to update.
    pub card_id: String,
    /// New employee identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// New full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// New classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// New validity end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// New photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
}

/// Filters for listing cards. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct ListKeysParams {
    /// Restrict to cards provisioned from this template.
    pub template_id: Option<String>,
    /// Restrict to cards in this lifecycle state.
    pub state: Option<String>,
    /// Restrict to cards issued to this employee.
    pub employee_id: Option<String>,
    /// Restrict to this physical card number.
    pub card_number: Option<String>,
    /// Restrict to this site code.
    pub site_code: Option<String>,
}

/// A reusable card design and configuration blueprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Unique template identifier.
    pub id: String,
    /// Template name.
    pub name: String,
    /// Target platform (e.g. `apple`).
    pub platform: String,
    /// Use case (e.g. `employee_badge`).
    pub use_case: String,
    /// NFC protocol.
    pub protocol: String,
    /// Number of watches the template allows per credential.
    pub watch_count: u32,
    /// Number of iPhones the template allows per credential.
    pub iphone_count: u32,
    /// Visual design elements.
    pub design: TemplateDesign,
    /// Support contact information shown on the card.
    pub support_info: SupportInfo,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Visual design elements of a card template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateDesign {
    /// Card background color.
    pub background_color: String,
    /// Primary label color.
    pub label_color: String,
    /// Secondary label color.
    pub label_secondary_color: String,
    /// Background image reference.
    pub background_image: String,
    /// Logo image reference.
    pub logo_image: String,
    /// Icon image reference.
    pub icon_image: String,
}

/// Support contact information for a card template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportInfo {
    /// Support site URL.
    pub support_url: String,
    /// Support phone number.
    pub support_phone_number: String,
    /// Support email address.
    pub support_email: String,
    /// Privacy policy URL.
    pub privacy_policy_url: String,
    /// Terms and conditions URL.
    pub terms_and_conditions_url: String,
}

/// Parameters for creating a new template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTemplateParams {
    /// Template name.
    pub name: String,
    /// Target platform.
    pub platform: String,
    /// Use case.
    pub use_case: String,
    /// NFC protocol.
    pub protocol: String,
    /// Watches allowed per credential.
    pub watch_count: u32,
    /// iPhones allowed per credential.
    pub iphone_count: u32,
    /// Visual design elements.
    pub design: TemplateDesign,
    /// Support contact information.
    pub support_info: SupportInfo,
}

/// Parameters for updating an existing template.
///
/// `card_template_id` selects the template; every other field is applied
/// only when set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTemplateParams {
    /// Template to update.
    pub card_template_id: String,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New watch allowance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_count: Option<u32>,
    /// New iPhone allowance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iphone_count: Option<u32>,
    /// New design elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<TemplateDesign>,
    /// New support information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_info: Option<SupportInfo>,
}

/// Filters for querying a template's event log. Unset filters are omitted
/// from the query string entirely.
#[derive(Debug, Clone, Default)]
pub struct EventLogFilters {
    /// Restrict to events from one device.
    pub device: Option<String>,
    /// Earliest event timestamp (inclusive).
    pub start_date: Option<DateTime<Utc>>,
    /// Latest event timestamp (inclusive).
    pub end_date: Option<DateTime<Utc>>,
    /// Restrict to one event type.
    pub event_type: Option<String>,
}

/// An entry in a template's event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Unique event identifier.
    pub id: String,
    /// Event type.
    #[serde(rename = "type")]
    pub event_type: String,
    /// User the event concerns.
    pub user_id: String,
    /// Card the event concerns.
    pub card_id: String,
    /// Template the event concerns.
    pub template_id: String,
    /// Device that produced the event.
    pub device: String,
    /// When the event occurred.
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-form event details.
    pub details: String,
}
