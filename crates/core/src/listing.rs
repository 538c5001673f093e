//! Listing records and the payloads used to create and update them.
//!
//! The `listings` table lives in the managed backend; these types mirror its
//! columns so rows can be (de)serialized straight from the REST surface.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ListingId, Timestamp, UserId};

/// Free-form key/value specifications (e.g. `"Mileage": "45,000 km"`).
pub type Specifications = serde_json::Map<String, serde_json::Value>;

/// Currency used when a form does not name one.
pub const DEFAULT_CURRENCY: &str = "KSH";

/// Contact number used when a form leaves the WhatsApp field blank.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+254712345678";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// What is being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Car,
    Property,
}

impl ListingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Property => "property",
        }
    }

    /// Parse the wire name, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "property" => Ok(Self::Property),
            other => Err(CoreError::Validation(format!(
                "Invalid listing type '{other}'. Must be one of: car, property"
            ))),
        }
    }
}

/// Lifecycle of a listing. Only `active` listings appear in the public catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Sold,
    Inactive,
}

impl ListingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "inactive" => Ok(Self::Inactive),
            other => Err(CoreError::Validation(format!(
                "Invalid listing status '{other}'. Must be one of: active, sold, inactive"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A row from the `listings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Insert payload for the `listings` table. The backend assigns `id` and
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewListing {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub location: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub specifications: Specifications,
    pub whatsapp_number: String,
    pub featured: bool,
    pub status: ListingStatus,
    pub user_id: UserId,
}

/// Update payload. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to an in-memory row.
    pub fn apply_to(&self, listing: &mut Listing) {
        if let Some(title) = &self.title {
            listing.title = title.clone();
        }
        if let Some(description) = &self.description {
            listing.description = description.clone();
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(currency) = &self.currency {
            listing.currency = currency.clone();
        }
        if let Some(listing_type) = self.listing_type {
            listing.listing_type = listing_type;
        }
        if let Some(location) = &self.location {
            listing.location = location.clone();
        }
        if let Some(images) = &self.images {
            listing.images = images.clone();
        }
        if let Some(features) = &self.features {
            listing.features = features.clone();
        }
        if let Some(specifications) = &self.specifications {
            listing.specifications = specifications.clone();
        }
        if let Some(number) = &self.whatsapp_number {
            listing.whatsapp_number = number.clone();
        }
        if let Some(featured) = self.featured {
            listing.featured = featured;
        }
        if let Some(status) = self.status {
            listing.status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Back-office aggregates
// ---------------------------------------------------------------------------

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub cars: usize,
    pub properties: usize,
    pub featured: usize,
}

impl DashboardStats {
    pub fn from_listings(listings: &[Listing]) -> Self {
        listings.iter().fold(Self::default(), |mut stats, listing| {
            stats.total += 1;
            match listing.listing_type {
                ListingType::Car => stats.cars += 1,
                ListingType::Property => stats.properties += 1,
            }
            if listing.featured {
                stats.featured += 1;
            }
            stats
        })
    }
}

/// Split a catalog page into featured and regular listings, keeping order.
pub fn partition_featured(listings: Vec<Listing>) -> (Vec<Listing>, Vec<Listing>) {
    listings.into_iter().partition(|l| l.featured)
}
