//! Back-office listing form parsing and validation.
//!
//! The admin UI submits loosely typed input: prices typed into a text box,
//! comma-separated feature lists, specifications pasted as JSON text. This
//! module turns that into a [`ListingDraft`] or a validation error whose
//! message is fit to show the operator.

use serde::Deserialize;

use crate::error::CoreError;
use crate::listing::{
    ListingPatch, ListingStatus, ListingType, NewListing, Specifications, DEFAULT_CURRENCY,
    DEFAULT_WHATSAPP_NUMBER,
};
use crate::types::UserId;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Maximum length for a listing title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length for a listing description.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Maximum number of images attached to one listing.
pub const MAX_IMAGES: usize = 10;

/// Minimum number of digits in a contact number.
const MIN_PHONE_DIGITS: usize = 7;

/* --------------------------------------------------------------------------
   Raw input
   -------------------------------------------------------------------------- */

/// A list field submitted either as a JSON array or as comma-separated text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    List(Vec<String>),
    Text(String),
}

impl ListInput {
    fn into_items(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Text(text) => text.split(',').map(str::to_string).collect(),
        }
    }
}

/// A price submitted as a JSON number or as text typed into a form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

/// The admin create/edit form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingForm {
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<PriceInput>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub images: Option<ListInput>,
    pub features: Option<ListInput>,
    /// A JSON object, or text containing one.
    pub specifications: Option<serde_json::Value>,
    pub whatsapp_number: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<String>,
}

/* --------------------------------------------------------------------------
   Validated draft
   -------------------------------------------------------------------------- */

/// A validated, normalized listing ready to be inserted or applied as an update.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub listing_type: ListingType,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub specifications: Specifications,
    pub whatsapp_number: String,
    pub featured: bool,
    pub status: ListingStatus,
}

impl ListingForm {
    /// Validate the form and normalize it into a [`ListingDraft`].
    pub fn into_draft(self) -> Result<ListingDraft, CoreError> {
        let title = non_blank(self.title);
        let location = non_blank(self.location);
        let listing_type = non_blank(self.listing_type);
        let price = match self.price {
            Some(PriceInput::Text(text)) if text.trim().is_empty() => None,
            other => other,
        };

        let missing: Vec<&str> = [
            ("type", listing_type.is_none()),
            ("title", title.is_none()),
            ("price", price.is_none()),
            ("location", location.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(listing_type), Some(title), Some(price), Some(location)) =
            (listing_type, title, price, location)
        else {
            return Err(CoreError::Validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )));
        };

        let listing_type = ListingType::parse(&listing_type)?;
        validate_title(&title)?;
        let description = non_blank(self.description);
        if let Some(description) = &description {
            validate_description(description)?;
        }
        let price = parse_price(price)?;
        let status = match non_blank(self.status) {
            Some(status) => ListingStatus::parse(&status)?,
            None => ListingStatus::Active,
        };
        let whatsapp_number = match non_blank(self.whatsapp_number) {
            Some(number) => normalize_phone(&number)?,
            None => DEFAULT_WHATSAPP_NUMBER.to_string(),
        };
        let specifications = parse_specifications(self.specifications)?;

        let mut draft = ListingDraft {
            listing_type,
            title,
            description,
            price,
            currency: non_blank(self.currency)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            location,
            images: Vec::new(),
            features: Vec::new(),
            specifications: Specifications::new(),
            whatsapp_number,
            featured: self.featured.unwrap_or(false),
            status,
        };

        for feature in self.features.map(ListInput::into_items).unwrap_or_default() {
            draft.add_feature(&feature);
        }
        for (key, value) in specifications {
            draft.set_specification(&key, value);
        }
        for image in self.images.map(ListInput::into_items).unwrap_or_default() {
            if !image.trim().is_empty() {
                draft.add_image(&image)?;
            }
        }

        Ok(draft)
    }

    /// Validate the form as an edit of an existing listing.
    ///
    /// Required fields are checked as for a new listing, but optional fields
    /// the form leaves out stay `None` in the patch so the stored values are
    /// kept. An empty `description` clears it.
    pub fn into_patch(self) -> Result<ListingPatch, CoreError> {
        let has_description = self.description.is_some();
        let has_currency = self.currency.is_some();
        let has_images = self.images.is_some();
        let has_features = self.features.is_some();
        let has_specifications = self.specifications.is_some();
        let has_whatsapp = self.whatsapp_number.is_some();
        let has_featured = self.featured.is_some();
        let has_status = self.status.is_some();

        let draft = self.into_draft()?;
        Ok(ListingPatch {
            title: Some(draft.title),
            description: has_description.then_some(draft.description),
            price: Some(draft.price),
            currency: has_currency.then_some(draft.currency),
            listing_type: Some(draft.listing_type),
            location: Some(draft.location),
            images: has_images.then_some(draft.images),
            features: has_features.then_some(draft.features),
            specifications: has_specifications.then_some(draft.specifications),
            whatsapp_number: has_whatsapp.then_some(draft.whatsapp_number),
            featured: has_featured.then_some(draft.featured),
            status: has_status.then_some(draft.status),
        })
    }
}

impl ListingDraft {
    /// Add a feature. Blank and duplicate entries are ignored; returns whether
    /// the list changed.
    pub fn add_feature(&mut self, feature: &str) -> bool {
        let feature = feature.trim();
        if feature.is_empty() || self.features.iter().any(|f| f == feature) {
            return false;
        }
        self.features.push(feature.to_string());
        true
    }

    /// Remove a feature by exact name; returns whether it was present.
    pub fn remove_feature(&mut self, feature: &str) -> bool {
        let before = self.features.len();
        self.features.retain(|f| f != feature);
        self.features.len() != before
    }

    /// Set a specification entry. Keys are trimmed; blank keys, blank string
    /// values and nulls are ignored. An existing key is overwritten.
    pub fn set_specification(&mut self, key: &str, value: serde_json::Value) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        let value = match value {
            serde_json::Value::Null => return false,
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return false;
                }
                serde_json::Value::String(trimmed.to_string())
            }
            other => other,
        };
        self.specifications.insert(key.to_string(), value);
        true
    }

    pub fn remove_specification(&mut self, key: &str) -> bool {
        self.specifications.remove(key).is_some()
    }

    /// Attach an image URL. Only absolute http(s) URLs are accepted, up to
    /// [`MAX_IMAGES`]. Duplicates are ignored.
    pub fn add_image(&mut self, raw: &str) -> Result<(), CoreError> {
        let raw = raw.trim();
        let parsed = url::Url::parse(raw)
            .map_err(|_| CoreError::Validation(format!("Invalid image URL '{raw}'")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CoreError::Validation(format!(
                "Image URL must use http or https: '{raw}'"
            )));
        }
        if self.images.iter().any(|i| i == raw) {
            return Ok(());
        }
        if self.images.len() >= MAX_IMAGES {
            return Err(CoreError::Validation(format!(
                "Maximum {MAX_IMAGES} images allowed"
            )));
        }
        self.images.push(raw.to_string());
        Ok(())
    }

    /// Build the insert payload, owned by `owner`.
    pub fn into_new_listing(self, owner: UserId) -> NewListing {
        NewListing {
            title: self.title,
            description: self.description,
            price: self.price,
            currency: self.currency,
            listing_type: self.listing_type,
            location: self.location,
            images: self.images,
            features: self.features,
            specifications: self.specifications,
            whatsapp_number: self.whatsapp_number,
            featured: self.featured,
            status: self.status,
            user_id: owner,
        }
    }
}

/* --------------------------------------------------------------------------
   Field helpers
   -------------------------------------------------------------------------- */

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title too long: {len} chars (max {MAX_TITLE_LEN})"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description too long: {len} chars (max {MAX_DESCRIPTION_LEN})"
        )));
    }
    Ok(())
}

/// Parse a price. Text may contain thousands separators (`3,200,000`).
pub fn parse_price(input: PriceInput) -> Result<f64, CoreError> {
    let value = match input {
        PriceInput::Number(n) => n,
        PriceInput::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .collect();
            cleaned.parse::<f64>().map_err(|_| {
                CoreError::Validation(format!("Price must be a valid number, got '{}'", text.trim()))
            })?
        }
    };
    if !value.is_finite() {
        return Err(CoreError::Validation("Price must be a finite number".into()));
    }
    if value < 0.0 {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    Ok(value)
}

/// Parse the specifications field: a JSON object, or text holding one.
/// Absent, null and blank text all yield an empty map.
pub fn parse_specifications(
    input: Option<serde_json::Value>,
) -> Result<Specifications, CoreError> {
    let value = match input {
        None | Some(serde_json::Value::Null) => return Ok(Specifications::new()),
        Some(serde_json::Value::String(text)) => {
            if text.trim().is_empty() {
                return Ok(Specifications::new());
            }
            serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
                CoreError::Validation(format!("Specifications must be valid JSON: {e}"))
            })?
        }
        Some(other) => other,
    };
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(CoreError::Validation(
            "Specifications must be a JSON object of name/value pairs".into(),
        )),
    }
}

/// Normalize a contact number to `+` followed by digits.
fn normalize_phone(raw: &str) -> Result<String, CoreError> {
    let (plus, rest) = match raw.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", raw),
    };
    let digits: String = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if digits.len() < MIN_PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Invalid WhatsApp number '{raw}'"
        )));
    }
    Ok(format!("{plus}{digits}"))
}
