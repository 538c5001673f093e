//! Catalog search and filtering.
//!
//! A [`ListingQuery`] describes which listings to fetch and in what order.
//! The managed-backend client translates it into REST filters; [`ListingQuery::matches`]
//! and [`sort_listings`] apply the same semantics in memory.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::error::CoreError;
use crate::listing::{Listing, ListingStatus, ListingType};

/// Characters that delimit expressions in the backend's filter grammar, plus
/// the `ilike` wildcards. They are stripped from free text before it is
/// embedded in a query.
const RESERVED_FILTER_CHARS: &[char] = &[',', '(', ')', '*', '%', '_', '\\', '"', ':'];

// ---------------------------------------------------------------------------
// Price range
// ---------------------------------------------------------------------------

/// Inclusive price bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, CoreError> {
        for bound in [min, max].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(CoreError::Validation(format!(
                    "Price bound must be a non-negative number, got {bound}"
                )));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(CoreError::Validation(format!(
                    "Minimum price {lo} exceeds maximum price {hi}"
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// Parse the storefront's price bucket syntax: `"500000-1000000"`,
    /// `"5000000+"`. Blank input and `"any"` mean unbounded.
    pub fn parse(bucket: &str) -> Result<Self, CoreError> {
        let bucket = bucket.trim();
        if bucket.is_empty() || bucket.eq_ignore_ascii_case("any") {
            return Ok(Self::default());
        }

        let invalid = || CoreError::Validation(format!("Invalid price range '{bucket}'"));
        let number = |s: &str| s.trim().parse::<f64>().map_err(|_| invalid());

        if let Some(lower) = bucket.strip_suffix('+') {
            return Self::new(Some(number(lower)?), None);
        }
        let (lower, upper) = bucket.split_once('-').ok_or_else(&invalid)?;
        Self::new(Some(number(lower)?), Some(number(upper)?))
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min.map_or(true, |lo| price >= lo) && self.max.map_or(true, |hi| price <= hi)
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Featured listings first, newest first within each group (public catalog).
    #[default]
    FeaturedFirst,
    /// Newest first (back office).
    NewestFirst,
}

/// Which listings to fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub listing_type: Option<ListingType>,
    /// Case-insensitive substring of `location`.
    pub location: Option<String>,
    /// Case-insensitive substring of `title` or `description`.
    pub text: Option<String>,
    pub price: PriceRange,
    pub status: Option<ListingStatus>,
    pub featured_only: bool,
    pub order: SortOrder,
}

impl ListingQuery {
    /// Everything the public catalog may show: active listings, featured first.
    pub fn catalog() -> Self {
        Self {
            status: Some(ListingStatus::Active),
            order: SortOrder::FeaturedFirst,
            ..Default::default()
        }
    }

    /// Every listing regardless of status, newest first.
    pub fn back_office() -> Self {
        Self {
            order: SortOrder::NewestFirst,
            ..Default::default()
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if self.listing_type.is_some_and(|t| t != listing.listing_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != listing.status) {
            return false;
        }
        if self.featured_only && !listing.featured {
            return false;
        }
        if let Some(location) = &self.location {
            if !contains_ci(&listing.location, location) {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let in_title = contains_ci(&listing.title, text);
            let in_description = listing
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, text));
            if !in_title && !in_description {
                return false;
            }
        }
        self.price.contains(listing.price)
    }
}

/// Query-string parameters accepted by catalog endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogParams {
    /// `all`, `car` or `property`.
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub location: Option<String>,
    pub q: Option<String>,
    /// Bucket syntax, see [`PriceRange::parse`].
    pub price_range: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub featured: Option<bool>,
}

impl CatalogParams {
    /// Narrow `base` with these parameters.
    pub fn apply_to(self, mut base: ListingQuery) -> Result<ListingQuery, CoreError> {
        base.listing_type = match self.listing_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) if t.eq_ignore_ascii_case("all") => None,
            Some(t) => Some(ListingType::parse(t)?),
        };
        base.location = self.location.as_deref().and_then(sanitize_search_term);
        base.text = self.q.as_deref().and_then(sanitize_search_term);

        base.price = match self.price_range.as_deref() {
            Some(bucket) if !bucket.trim().is_empty() => {
                if self.min_price.is_some() || self.max_price.is_some() {
                    return Err(CoreError::Validation(
                        "Use either price_range or min_price/max_price, not both".into(),
                    ));
                }
                PriceRange::parse(bucket)?
            }
            _ => PriceRange::new(self.min_price, self.max_price)?,
        };
        if let Some(featured) = self.featured {
            base.featured_only = featured;
        }
        Ok(base)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strip filter-grammar delimiters and collapse whitespace.
/// Returns `None` if nothing searchable remains.
///
/// ```
/// use storefront_core::filter::sanitize_search_term;
/// assert_eq!(sanitize_search_term(" toyota,  (camry) "), Some("toyota camry".to_string()));
/// assert_eq!(sanitize_search_term("***"), None);
/// ```
pub fn sanitize_search_term(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .map(|c| if RESERVED_FILTER_CHARS.contains(&c) { ' ' } else { c })
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sort in place according to `order`.
pub fn sort_listings(listings: &mut [Listing], order: SortOrder) {
    let newest_first = |a: &Listing, b: &Listing| b.created_at.cmp(&a.created_at);
    match order {
        SortOrder::FeaturedFirst => listings.sort_by(|a, b| match b.featured.cmp(&a.featured) {
            Ordering::Equal => newest_first(a, b),
            other => other,
        }),
        SortOrder::NewestFirst => listings.sort_by(newest_first),
    }
}
