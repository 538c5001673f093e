//! Translation of [`ListingQuery`] into REST filter parameters.
//!
//! The REST surface takes one query parameter per column filter
//! (`column=operator.value`); repeating a column ANDs the conditions.

use storefront_core::filter::{ListingQuery, SortOrder};

/// Query-string pairs selecting the listings described by `query`.
pub fn listing_params(query: &ListingQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];

    if let Some(listing_type) = query.listing_type {
        params.push(("type", format!("eq.{}", listing_type.as_str())));
    }
    if let Some(status) = query.status {
        params.push(("status", format!("eq.{}", status.as_str())));
    }
    if query.featured_only {
        params.push(("featured", "eq.true".to_string()));
    }
    if let Some(location) = &query.location {
        params.push(("location", format!("ilike.*{location}*")));
    }
    if let Some(text) = &query.text {
        params.push((
            "or",
            format!("(title.ilike.*{text}*,description.ilike.*{text}*)"),
        ));
    }
    if let Some(min) = query.price.min {
        params.push(("price", format!("gte.{min}")));
    }
    if let Some(max) = query.price.max {
        params.push(("price", format!("lte.{max}")));
    }

    params.push(("order", order_clause(query.order).to_string()));
    params
}

fn order_clause(order: SortOrder) -> &'static str {
    match order {
        SortOrder::FeaturedFirst => "featured.desc,created_at.desc",
        SortOrder::NewestFirst => "created_at.desc",
    }
}
