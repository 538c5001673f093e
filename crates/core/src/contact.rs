//! Buyer-to-seller contact links.

use crate::format::format_price;
use crate::listing::Listing;

const WHATSAPP_BASE: &str = "https://wa.me";

/// The pre-filled enquiry a buyer sends about a listing.
pub fn enquiry_message(listing: &Listing) -> String {
    format!(
        "Hi! I'm interested in the {} listed for {}. Could you provide more information?",
        listing.title,
        format_price(listing.price, &listing.currency)
    )
}

/// Build a `wa.me` click-to-chat link for the listing's contact number with
/// the enquiry message pre-filled and percent-encoded (spaces become `%20`,
/// never `+`). Returns `None` when the listing carries no usable number.
pub fn whatsapp_link(listing: &Listing) -> Option<String> {
    let digits: String = listing
        .whatsapp_number
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }

    let message = enquiry_message(listing);
    Some(format!(
        "{WHATSAPP_BASE}/{digits}?text={}",
        urlencoding::encode(&message)
    ))
}
