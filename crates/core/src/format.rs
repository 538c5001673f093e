//! Display formatting for prices.

/// Format a price the way the storefront shows it: currency label, a space,
/// thousands separators and at most two decimals with trailing zeros trimmed.
///
/// `KES` and `KSH` both render as `KSH`.
///
/// ```
/// use storefront_core::format::format_price;
/// assert_eq!(format_price(3_200_000.0, "KSH"), "KSH 3,200,000");
/// assert_eq!(format_price(1250.5, "usd"), "USD 1,250.5");
/// ```
pub fn format_price(price: f64, currency: &str) -> String {
    format!("{} {}", currency_label(currency), group_amount(price))
}

fn currency_label(currency: &str) -> String {
    let upper = currency.trim().to_ascii_uppercase();
    match upper.as_str() {
        "" | "KES" | "KSH" => "KSH".to_string(),
        _ => upper,
    }
}

fn group_amount(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped}.{}", f / 10),
        f => format!("{sign}{grouped}.{f:02}"),
    }
}
