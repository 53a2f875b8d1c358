use crate::domain::phone::COUNTRY_CODE;

pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Builds the direct-message link for a normalized number.
///
/// The country code is always `91`, whatever the normalizer stripped. Digits
/// of any length produce a link; only an empty string yields no link.
pub fn whatsapp_link(digits: &str) -> String {
    if digits.is_empty() {
        return String::new();
    }
    let mut out =
        String::with_capacity(WHATSAPP_BASE_URL.len() + COUNTRY_CODE.len() + digits.len());
    out.push_str(WHATSAPP_BASE_URL);
    out.push_str(COUNTRY_CODE);
    out.push_str(digits);
    out
}
