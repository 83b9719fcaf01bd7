//! Phone number normalization and masking.

/// Mask the merchant expects the phone number in.
pub const PHONE_MASK: &str = "+XXX XX XXX XX XX";

const COUNTRY_CODE: &str = "+38";
const DIGITS: usize = 10;

/// Normalizes a Ukrainian mobile number to `+38` followed by ten digits.
///
/// The country code and every non-digit are stripped, the last ten digits are kept and missing
/// digits are filled with `0`.
///
/// ```
/// # use topup_payment::phone::parse_mobile_phone;
/// assert_eq!(parse_mobile_phone("067 123-45-67"), "+380671234567");
/// assert_eq!(parse_mobile_phone("+380671234567"), "+380671234567");
/// ```
pub fn parse_mobile_phone(phone: &str) -> String {
    let phone = phone.trim();
    let rest = phone.strip_prefix(COUNTRY_CODE).unwrap_or(phone);
    let digits: Vec<char> = rest.chars().filter(char::is_ascii_digit).collect();
    let last = &digits[digits.len().saturating_sub(DIGITS)..];

    let mut normalized = String::from(COUNTRY_CODE);
    normalized.extend(last);
    normalized.extend(std::iter::repeat_n('0', DIGITS - last.len()));
    normalized
}

/// Splits `text` into groups as wide as the space separated groups of `mask`.
///
/// ```
/// # use topup_payment::phone::{PHONE_MASK, mask_from};
/// assert_eq!(mask_from("+380671234567", PHONE_MASK), "+380 67 123 45 67");
/// ```
pub fn mask_from(text: &str, mask: &str) -> String {
    let mut chars = text.chars();
    mask.split(' ')
        .map(|group| chars.by_ref().take(group.chars().count()).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
