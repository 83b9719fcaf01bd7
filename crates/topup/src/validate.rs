//! Argument checks applied before anything is sent to the merchant.
//!
//! Each parser works both as a clap `value_parser` and on prompted input.

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn exact_digits(raw: &str, len: usize, what: &str) -> Result<String, String> {
    if raw.len() == len && all_digits(raw) {
        Ok(raw.to_owned())
    } else {
        Err(format!("{what} must be exactly {len} digits"))
    }
}

pub fn phone(raw: &str) -> Result<String, String> {
    exact_digits(raw, 10, "phone")
}

pub fn pin(raw: &str) -> Result<String, String> {
    if raw.len() >= 6 && all_digits(raw) {
        Ok(raw.to_owned())
    } else {
        Err("PIN must be at least 6 digits".to_owned())
    }
}

pub fn card_number(raw: &str) -> Result<String, String> {
    exact_digits(raw, 16, "card number")
}

pub fn cvv(raw: &str) -> Result<String, String> {
    exact_digits(raw, 3, "CVV")
}

pub fn month(raw: &str) -> Result<String, String> {
    exact_digits(raw, 2, "month")
}

pub fn year(raw: &str) -> Result<String, String> {
    exact_digits(raw, 2, "year")
}

/// Runs `parse` on input that bypassed clap, such as a prompt answer.
pub fn checked(
    raw: String,
    parse: fn(&str) -> Result<String, String>,
) -> color_eyre::eyre::Result<String> {
    parse(&raw).map_err(color_eyre::eyre::Report::msg)
}
