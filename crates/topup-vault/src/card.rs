use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const PAN_LEN: usize = 16;
const CVV_LEN: usize = 3;
const MONTH_LEN: usize = 2;
const YEAR_LEN: usize = 2;

/// Total digits of a packed card, PAN ‖ CVV ‖ MM ‖ YY.
pub(crate) const CARD_DIGITS: usize = PAN_LEN + CVV_LEN + MONTH_LEN + YEAR_LEN;

/// Card fields as posted to the merchant.
///
/// Serializes with the merchant's field names. `Debug` only ever shows the masked number.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CardRecord {
    /// 16 digit primary account number.
    pub card_number: String,
    /// 3 digit security code.
    #[serde(rename = "cvv2")]
    pub cvv: String,
    /// Expiry month, two digits.
    #[serde(rename = "MM")]
    pub month: String,
    /// Expiry year, two digits.
    #[serde(rename = "YY")]
    pub year: String,
    /// `NNNN NNNN NNNN NNNN`, derived from the card number when empty.
    #[serde(default)]
    pub card_number_mask: String,
}

impl CardRecord {
    #[allow(missing_docs)]
    pub fn new(
        card_number: impl Into<String>,
        cvv: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        let card_number = card_number.into();
        Self {
            card_number_mask: mask_card_number(&card_number),
            card_number,
            cvv: cvv.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    /// Fills `card_number_mask` when it was not provided.
    pub fn with_mask(mut self) -> Self {
        if self.card_number_mask.is_empty() {
            self.card_number_mask = mask_card_number(&self.card_number);
        }
        self
    }

    /// Whether every field holds exactly its expected number of ASCII digits.
    pub fn is_well_formed(&self) -> bool {
        [
            (&self.card_number, PAN_LEN),
            (&self.cvv, CVV_LEN),
            (&self.month, MONTH_LEN),
            (&self.year, YEAR_LEN),
        ]
        .into_iter()
        .all(|(field, len)| field.len() == len && field.bytes().all(|b| b.is_ascii_digit()))
    }

    /// All digits in packing order.
    pub fn digits(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "{}{}{}{}",
            self.card_number, self.cvv, self.month, self.year
        ))
    }

    /// Splits a 23 digit string back into its fields.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.len() != CARD_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let (card_number, rest) = digits.split_at(PAN_LEN);
        let (cvv, rest) = rest.split_at(CVV_LEN);
        let (month, year) = rest.split_at(MONTH_LEN);

        Some(Self::new(card_number, cvv, month, year))
    }

    /// Field name to value pairs in the merchant's naming.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("card_number", self.card_number.as_str()),
            ("cvv2", self.cvv.as_str()),
            ("MM", self.month.as_str()),
            ("YY", self.year.as_str()),
            ("card_number_mask", self.card_number_mask.as_str()),
        ]
    }
}

impl fmt::Debug for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRecord")
            .field("card_number_mask", &self.card_number_mask)
            .finish_non_exhaustive()
    }
}

/// Where the card used for a payment comes from.
#[derive(Debug, Clone)]
pub enum CardSource {
    /// Card fields given directly.
    Card(CardRecord),
    /// An auth key returned by an earlier encode.
    AuthKey(String),
}

/// Groups the digits of a card number by four: `4111111111111111` → `4111 1111 1111 1111`.
/// A trailing group shorter than four digits is dropped.
pub fn mask_card_number(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    digits
        .chunks_exact(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(mask_card_number("123456"), "1234");
        assert_eq!(mask_card_number(""), "");
    }

    #[test]
    fn test_digits_and_back() {
        let card = CardRecord::new("5168000011112222", "007", "01", "30");
        assert_eq!(card.digits().as_str(), "51680000111122220070130");

        let restored = CardRecord::from_digits(&card.digits()).unwrap();
        assert_eq!(restored, card);
        assert_eq!(restored.card_number_mask, "5168 0000 1111 2222");
    }

    #[test]
    fn test_from_digits_rejects_bad_layout() {
        assert!(CardRecord::from_digits("123").is_none());
        assert!(CardRecord::from_digits("5168000011112222007013x").is_none());
    }

    #[test]
    fn test_is_well_formed() {
        assert!(CardRecord::new("4111111111111111", "123", "09", "27").is_well_formed());
        // right total length, wrong split
        assert!(!CardRecord::new("411111111111111", "1234", "09", "27").is_well_formed());
        assert!(!CardRecord::new("4111 1111 1111 1111", "123", "09", "27").is_well_formed());
        assert!(!CardRecord::new("4111111111111111", "12a", "09", "27").is_well_formed());
        assert!(!CardRecord::new("", "", "", "").is_well_formed());
    }

    #[test]
    fn test_serde_uses_merchant_names() {
        let card: CardRecord = serde_json::from_str(
            r#"{"card_number":"4111111111111111","cvv2":"123","MM":"09","YY":"27"}"#,
        )
        .unwrap();
        let card = card.with_mask();

        assert_eq!(card.cvv, "123");
        assert_eq!(card.month, "09");
        assert_eq!(card.card_number_mask, "4111 1111 1111 1111");

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["cvv2"], "123");
        assert_eq!(json["YY"], "27");
    }

    #[test]
    fn test_debug_hides_card_number() {
        let card = CardRecord::new("4111111111111111", "123", "09", "27");
        let debug = format!("{card:?}");
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123"));
        assert!(debug.contains("4111 1111 1111 1111"));
    }
}
