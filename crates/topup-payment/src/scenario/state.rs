use topup_core::form::{AttrValue, FormValues};
use zeroize::{Zeroize, Zeroizing};

/// Accumulators carried across the steps of one scenario invocation.
///
/// Merchant and bank payloads hold card fields, their text is wiped on drop.
pub(crate) struct ScenarioState {
    pub merchant: FormValues,
    pub bank: FormValues,
    /// Normalized phone, sent with the promo check.
    pub phone: String,
    pub amount: u64,
    pub pin: Zeroizing<String>,
}

impl ScenarioState {
    pub(crate) fn for_bill(
        merchant: FormValues,
        bank: FormValues,
        phone: String,
        amount: u64,
    ) -> Self {
        Self {
            merchant,
            bank,
            phone,
            amount,
            pin: Zeroizing::default(),
        }
    }

    pub(crate) fn for_pin(pin: &str) -> Self {
        Self {
            merchant: FormValues::new(),
            bank: FormValues::new(),
            phone: String::new(),
            amount: 0,
            pin: Zeroizing::new(pin.to_string()),
        }
    }
}

impl Drop for ScenarioState {
    fn drop(&mut self) {
        for value in self.merchant.values_mut().chain(self.bank.values_mut()) {
            if let AttrValue::Text(text) = value {
                text.zeroize();
            }
        }
    }
}
