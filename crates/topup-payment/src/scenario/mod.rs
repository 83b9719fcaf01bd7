//! The fixed step sequences and the engine that walks them.

use std::fmt;

use serde::Serialize;
use topup_core::form::Form;

mod bill;
mod engine;
mod observer;
mod pin;
mod state;

pub(crate) use engine::Scenario;
pub use observer::{ScenarioObserver, TracingObserver, redact_form_body};
pub(crate) use state::ScenarioState;

/// One HTTP exchange of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioStep {
    /// GET the merchant order page and read `#ptm-form`.
    MerchantForm,
    /// POST the promo check, may override the payment description.
    MerchantPromo,
    /// POST the payment and read `#apiForm` from the JSON wrapped fragment.
    MerchantPay,
    /// POST to the bank and read `#form_send`.
    BankForm,
    /// POST the bank payload and read the session id.
    BankPay,
    /// POST the PIN and read `#fPaREs`.
    BankCheckPin,
    /// POST the bank result to the merchant and read `#apiForm`.
    MerchantConfirm,
    /// POST the confirmation and look for the success phrase.
    MerchantDone,
}

impl ScenarioStep {
    /// Stable kebab-case name used in logs.
    pub fn alias(&self) -> &'static str {
        match self {
            ScenarioStep::MerchantForm => "merchant-form",
            ScenarioStep::MerchantPromo => "merchant-promo",
            ScenarioStep::MerchantPay => "merchant-pay",
            ScenarioStep::BankForm => "bank-form",
            ScenarioStep::BankPay => "bank-pay",
            ScenarioStep::BankCheckPin => "bank-check-pin",
            ScenarioStep::MerchantConfirm => "merchant-confirm",
            ScenarioStep::MerchantDone => "merchant-done",
        }
    }
}

impl fmt::Display for ScenarioStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// Billing sequence, strictly linear.
pub const BILL_STEPS: [ScenarioStep; 5] = [
    ScenarioStep::MerchantForm,
    ScenarioStep::MerchantPromo,
    ScenarioStep::MerchantPay,
    ScenarioStep::BankForm,
    ScenarioStep::BankPay,
];

/// PIN confirmation sequence, strictly linear.
pub const PIN_STEPS: [ScenarioStep; 3] = [
    ScenarioStep::BankCheckPin,
    ScenarioStep::MerchantConfirm,
    ScenarioStep::MerchantDone,
];

/// What a step hands to the next one, and to the observer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepData {
    /// A form to post next.
    Form(Form),
    /// Result of the promo check.
    Promo {
        #[allow(missing_docs)]
        description: Option<String>,
    },
    /// The bank session id.
    Session {
        #[allow(missing_docs)]
        session_id: String,
    },
    /// Whether the merchant reported success.
    Confirmation {
        #[allow(missing_docs)]
        success: bool,
    },
}

impl StepData {
    /// The carried form, if any.
    pub fn form(&self) -> Option<&Form> {
        match self {
            StepData::Form(form) => Some(form),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_match_serde_names() {
        for step in BILL_STEPS.iter().chain(PIN_STEPS.iter()) {
            let json = serde_json::to_value(step).unwrap();
            assert_eq!(json, step.alias());
            assert_eq!(step.to_string(), step.alias());
        }
    }

    #[test]
    fn test_step_tables() {
        assert_eq!(BILL_STEPS.first(), Some(&ScenarioStep::MerchantForm));
        assert_eq!(BILL_STEPS.last(), Some(&ScenarioStep::BankPay));
        assert_eq!(PIN_STEPS.last(), Some(&ScenarioStep::MerchantDone));
    }
}
