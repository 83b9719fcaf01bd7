use thiserror::Error;
use topup_core::ExchangeError;
use topup_vault::CardError;

use crate::ScenarioStep;

/// The single failure a scenario invocation ends with.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The expected form was not in the response.
    #[allow(missing_docs)]
    #[error("No data at {step}: {selector} not found")]
    NoData {
        step: ScenarioStep,
        selector: String,
    },

    /// The final bank step produced no session id.
    #[allow(missing_docs)]
    #[error("No session id at {step}")]
    NoSession { step: ScenarioStep },

    /// Transport failure or a status of 400 and above.
    #[allow(missing_docs)]
    #[error("Exchange failed at {step}: {source}")]
    Exchange {
        step: ScenarioStep,
        #[source]
        source: ExchangeError,
    },

    /// The merchant did not report the payment as done.
    #[error("Payment was not confirmed")]
    NotConfirmed,

    /// No location configured for the bank-side coordinates.
    #[error("No locations configured")]
    NoLocation,

    #[allow(missing_docs)]
    #[error(transparent)]
    Card(#[from] CardError),
}

impl ScenarioError {
    /// The step that failed, if the failure happened inside the step sequence.
    pub fn step(&self) -> Option<ScenarioStep> {
        match self {
            ScenarioError::NoData { step, .. }
            | ScenarioError::NoSession { step }
            | ScenarioError::Exchange { step, .. } => Some(*step),
            ScenarioError::NotConfirmed => Some(ScenarioStep::MerchantDone),
            ScenarioError::NoLocation | ScenarioError::Card(_) => None,
        }
    }
}
