use topup_core::{
    Client, ExchangeError,
    form::{self, Form},
    http::{Exchange, Response},
};

use super::{ScenarioObserver, ScenarioState, ScenarioStep, StepData, bill, pin};
use crate::ScenarioError;

/// Why a step stopped, before the step is attached.
#[derive(Debug)]
pub(super) enum StepFailure {
    NoData(&'static str),
    NoSession,
    Exchange(ExchangeError),
}

impl From<ExchangeError> for StepFailure {
    fn from(e: ExchangeError) -> Self {
        StepFailure::Exchange(e)
    }
}

impl StepFailure {
    fn at(self, step: ScenarioStep) -> ScenarioError {
        match self {
            StepFailure::NoData(selector) => ScenarioError::NoData {
                step,
                selector: selector.to_string(),
            },
            StepFailure::NoSession => ScenarioError::NoSession { step },
            StepFailure::Exchange(source) => ScenarioError::Exchange { step, source },
        }
    }
}

/// Walks a step table, one exchange per step.
///
/// Each step receives the data produced by the one before it. Data goes to the observer as soon
/// as a step succeeds; the first failure is reported to the observer and ends the run.
pub(crate) struct Scenario<'a> {
    pub(super) client: &'a Client,
    observer: &'a dyn ScenarioObserver,
}

impl<'a> Scenario<'a> {
    pub(crate) fn new(client: &'a Client, observer: &'a dyn ScenarioObserver) -> Self {
        Self { client, observer }
    }

    /// Runs `steps` in order and returns the data of the last one.
    pub(crate) async fn run(
        &self,
        steps: &[ScenarioStep],
        state: &mut ScenarioState,
    ) -> Result<Option<StepData>, ScenarioError> {
        let mut previous = None;

        for &step in steps {
            match self.execute(step, state, previous.take()).await {
                Ok(data) => {
                    self.observer.on_data(step, &data);
                    previous = Some(data);
                }
                Err(failure) => {
                    let error = failure.at(step);
                    self.observer.on_error(step, &error);
                    return Err(error);
                }
            }
        }

        Ok(previous)
    }

    async fn execute(
        &self,
        step: ScenarioStep,
        state: &mut ScenarioState,
        previous: Option<StepData>,
    ) -> Result<StepData, StepFailure> {
        match step {
            ScenarioStep::MerchantForm => bill::merchant_form(self, state).await,
            ScenarioStep::MerchantPromo => bill::merchant_promo(self, state).await,
            ScenarioStep::MerchantPay => bill::merchant_pay(self, state).await,
            ScenarioStep::BankForm => bill::bank_form(self, state, previous_form(previous)?).await,
            ScenarioStep::BankPay => bill::bank_pay(self, state, previous_form(previous)?).await,
            ScenarioStep::BankCheckPin => pin::bank_check_pin(self, state).await,
            ScenarioStep::MerchantConfirm => {
                pin::merchant_confirm(self, previous_form(previous)?).await
            }
            ScenarioStep::MerchantDone => pin::merchant_done(self, previous_form(previous)?).await,
        }
    }

    /// Sends one exchange and hands the response to the observer.
    pub(super) async fn send(
        &self,
        step: ScenarioStep,
        exchange: Exchange,
    ) -> Result<Response, StepFailure> {
        let response = self.client.exchange().send(exchange).await?;
        self.observer.on_response(step, &response);
        Ok(response)
    }
}

fn previous_form(previous: Option<StepData>) -> Result<Form, StepFailure> {
    match previous {
        Some(StepData::Form(form)) => Ok(form),
        _ => Err(StepFailure::NoData("form")),
    }
}

/// Picks the form matching `selector` out of `html`.
pub(super) fn extract_form(html: &str, selector: &'static str) -> Result<Form, StepFailure> {
    form::extract(html, Some(selector)).map_err(|_| StepFailure::NoData(selector))
}
