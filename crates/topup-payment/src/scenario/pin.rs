//! Steps of the PIN confirmation scenario.

use std::sync::LazyLock;

use regex::Regex;
use topup_core::{form::Form, http::Exchange};

use super::{
    ScenarioState, ScenarioStep, StepData,
    engine::{Scenario, StepFailure, extract_form},
};

static PAYMENT_DONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Оплата пройшла успішно").expect("valid regex"));

pub(super) async fn bank_check_pin(
    scenario: &Scenario<'_>,
    state: &ScenarioState,
) -> Result<StepData, StepFailure> {
    let url = scenario.client.bank_url("/pCheckPIN.jsp", None)?;
    let nonce = rand::random::<f64>().to_string();
    let values = [
        ("pPasswordID", ""),
        ("pPassword", state.pin.as_str()),
        ("__rnd", nonce.as_str()),
    ];

    let response = scenario
        .send(ScenarioStep::BankCheckPin, Exchange::post_form(url, values))
        .await?;
    let form = extract_form(&response.text(), "#fPaREs")?;
    Ok(StepData::Form(form))
}

pub(super) async fn merchant_confirm(
    scenario: &Scenario<'_>,
    previous: Form,
) -> Result<StepData, StepFailure> {
    let url = scenario.client.merchant_url(&previous.action, None)?;

    let response = scenario
        .send(
            ScenarioStep::MerchantConfirm,
            Exchange::post_form(url, &previous.values),
        )
        .await?;
    let form = extract_form(&response.text(), "#apiForm")?;
    Ok(StepData::Form(form))
}

pub(super) async fn merchant_done(
    scenario: &Scenario<'_>,
    previous: Form,
) -> Result<StepData, StepFailure> {
    let url = scenario.client.merchant_url(&previous.action, None)?;

    let response = scenario
        .send(
            ScenarioStep::MerchantDone,
            Exchange::post_form(url, &previous.values),
        )
        .await?;
    Ok(StepData::Confirmation {
        success: is_payment_done(&response.text()),
    })
}

fn is_payment_done(text: &str) -> bool {
    PAYMENT_DONE.is_match(text)
}
