//! Steps of the billing scenario.

use std::sync::LazyLock;

use regex::Regex;
use topup_core::{
    form::{AttrValue, Form},
    http::{Exchange, Response, host_key},
};

use super::{
    ScenarioState, ScenarioStep, StepData,
    engine::{Scenario, StepFailure, extract_form},
};

static SESSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)jsessionid=([0-9a-z]+)").expect("valid regex"));

pub(super) async fn merchant_form(
    scenario: &Scenario<'_>,
    state: &mut ScenarioState,
) -> Result<StepData, StepFailure> {
    let settings = scenario.client.settings();
    let params = [
        ("amount", state.amount.to_string()),
        ("shop_site_id", settings.shop_site_id.to_string()),
        ("lang", settings.lang.clone()),
        ("entity", "phone".to_string()),
    ];
    let url = scenario
        .client
        .merchant_url("/r3/new-kyivstar/", Some(&params))?;

    let response = scenario
        .send(ScenarioStep::MerchantForm, Exchange::get(url))
        .await?;
    let form = extract_form(&response.text(), "#ptm-form")?;

    state.merchant.extend(form.values.clone());
    Ok(StepData::Form(form))
}

pub(super) async fn merchant_promo(
    scenario: &Scenario<'_>,
    state: &mut ScenarioState,
) -> Result<StepData, StepFailure> {
    let payee = &scenario.client.settings().payee;
    let values = [
        ("description", state.phone.as_str()),
        ("payee_id", payee.payee_id.as_str()),
        ("attribute1", payee.attribute1.as_str()),
        ("format", payee.format.as_str()),
    ];
    let url = scenario
        .client
        .merchant_url("/r3/secure/check/kyivstar-promo", None)?;

    let response = scenario
        .send(
            ScenarioStep::MerchantPromo,
            Exchange::post_form(url, values).xhr(),
        )
        .await?;

    let description = response
        .body
        .field_str("response.description")
        .filter(|description| !description.is_empty())
        .map(str::to_string);
    if let Some(description) = &description {
        state
            .merchant
            .insert("description".to_string(), AttrValue::from(description.as_str()));
    }

    Ok(StepData::Promo { description })
}

pub(super) async fn merchant_pay(
    scenario: &Scenario<'_>,
    state: &mut ScenarioState,
) -> Result<StepData, StepFailure> {
    let url = scenario
        .client
        .merchant_url("/r3/secure/pay/do-payment", None)?;

    let response = scenario
        .send(
            ScenarioStep::MerchantPay,
            Exchange::post_form(url, &state.merchant),
        )
        .await?;

    // The form arrives as an HTML fragment inside the JSON answer.
    let form = match response.body.field_str("response.form") {
        Some(html) => extract_form(html, "#apiForm")?,
        None => extract_form(&response.text(), "#apiForm")?,
    };
    Ok(StepData::Form(form))
}

pub(super) async fn bank_form(
    scenario: &Scenario<'_>,
    state: &mut ScenarioState,
    previous: Form,
) -> Result<StepData, StepFailure> {
    let url = scenario.client.bank_url(&previous.action, None)?;

    let response = scenario
        .send(
            ScenarioStep::BankForm,
            Exchange::post_form(url, &previous.values),
        )
        .await?;
    let form = extract_form(&response.text(), "#form_send")?;

    // Fields set before the scenario started win over the extracted ones.
    let mut bank = form.values.clone();
    bank.extend(std::mem::take(&mut state.bank));
    state.bank = bank;

    Ok(StepData::Form(form))
}

pub(super) async fn bank_pay(
    scenario: &Scenario<'_>,
    state: &mut ScenarioState,
    previous: Form,
) -> Result<StepData, StepFailure> {
    let url = scenario.client.bank_url(&previous.action, None)?;

    let response = scenario
        .send(ScenarioStep::BankPay, Exchange::post_form(url, &state.bank))
        .await?;

    let session_id = session_id(scenario, &response)
        .await
        .ok_or(StepFailure::NoSession)?;
    Ok(StepData::Session { session_id })
}

fn find_session_id(text: &str) -> Option<String> {
    SESSION_ID
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Looks for the session id in the response cookies, then the body, then the jar.
async fn session_id(scenario: &Scenario<'_>, response: &Response) -> Option<String> {
    if let Some(id) = find_session_id(&response.set_cookie_lines().join(";")) {
        return Some(id);
    }
    if let Some(id) = find_session_id(&response.text()) {
        return Some(id);
    }

    let host = host_key(&response.url)?;
    match scenario.client.exchange().cookie_store().header_value(&host).await {
        Ok(stored) => stored.as_deref().and_then(find_session_id),
        Err(e) => {
            tracing::warn!(%host, "Failed to read stored cookies: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_session_id() {
        assert_eq!(
            find_session_id("JSESSIONID=AbC123; Path=/; HttpOnly").as_deref(),
            Some("AbC123")
        );
        assert_eq!(
            find_session_id("<a href=\"/pay;jsessionid=0f9e\">").as_deref(),
            Some("0f9e")
        );
        assert_eq!(find_session_id("SID=1; other=2"), None);
        assert_eq!(find_session_id("jsessionid=;"), None);
    }
}
