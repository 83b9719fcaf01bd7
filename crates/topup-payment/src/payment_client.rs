use std::sync::Arc;

use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use topup_core::{
    Client, Location,
    form::{AttrValue, FormValues},
};
use topup_crypto::md5_hex;
use topup_vault::{CardClientExt, CardRecord, CardSource};

use crate::{
    ScenarioError,
    phone::{PHONE_MASK, mask_from, parse_mobile_phone},
    scenario::{
        BILL_STEPS, PIN_STEPS, Scenario, ScenarioObserver, ScenarioState, ScenarioStep, StepData,
        TracingObserver,
    },
};

const DESCRIPTION_DIGITS: usize = 9;

/// A mobile bill top-up.
#[derive(Debug, Clone)]
pub struct BillRequest {
    /// Currency code, upper-cased before sending.
    pub currency: String,
    /// Amount in whole currency units.
    pub amount: u64,
    /// The phone number to top up, in any common notation.
    pub phone: String,
    #[allow(missing_docs)]
    pub card: CardSource,
}

impl BillRequest {
    /// A request in `UAH`.
    pub fn new(amount: u64, phone: impl Into<String>, card: CardSource) -> Self {
        Self {
            currency: "UAH".to_string(),
            amount,
            phone: phone.into(),
            card,
        }
    }
}

/// A bill that reached the bank session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOutcome {
    /// Bank session identifier, needed for the PIN confirmation.
    pub session_id: String,
    /// The location whose coordinates were sent to the bank.
    pub location: Location,
}

/// Runs the billing and PIN confirmation scenarios.
///
/// Both scenarios share the cookie jar of the [Client] they were created from, so
/// [PaymentClient::check_pin] must run on a clone of the client that ran the bill.
pub struct PaymentClient {
    client: Client,
    observer: Arc<dyn ScenarioObserver>,
}

impl PaymentClient {
    fn new(client: Client) -> Self {
        Self {
            client,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the default [TracingObserver].
    pub fn with_observer(mut self, observer: Arc<dyn ScenarioObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Walks the billing scenario up to the bank session.
    ///
    /// The card is resolved before anything is sent; an auth key that cannot be loaded ends the
    /// call with [ScenarioError::Card].
    pub async fn bill(&self, request: BillRequest) -> Result<BillOutcome, ScenarioError> {
        let BillRequest {
            currency,
            amount,
            phone,
            card,
        } = request;
        let card = self.client.cards().resolve(card).await?;
        let location = self
            .client
            .settings()
            .locations
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(ScenarioError::NoLocation)?;

        let phone = parse_mobile_phone(&phone);
        let fingerprint = md5_hex(Utc::now().timestamp_millis().to_string());

        let merchant = self.merchant_values(&card, &currency, amount, &phone, &fingerprint);
        let bank = bank_values(&location, &fingerprint);
        let mut state = ScenarioState::for_bill(merchant, bank, phone, amount);

        tracing::info!(
            card = %card.card_number_mask,
            amount,
            location = %location.name,
            "Starting bill"
        );

        match self.scenario().run(&BILL_STEPS, &mut state).await? {
            Some(StepData::Session { session_id }) => Ok(BillOutcome {
                session_id,
                location,
            }),
            _ => Err(ScenarioError::NoSession {
                step: ScenarioStep::BankPay,
            }),
        }
    }

    /// Walks the PIN confirmation scenario for the bill started on this client's jar.
    ///
    /// Fails with [ScenarioError::NotConfirmed] when the merchant did not report success.
    pub async fn check_pin(&self, pin: &str) -> Result<(), ScenarioError> {
        let mut state = ScenarioState::for_pin(pin);

        match self.scenario().run(&PIN_STEPS, &mut state).await? {
            Some(StepData::Confirmation { success: true }) => Ok(()),
            _ => Err(ScenarioError::NotConfirmed),
        }
    }

    fn scenario(&self) -> Scenario<'_> {
        Scenario::new(&self.client, self.observer.as_ref())
    }

    fn merchant_values(
        &self,
        card: &CardRecord,
        currency: &str,
        amount: u64,
        phone: &str,
        fingerprint: &str,
    ) -> FormValues {
        let settings = self.client.settings();
        let mut values = FormValues::new();
        let mut set = |name: &str, value: AttrValue| {
            values.insert(name.to_string(), value);
        };

        set("payee_id", settings.payee.payee_id.as_str().into());
        set("attribute1", settings.payee.attribute1.as_str().into());
        set("format", settings.payee.format.as_str().into());
        for (name, value) in card.fields() {
            set(name, value.into());
        }
        set(
            "bill_amount",
            i64::try_from(amount)
                .map_or_else(|_| AttrValue::Text(amount.to_string()), AttrValue::Int),
        );
        set("currencyAPay", currency.to_uppercase().into());
        set("phone", mask_from(phone, PHONE_MASK).into());
        set("description", last_digits(phone, DESCRIPTION_DIGITS).into());
        set("fp", fingerprint.into());
        set("lang", settings.lang.as_str().into());

        values
    }
}

fn bank_values(location: &Location, fingerprint: &str) -> FormValues {
    FormValues::from([
        ("lat".to_string(), AttrValue::Text(location.lat.to_string())),
        ("lng".to_string(), AttrValue::Text(location.lng.to_string())),
        ("fp".to_string(), AttrValue::Text(md5_hex(fingerprint))),
    ])
}

fn last_digits(phone: &str, count: usize) -> String {
    let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
    digits[digits.len().saturating_sub(count)..].iter().collect()
}

#[allow(missing_docs)]
pub trait PaymentClientExt {
    fn payments(&self) -> PaymentClient;
}

impl PaymentClientExt for Client {
    fn payments(&self) -> PaymentClient {
        PaymentClient::new(self.clone())
    }
}
