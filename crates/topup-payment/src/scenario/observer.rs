use std::collections::BTreeMap;

use topup_core::{ExchangeError, form::FormValues, http::Response};
use url::form_urlencoded;

use super::{ScenarioStep, StepData};
use crate::ScenarioError;

/// Field names whose values never reach a log line.
const SENSITIVE_FIELDS: [&str; 5] = ["card_number", "cvv2", "MM", "YY", "pPassword"];
const REDACTED: &str = "***";

/// Side channel receiving every response, every step's parsed data and every step failure.
///
/// Observers never influence control flow. All methods default to doing nothing.
pub trait ScenarioObserver: Send + Sync {
    /// Called with each decoded response before its data is extracted.
    fn on_response(&self, _step: ScenarioStep, _response: &Response) {}

    /// Called once a step has produced its data.
    fn on_data(&self, _step: ScenarioStep, _data: &StepData) {}

    /// Called once with the failure that ends the scenario.
    fn on_error(&self, _step: ScenarioStep, _error: &ScenarioError) {}
}

/// Logs scenario progress through `tracing`, with card and PIN fields redacted.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScenarioObserver for TracingObserver {
    fn on_response(&self, step: ScenarioStep, response: &Response) {
        tracing::debug!(%step, status = %response.status, url = %response.url, "Step response");
    }

    fn on_data(&self, step: ScenarioStep, data: &StepData) {
        match data {
            StepData::Form(form) => tracing::info!(
                %step,
                action = %form.action,
                method = %form.method,
                values = ?redact_values(&form.values),
                "Step form"
            ),
            StepData::Promo { description } => {
                tracing::info!(%step, ?description, "Step promo")
            }
            StepData::Session { session_id } => tracing::info!(%step, %session_id, "Step session"),
            StepData::Confirmation { success } => {
                tracing::info!(%step, success, "Step confirmation")
            }
        }
    }

    fn on_error(&self, step: ScenarioStep, error: &ScenarioError) {
        if let ScenarioError::Exchange {
            source:
                ExchangeError::Status {
                    status,
                    message,
                    url,
                    request_body,
                    headers,
                    body,
                },
            ..
        } = error
        {
            tracing::error!(
                %step,
                %status,
                %url,
                ?headers,
                request_body = ?request_body.as_deref().map(redact_form_body),
                %body,
                "Step failed: {message}"
            );
        } else {
            tracing::error!(%step, "Step failed: {error}");
        }
    }
}

fn is_sensitive(name: &str) -> bool {
    SENSITIVE_FIELDS.contains(&name)
}

fn redact_values(values: &FormValues) -> BTreeMap<&str, String> {
    values
        .iter()
        .map(|(name, value)| {
            let shown = if is_sensitive(name) {
                REDACTED.to_string()
            } else {
                value.to_string()
            };
            (name.as_str(), shown)
        })
        .collect()
}

/// Re-encodes a form body with card and PIN values replaced by `***`.
pub fn redact_form_body(body: &str) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in form_urlencoded::parse(body.as_bytes()) {
        if is_sensitive(&name) {
            serializer.append_pair(&name, REDACTED);
        } else {
            serializer.append_pair(&name, &value);
        }
    }
    serializer.finish()
}
