use serde::Serialize;
use topup_cli::secret_prompt_when_none;
use topup_core::Client;
use topup_payment::{BillOutcome, BillRequest, PaymentClientExt};

use crate::{
    command::{BillArgs, PinArgs},
    render::{CommandOutput, CommandResult},
    validate,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BillReport {
    #[serde(flatten)]
    outcome: BillOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<bool>,
}

impl BillArgs {
    pub async fn run(self, client: &Client) -> CommandResult {
        let card = self.card.into_source()?;
        let payments = client.payments();

        let outcome = payments
            .bill(BillRequest {
                currency: self.currency,
                amount: self.amount,
                phone: self.phone,
                card,
            })
            .await?;

        let confirmed = if self.confirm {
            let pin = validate::checked(secret_prompt_when_none("PIN", self.pin)?, validate::pin)?;
            payments.check_pin(&pin).await?;
            Some(true)
        } else {
            None
        };

        Ok(CommandOutput::Object(Box::new(BillReport { outcome, confirmed })))
    }
}

impl PinArgs {
    pub async fn run(self, client: &Client) -> CommandResult {
        let pin = validate::checked(secret_prompt_when_none("PIN", self.pin)?, validate::pin)?;
        client.payments().check_pin(&pin).await?;
        Ok("Payment confirmed".into())
    }
}
