use serde_json::json;
use topup_cli::secret_prompt_when_none;
use topup_core::Client;
use topup_vault::CardClientExt;

use crate::{
    command::{DecodeArgs, EncodeArgs},
    render::{CommandOutput, CommandResult},
};

impl EncodeArgs {
    pub async fn run(self, client: &Client) -> CommandResult {
        let card = self.fields.into_record()?;
        let encoded = client.cards().encode(&card).await?;

        Ok(CommandOutput::Object(Box::new(json!({
            "authKey": encoded.auth_key,
            "path": encoded.path,
        }))))
    }
}

impl DecodeArgs {
    pub async fn run(self, client: &Client) -> CommandResult {
        let auth_key = secret_prompt_when_none("Auth key", self.auth_key)?;
        let card = client.cards().decode(&auth_key).await?;

        Ok(if self.reveal {
            CommandOutput::Object(Box::new(card))
        } else {
            card.card_number_mask.clone().into()
        })
    }
}
