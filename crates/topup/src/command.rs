use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use topup_cli::{Color, secret_prompt_when_none, text_prompt_when_none};
use topup_vault::{CardRecord, CardSource};

use crate::{render::Output, validate};

pub const CONFIG_ENV: &str = "TOPUP_CONFIG";
pub const AUTH_KEY_ENV: &str = "TOPUP_AUTH_KEY";
pub const PIN_ENV: &str = "TOPUP_PIN";

#[derive(Parser, Clone)]
#[command(name = "topup", version, about = "Mobile bill top-up", long_about = None)]
pub struct Cli {
    // Optional as a workaround for https://github.com/clap-rs/clap/issues/3572
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'o', long, global = true, value_enum, default_value_t = Output::JSON)]
    pub output: Output,

    #[arg(short = 'c', long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    #[arg(
        long,
        global = true,
        env = CONFIG_ENV,
        help = "JSON settings file. Defaults apply when omitted."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        global = true,
        help = "Don't return anything to stdout."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(long_about = "Pay a mobile bill up to the bank session, optionally confirming it with the PIN.")]
    Bill(BillArgs),

    #[command(
        long_about = "Confirm a payment with the PIN. The bank session is taken from the cookies in the settings file."
    )]
    Pin(PinArgs),

    #[command(long_about = "Store card data in the cache directory and print the auth key.")]
    Encode(EncodeArgs),

    #[command(long_about = "Load card data stored under an auth key.")]
    Decode(DecodeArgs),
}

#[derive(Args, Clone)]
pub struct BillArgs {
    #[arg(
        long,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Amount in whole currency units"
    )]
    pub amount: u64,

    #[arg(long, value_parser = validate::phone, help = "Phone number to top up, 10 digits")]
    pub phone: String,

    #[arg(long, default_value = "UAH")]
    pub currency: String,

    #[command(flatten)]
    pub card: CardArgs,

    #[arg(long, help = "Ask for the PIN and confirm in the same session")]
    pub confirm: bool,

    #[arg(long, requires = "confirm", value_parser = validate::pin)]
    pub pin: Option<String>,
}

#[derive(Args, Clone)]
pub struct PinArgs {
    #[arg(long, env = PIN_ENV, hide_env_values = true, value_parser = validate::pin)]
    pub pin: Option<String>,
}

#[derive(Args, Clone)]
pub struct CardArgs {
    #[arg(
        long,
        env = AUTH_KEY_ENV,
        hide_env_values = true,
        conflicts_with = "card_number",
        help = "Auth key returned by `topup encode`"
    )]
    pub auth_key: Option<String>,

    #[command(flatten)]
    pub fields: CardFields,
}

#[derive(Args, Clone)]
pub struct CardFields {
    #[arg(long, value_parser = validate::card_number)]
    pub card_number: Option<String>,

    #[arg(long, value_parser = validate::cvv)]
    pub cvv: Option<String>,

    #[arg(long, value_parser = validate::month, help = "Expiry month, two digits")]
    pub month: Option<String>,

    #[arg(long, value_parser = validate::year, help = "Expiry year, two digits")]
    pub year: Option<String>,
}

#[derive(Args, Clone)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub fields: CardFields,
}

#[derive(Args, Clone)]
pub struct DecodeArgs {
    #[arg(env = AUTH_KEY_ENV, hide_env_values = true)]
    pub auth_key: Option<String>,

    #[arg(long, help = "Print every card field instead of the masked number")]
    pub reveal: bool,
}

impl CardFields {
    /// Prompts for the fields not given on the command line. Prompted values get the same
    /// checks as flags.
    pub fn into_record(self) -> Result<CardRecord> {
        let card_number = validate::checked(
            text_prompt_when_none("Card number", self.card_number)?,
            validate::card_number,
        )?;
        let cvv = validate::checked(secret_prompt_when_none("CVV", self.cvv)?, validate::cvv)?;
        let month = validate::checked(
            text_prompt_when_none("Expiry month (MM)", self.month)?,
            validate::month,
        )?;
        let year = validate::checked(
            text_prompt_when_none("Expiry year (YY)", self.year)?,
            validate::year,
        )?;

        Ok(CardRecord::new(card_number, cvv, month, year))
    }
}

impl CardArgs {
    pub fn into_source(self) -> Result<CardSource> {
        Ok(match self.auth_key {
            Some(auth_key) => CardSource::AuthKey(auth_key),
            None => CardSource::Card(self.fields.into_record()?),
        })
    }
}
