//! Topup client

#[allow(clippy::module_inception)]
mod client;
pub mod client_settings;

pub use client::{Client, InternalClient, build_url};
pub use client_settings::{ClientSettings, DEFAULT_USER_AGENT, Location, Payee};
