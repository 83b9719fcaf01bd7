#![doc = include_str!("../README.md")]

pub mod client;
mod error;
pub mod form;
pub mod http;

pub use client::{Client, ClientSettings, Location, Payee};
pub use error::ExchangeError;
