#![doc = include_str!("../README.md")]

mod error;
pub use error::ScenarioError;
mod payment_client;
pub use payment_client::{BillOutcome, BillRequest, PaymentClient, PaymentClientExt};
pub mod phone;
pub mod scenario;
pub use scenario::{ScenarioObserver, ScenarioStep, StepData, TracingObserver};
