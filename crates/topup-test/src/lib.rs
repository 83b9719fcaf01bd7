//! Test support for the topup crates: mock merchant and bank hosts, and page fixtures for every
//! scenario step.

mod api;
pub use api::{MockHosts, start_mock};
pub mod fixtures;
