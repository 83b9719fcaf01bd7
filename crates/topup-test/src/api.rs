use topup_core::{ClientSettings, Location};
use wiremock::{Mock, MockServer};

/// The two remote hosts of a payment.
pub struct MockHosts {
    #[allow(missing_docs)]
    pub merchant: MockServer,
    #[allow(missing_docs)]
    pub bank: MockServer,
}

/// Starts a merchant and a bank mock and returns settings pointing at them.
///
/// Warning: when using `Mock::expect` ensure the hosts are not dropped before the test completes,
/// expectations are verified on drop.
pub async fn start_mock(
    merchant_mocks: Vec<Mock>,
    bank_mocks: Vec<Mock>,
) -> (MockHosts, ClientSettings) {
    let merchant = MockServer::start().await;
    for mock in merchant_mocks {
        merchant.register(mock).await;
    }

    let bank = MockServer::start().await;
    for mock in bank_mocks {
        bank.register(mock).await;
    }

    let settings = ClientSettings {
        merchant_url: merchant.uri(),
        bank_url: bank.uri(),
        user_agent: "test-agent".to_string(),
        locations: vec![Location {
            name: "Lviv".to_string(),
            lat: 49.8397,
            lng: 24.0297,
        }],
        ..Default::default()
    };

    (MockHosts { merchant, bank }, settings)
}
