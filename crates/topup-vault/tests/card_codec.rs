use topup_core::{Client, ClientSettings};
use topup_crypto::md5_hex;
use topup_vault::{CardClientExt, CardError, CardRecord, CardSource};

fn client(cache_dir: &std::path::Path) -> Client {
    Client::new(Some(ClientSettings {
        cache_dir: cache_dir.to_path_buf(),
        ..Default::default()
    }))
    .unwrap()
}

#[tokio::test]
async fn test_encode_then_decode() {
    let dir = tempfile::tempdir().unwrap();
    let cards = client(dir.path()).cards();

    let card: CardRecord = serde_json::from_str(
        r#"{"card_number":"4111111111111111","cvv2":"123","MM":"09","YY":"27"}"#,
    )
    .unwrap();

    let encoded = cards.encode(&card).await.unwrap();
    assert_eq!(encoded.auth_key.len(), 32);
    assert_eq!(
        encoded.path.as_deref(),
        Some(dir.path().join(md5_hex(&encoded.auth_key)).as_path())
    );

    let decoded = cards.decode(&encoded.auth_key).await.unwrap();
    assert_eq!(decoded.card_number_mask, "4111 1111 1111 1111");
    assert_eq!(decoded.card_number, "4111111111111111");
    assert_eq!(decoded.cvv, "123");
    assert_eq!(decoded.month, "09");
    assert_eq!(decoded.year, "27");
}

#[tokio::test]
async fn test_leading_zeros_survive() {
    let dir = tempfile::tempdir().unwrap();
    let cards = client(dir.path()).cards();
    let card = CardRecord::new("0000000000000001", "001", "01", "00");

    let encoded = cards.encode(&card).await.unwrap();
    assert_eq!(cards.decode(&encoded.auth_key).await.unwrap(), card);
}

#[tokio::test]
async fn test_each_encode_uses_a_new_key() {
    let dir = tempfile::tempdir().unwrap();
    let cards = client(dir.path()).cards();
    let card = CardRecord::new("4111111111111111", "123", "09", "27");

    let first = cards.encode(&card).await.unwrap();
    let second = cards.encode(&card).await.unwrap();
    assert_ne!(first.auth_key, second.auth_key);
    assert_ne!(first.path, second.path);
}

#[tokio::test]
async fn test_unknown_or_tampered_key_cannot_load() {
    let dir = tempfile::tempdir().unwrap();
    let cards = client(dir.path()).cards();
    let card = CardRecord::new("4111111111111111", "123", "09", "27");

    assert!(matches!(
        cards.decode("no-such-key").await,
        Err(CardError::CannotLoad)
    ));

    let encoded = cards.encode(&card).await.unwrap();
    let path = encoded.path.unwrap();
    let mut blob = std::fs::read(&path).unwrap();
    let last = blob.len() - 1;
    blob[last] ^= 0xFF;
    std::fs::write(&path, blob).unwrap();

    assert!(matches!(
        cards.decode(&encoded.auth_key).await,
        Err(CardError::CannotLoad)
    ));
}

#[tokio::test]
async fn test_unwritable_cache_still_returns_key() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let cards = client(&blocker.join("cache")).cards();

    let encoded = cards
        .encode(&CardRecord::new("4111111111111111", "123", "09", "27"))
        .await
        .unwrap();

    assert_eq!(encoded.auth_key.len(), 32);
    assert!(encoded.path.is_none());
}

#[tokio::test]
async fn test_resolve_sources() {
    let dir = tempfile::tempdir().unwrap();
    let cards = client(dir.path()).cards();

    let mut card = CardRecord::new("4111111111111111", "123", "09", "27");
    card.card_number_mask.clear();
    let resolved = cards.resolve(CardSource::Card(card)).await.unwrap();
    assert_eq!(resolved.card_number_mask, "4111 1111 1111 1111");

    assert!(matches!(
        cards.resolve(CardSource::AuthKey(String::new())).await,
        Err(CardError::MissingAuthKey)
    ));
}

#[tokio::test]
async fn test_encode_rejects_malformed_card() {
    let dir = tempfile::tempdir().unwrap();
    let cards = client(dir.path()).cards();

    let oversized = CardRecord::new("4".repeat(4096), "123", "09", "27");
    assert!(matches!(
        cards.encode(&oversized).await,
        Err(CardError::InvalidCard)
    ));
    assert!(matches!(
        cards.encode(&CardRecord::new("4111111111111111", "1", "9", "2027")).await,
        Err(CardError::InvalidCard)
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
