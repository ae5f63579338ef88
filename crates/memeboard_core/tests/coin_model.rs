use memeboard_core::{normalize_coin_name, CoinValidationError, Memecoin};

fn sample_coin() -> Memecoin {
    Memecoin {
        id: 7,
        name: "DogeClone".to_string(),
        description: "to the moon".to_string(),
        created_at: 1_700_000_000_000,
        popularity_score: 3,
        deleted_at: None,
    }
}

#[test]
fn normalize_coin_name_trims_whitespace() {
    assert_eq!(
        normalize_coin_name("  DogeClone \t").expect("padded name should normalize"),
        "DogeClone"
    );
}

#[test]
fn normalize_coin_name_rejects_empty_and_whitespace_only() {
    assert_eq!(
        normalize_coin_name("").unwrap_err(),
        CoinValidationError::EmptyName
    );
    assert_eq!(
        normalize_coin_name(" \t\n ").unwrap_err(),
        CoinValidationError::EmptyName
    );
}

#[test]
fn is_live_follows_tombstone_state() {
    let mut coin = sample_coin();
    assert!(coin.is_live());

    coin.deleted_at = Some(1_700_000_500_000);
    assert!(!coin.is_live());
}

#[test]
fn live_coin_serialization_omits_deleted_at() {
    let json = serde_json::to_value(sample_coin()).unwrap();

    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "DogeClone");
    assert_eq!(json["description"], "to the moon");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["popularity_score"], 3);
    assert!(
        json.get("deleted_at").is_none(),
        "live records must not carry a deleted_at field on the wire"
    );
}

#[test]
fn tombstoned_coin_serialization_carries_deleted_at() {
    let mut coin = sample_coin();
    coin.deleted_at = Some(1_700_000_500_000);

    let json = serde_json::to_value(&coin).unwrap();
    assert_eq!(json["deleted_at"], 1_700_000_500_000_i64);

    let decoded: Memecoin = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, coin);
}

#[test]
fn deserialization_defaults_missing_deleted_at_to_live() {
    let decoded: Memecoin = serde_json::from_value(serde_json::json!({
        "id": 1,
        "name": "PepeCoin",
        "description": "",
        "created_at": 1_700_000_000_000_i64,
        "popularity_score": 0
    }))
    .unwrap();

    assert!(decoded.is_live());
}
