use std::sync::Arc;
use tradejournal::application::journal::TradeJournal;
use tradejournal::domain::repositories::KeyValueStore;
use tradejournal::domain::trading::types::{Side, TradeDraft};
use tradejournal::infrastructure::JsonFileStore;
use uuid::Uuid;

#[test]
fn test_store_creates_missing_data_dir() {
    let dir = std::env::temp_dir()
        .join(format!("tradejournal-fs-{}", Uuid::new_v4()))
        .join("nested");
    assert!(!dir.exists());

    let store = JsonFileStore::new(&dir).unwrap();
    assert!(store.dir().is_dir());

    std::fs::remove_dir_all(dir.parent().unwrap()).ok();
}

#[test]
fn test_keys_are_isolated_files() {
    let dir = std::env::temp_dir().join(format!("tradejournal-fs-{}", Uuid::new_v4()));
    let store = Arc::new(JsonFileStore::new(&dir).unwrap());

    let mut desk_a = TradeJournal::load(store.clone(), "desk_a").unwrap();
    desk_a
        .insert(TradeDraft::new("XAUUSD", Side::Short, 2010.0, 2000.0))
        .unwrap();

    let desk_b = TradeJournal::load(store.clone(), "desk_b").unwrap();
    assert!(desk_b.is_empty());
    assert!(store.path_for("desk_a").exists());
    assert!(!store.path_for("desk_b").exists());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_payload_is_a_json_array_with_wire_field_names() {
    let dir = std::env::temp_dir().join(format!("tradejournal-fs-{}", Uuid::new_v4()));
    let store = Arc::new(JsonFileStore::new(&dir).unwrap());
    let mut journal = TradeJournal::load(store.clone(), "tj_ftmo_v1").unwrap();
    journal
        .insert(TradeDraft::new("usoil", Side::Long, 70.0, 71.0).with_notes("inventory"))
        .unwrap();

    let raw = store.get("tj_ftmo_v1").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value.as_array().unwrap()[0];

    assert!(record["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(record["symbol"], "USOIL");
    assert_eq!(record["side"], "long");
    assert_eq!(record["notes"], "inventory");
    assert_eq!(record["screenshot"], "");
    assert_eq!(record["pl"], "100.00");

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_unreadable_payload_loads_empty_and_is_kept_until_next_write() {
    let dir = std::env::temp_dir().join(format!("tradejournal-fs-{}", Uuid::new_v4()));
    let store = Arc::new(JsonFileStore::new(&dir).unwrap());
    store.set("tj_ftmo_v1", "{not json").unwrap();

    let mut journal = TradeJournal::load(store.clone(), "tj_ftmo_v1").unwrap();
    assert!(journal.is_empty());
    assert_eq!(store.get("tj_ftmo_v1").unwrap().as_deref(), Some("{not json"));

    journal
        .insert(TradeDraft::new("EURUSD", Side::Long, 1.1, 1.1001))
        .unwrap();
    let raw = store.get("tj_ftmo_v1").unwrap().unwrap();
    assert!(raw.starts_with('['));

    std::fs::remove_dir_all(dir).ok();
}
