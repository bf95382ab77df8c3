use super::*;

#[test]
fn empty_json_is_default_settings() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.storage.namespace, DEFAULT_NAMESPACE);
    assert_eq!(settings.recent.limit, DEFAULT_RECENT_LIMIT);
}

#[test]
fn unset_optional_fields_are_not_written() {
    let json = serde_json::to_value(Settings::default()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "storage": {"namespace": "zplay"},
            "recent": {"limit": 10},
            "log": {}
        })
    );
}
