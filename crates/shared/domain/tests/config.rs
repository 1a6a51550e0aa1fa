use ncss_domain::config::{ApiConfig, ServerConfig, UnitsConfig};
use ncss_domain::constants::DEFAULT_CUSTOM_UNIT;
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.address.is_unspecified());
    assert!(server.ssl.is_none());

    let units = UnitsConfig::default();
    assert_eq!(units.definitions, vec![DEFAULT_CUSTOM_UNIT.to_owned()]);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "127.0.0.1", "port": 8080 },
        "units": { "definitions": ["smoot = 1.7018 * m = smoot"] }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.units.definitions, vec!["smoot = 1.7018 * m = smoot".to_owned()]);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("config deserialize");
    assert_eq!(cfg.server.port, 4583);
    assert_eq!(cfg.units.definitions.len(), 1);
}

#[test]
fn clones_share_until_mutated() {
    let original = ApiConfig::default();
    let mut patched = original.clone();
    patched.server.port = 9000;

    assert_eq!(original.server.port, 4583);
    assert_eq!(patched.server.port, 9000);
}
