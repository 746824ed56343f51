use hhub_domain::config::{ApiConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 5555);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "sqlite://app.db");
    assert_eq!(db.max_connections, 5);
    assert!(!db.seed);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.path.is_none());
    assert_eq!(logging.rotation, "daily");
    assert_eq!(logging.max_files, 10);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": { "url": "sqlite::memory:", "seed": true },
        "logging": { "level": "debug", "json": true, "path": "/tmp/logs" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.url, "sqlite::memory:");
    assert!(cfg.database.seed);
    assert_eq!(cfg.database.max_connections, 5, "missing keys fall back to defaults");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.path, Some(std::path::PathBuf::from("/tmp/logs")));
    assert_eq!(cfg.logging.max_files, 10);
}

#[test]
fn api_config_is_mutable_through_deref() {
    let mut cfg = ApiConfig::default();
    let shared = cfg.clone();

    cfg.server.port = 9000;

    assert_eq!(cfg.server.port, 9000);
    assert_eq!(shared.server.port, 5555, "clones keep their own copy after a write");
}
