use mn_domain::config::{Config, ConfigSeverity};

#[test]
fn default_bind_is_all_interfaces() {
    let config = Config::default();
    assert_eq!(config.server.bind, "0.0.0.0");
    assert_eq!(config.server.port, 8010);
}

#[test]
fn default_store_points_at_local_bolt() {
    let config = Config::default();
    assert_eq!(config.store.uri, "bolt://localhost:7687");
    assert_eq!(config.store.user, "neo4j");
    assert_eq!(config.store.database, "neo4j");
    assert!(!config.store.multi_tenant);
}

#[test]
fn default_config_validates_clean() {
    let issues = Config::default().validate();
    assert!(
        issues.is_empty(),
        "default config should have no issues: {issues:?}"
    );
}

#[test]
fn empty_uri_is_an_error() {
    let mut config = Config::default();
    config.store.uri.clear();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "store.uri"));
}

#[test]
fn http_uri_is_flagged() {
    let mut config = Config::default();
    config.store.uri = "http://localhost:7474".into();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Warning && i.field == "store.uri"));
}

#[test]
fn addr_joins_bind_and_port() {
    let config = Config::default();
    assert_eq!(config.server.addr(), "0.0.0.0:8010");
}
