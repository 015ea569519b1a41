use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn empty_environment_uses_defaults() {
    let cfg = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_API_TIMEOUT_SECS);
    assert_eq!(cfg.timeouts.connect(), Duration::from_secs(DEFAULT_API_CONNECT_TIMEOUT_SECS));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = Config::from_lookup(lookup(&[("PORT", "  "), ("MIS_API_URL", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn overrides_are_applied() {
    let cfg = Config::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("MIS_API_URL", "http://localhost:5000/api/"),
        ("MIS_API_TIMEOUT_SECS", "5"),
        ("MIS_API_CONNECT_TIMEOUT_SECS", "2"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_url, "http://localhost:5000/api");
    assert_eq!(cfg.timeouts, UpstreamTimeouts { request_secs: 5, connect_secs: 2 });
}

#[test]
fn bad_timeouts_keep_defaults() {
    let cfg = Config::from_lookup(lookup(&[("MIS_API_TIMEOUT_SECS", "soon"), ("MIS_API_CONNECT_TIMEOUT_SECS", "0")])).unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_API_TIMEOUT_SECS);
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_API_CONNECT_TIMEOUT_SECS);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn invalid_port_is_rejected() {
    assert_eq!(
        Config::from_lookup(lookup(&[("PORT", "http")])),
        Err(ConfigError::InvalidPort("http".to_owned()))
    );
    assert!(Config::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}

#[test]
fn api_url_needs_http_scheme() {
    assert_eq!(
        Config::from_lookup(lookup(&[("MIS_API_URL", "mis-api.local")])),
        Err(ConfigError::InvalidApiUrl("mis-api.local".to_owned()))
    );
}
