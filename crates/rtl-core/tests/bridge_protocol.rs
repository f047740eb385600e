//! Integration tests for the rtl-core public API.
//!
//! These tests use only crate-root re-exports, the way the SDK crate and host
//! integrations consume this library.

use rtl_core::{
    build_token_forward_url, encode_message, parse_message, Environment, IncomingMessage,
    NavigationDecision, NavigationPolicy, SdkConfig, TokenForwardError, BLANK_PAGE_URL,
};
use url::Url;

fn decoded_param(url: &str, name: &str) -> String {
    Url::parse(url)
        .expect("builder must produce a parseable URL")
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_else(|| panic!("parameter {name} missing from {url}"))
}

// ── Token-forward URL ─────────────────────────────────────────────────────────

#[test]
fn test_crowdplay_staging_scenario() {
    let cfg = SdkConfig::new("crowdplay", Environment::Staging, "rtlsdkexample");

    let url = build_token_forward_url(&cfg, "abc").expect("complete config");

    assert_eq!(
        url,
        "https://crowdplay.staging.getboon.com/auth/token-forward?token=abc&isWrappedMobileApp=true&embeddedProgramId=crowdplay&appScheme=rtlsdkexample"
    );
}

#[test]
fn test_built_url_is_internal_to_the_default_policy() {
    // The login page itself must never be intercepted.
    let policy = NavigationPolicy::default();
    for env in [Environment::Staging, Environment::Production] {
        let cfg = SdkConfig::new("crowdplay", env, "rtlsdkexample");
        let url = build_token_forward_url(&cfg, "t").unwrap();
        assert!(policy.is_internal(&url), "{url} must be internal");
    }
}

#[test]
fn test_token_round_trips_for_generated_tokens() {
    let cfg = SdkConfig::new("crowdplay", Environment::Production, "rtlsdkexample");

    // Every printable ASCII character, plus a few multi-byte ones, at a few
    // lengths.
    let alphabet: Vec<char> = (0x20u8..0x7f)
        .map(char::from)
        .chain(['é', 'ß', '中', '🎁'])
        .collect();
    for len in [1, 7, 64, 300] {
        let token: String = alphabet.iter().cycle().take(len).collect();
        let url = build_token_forward_url(&cfg, &token).unwrap();
        assert_eq!(decoded_param(&url, "token"), token);
        assert_eq!(decoded_param(&url, "appScheme"), "rtlsdkexample");
    }
}

#[test]
fn test_incomplete_config_is_reported() {
    let cfg = SdkConfig::new("", Environment::Staging, "");
    assert!(matches!(
        build_token_forward_url(&cfg, "abc"),
        Err(TokenForwardError::IncompleteConfig { .. })
    ));
}

// ── Navigation policy ─────────────────────────────────────────────────────────

#[test]
fn test_first_party_hosts_are_internal() {
    let policy = NavigationPolicy::default();
    let internal = [
        "https://getboon.com/",
        "https://crowdplay.staging.getboon.com/rewards",
        "http://www.affinaloyalty.com/terms",
        "https://cdn.affinaloyalty.com:8443/asset.js",
    ];
    for url in internal {
        assert!(policy.is_internal(url), "{url} must be internal");
        assert_eq!(policy.decide(url), NavigationDecision::Allow);
    }
}

#[test]
fn test_other_hosts_are_external() {
    let policy = NavigationPolicy::default();
    let external = [
        "https://example.com/",
        "https://play.google.com/store/apps",
        "https://getboon.co/",
        "intent://scan/#Intent;scheme=zxing;end",
        "::::",
    ];
    for url in external {
        assert!(!policy.is_internal(url), "{url} must be external");
        assert_eq!(policy.decide(url), NavigationDecision::Cancel);
    }
}

#[test]
fn test_blank_page_sentinel_is_allowed() {
    assert_eq!(NavigationPolicy::default().decide(BLANK_PAGE_URL), NavigationDecision::Allow);
}

// ── Codec ─────────────────────────────────────────────────────────────────────

#[test]
fn test_open_external_url_scenario() {
    let raw = r#"{"type":"openExternalUrl","URL":"https://example.com","forceExternalBrowser":"true"}"#;
    assert_eq!(
        parse_message(raw).unwrap(),
        IncomingMessage::OpenExternalUrl {
            url: "https://example.com".to_string(),
            force_external: true,
        }
    );
}

#[test]
fn test_encoded_user_auth_parses_back() {
    let msg = IncomingMessage::UserAuth {
        access_token: "access \"quoted\"".to_string(),
        refresh_token: "refresh\\slash".to_string(),
    };
    assert_eq!(parse_message(&encode_message(&msg)).unwrap(), msg);
}
