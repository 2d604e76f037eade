#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chatcast_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:50051"
limits:
  max_msg_bytes: 1024 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:50051");
    assert_eq!(cfg.server.log_filter, "info");
    assert_eq!(cfg.limits.max_message_bytes, 65536);
}

#[test]
fn wrong_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn invalid_listen_is_rejected() {
    let bad = r#"
version: 1
server:
  listen: "not-an-addr"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn limits_out_of_range_are_rejected() {
    let bad = r#"
version: 1
limits:
  max_message_bytes: 10
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("does/not/exist/chatcast.yaml").expect("defaults");
    assert_eq!(cfg.version, 1);
}
