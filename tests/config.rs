use bpmplot::config::*;
use std::time::Duration;

#[test]
fn defaults_match_serial_front_end() {
    let cfg = LiveConfig::default();
    assert_eq!(cfg.port, "/dev/ttyUSB0");
    assert_eq!(cfg.baud_rate, 115_200);
    assert_eq!(cfg.timeout(), Duration::from_secs(1));
    assert_eq!(cfg.capacity, 500);
    assert_eq!((cfg.y_min, cfg.y_max), (-10.0, 1100.0));
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg = LiveConfig::from_json(r#"{ "port": "/dev/ttyACM0", "capacity": 1000 }"#).unwrap();
    assert_eq!(cfg.port, "/dev/ttyACM0");
    assert_eq!(cfg.capacity, 1000);
    assert_eq!(cfg.baud_rate, DEFAULT_BAUD_RATE);
}

#[test]
fn json_round_trip() {
    let mut cfg = LiveConfig::default();
    cfg.y_max = 4095.0;
    let restored = LiveConfig::from_json(&cfg.to_json().unwrap()).unwrap();
    assert_eq!(restored, cfg);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = LiveConfig::from_json("{ port: ").unwrap_err();
    assert!(matches!(err, bpmplot::Error::Config(_)));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("live.json");
    std::fs::write(&path, r#"{ "baud_rate": 9600 }"#).unwrap();
    assert_eq!(LiveConfig::load(&path).unwrap().baud_rate, 9600);
}

#[test]
fn validate_rejects_bad_values() {
    let mut cfg = LiveConfig::default();
    cfg.capacity = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = LiveConfig::default();
    cfg.y_min = 5.0;
    cfg.y_max = 5.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_zero_timeout() {
    let mut cfg = LiveConfig::default();
    cfg.timeout_ms = 0;
    assert!(matches!(cfg.validate(), Err(bpmplot::Error::Config(_))));
}

#[test]
fn validate_caps_buffer_sizes() {
    let mut cfg = LiveConfig::default();
    cfg.capacity = MAX_CAPACITY;
    assert!(cfg.validate().is_ok());
    cfg.capacity = MAX_CAPACITY + 1;
    assert!(cfg.validate().is_err());

    let mut cfg = LiveConfig::default();
    cfg.channel_capacity = usize::MAX;
    assert!(cfg.validate().is_err());
}
