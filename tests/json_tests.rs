//! `serde_json::Value` documents as conversion sources.

#![cfg(feature = "json")]

use std::collections::HashMap;
use std::time::Duration;

use convey::serde_json::json;
use convey::{ByteSize, Convert, ConvertError, Kind, Value, Zero, convert_strict, convert_weak};

#[derive(Convert, Debug, PartialEq)]
struct Service {
    name: String,
    replicas: u8,
    timeout: Duration,
    memory: ByteSize,
    ports: Vec<u16>,
    labels: HashMap<String, String>,
    weight: Option<f64>,
}

#[test]
fn test_document_into_struct() {
    let doc = json!({
        "name": "api",
        "replicas": 3,
        "timeout": "30s",
        "memory": "512MB",
        "ports": [80, "443"],
        "labels": { "tier": "edge", "zone": 2 },
        "weight": 0.75,
        "unused": true,
    });

    let mut service = Service::zero();
    convert_weak(&doc, &mut service).unwrap();
    assert_eq!(
        service,
        Service {
            name: "api".into(),
            replicas: 3,
            timeout: Duration::from_secs(30),
            memory: ByteSize(512 << 20),
            ports: vec![80, 443],
            labels: HashMap::from([
                ("tier".to_string(), "edge".to_string()),
                ("zone".to_string(), "2".to_string()),
            ]),
            weight: Some(0.75),
        }
    );
}

#[test]
fn test_null_clears_optional_field() {
    let mut service = Service::zero();
    service.weight = Some(1.0);
    convert_weak(&json!({ "weight": null }), &mut service).unwrap();
    assert_eq!(service.weight, None);
}

#[test]
fn test_json_integers_are_i64_under_strict() {
    let mut n = 0u64;
    let err = convert_strict(&json!(5), &mut n).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::CannotConvert {
            src: Kind::I64,
            dst: Kind::U64
        }
    ));

    convert_strict(&json!(u64::MAX), &mut n).unwrap();
    assert_eq!(n, u64::MAX);
}

#[test]
fn test_json_integer_duration_under_strict() {
    let mut timeout = Duration::ZERO;
    convert_strict(&json!(1_500), &mut timeout).unwrap();
    assert_eq!(timeout, Duration::from_nanos(1_500));
}

#[test]
fn test_json_overflow_reports_field_value() {
    let mut service = Service::zero();
    let err = convert_weak(&json!({ "replicas": 300 }), &mut service).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Overflow {
            value: Value::I64(300),
            dst: Kind::U8,
            ..
        }
    ));
}
