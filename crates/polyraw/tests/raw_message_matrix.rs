//! Container behavior matrix: identity emits, cross-format conversion,
//! the deferred variant, describe, and the empty container.

use polyraw::{
    Codecs, ConversionStage, DecodeError, EncodingFormat, PackValue, RawMessage, RawMessageError,
};
use polyraw_pack::codecs::JsonValueCodec;
use proptest::prelude::*;
use serde::Deserialize;
use serde_json::json;

fn decode_json(bytes: &[u8]) -> PackValue {
    Codecs::new().json.decode(bytes).expect("valid JSON")
}

fn decode_ubjson(bytes: &[u8]) -> PackValue {
    Codecs::new().ubjson.decode(bytes).expect("valid UBJSON")
}

// ---------------------------------------------------------------------------
// Empty container
// ---------------------------------------------------------------------------

#[test]
fn empty_container_reports_uninitialized_everywhere() {
    let msg = RawMessage::default();
    assert!(matches!(msg.to_json(), Err(RawMessageError::Uninitialized)));
    assert!(matches!(msg.to_ubjson(), Err(RawMessageError::Uninitialized)));
    assert!(matches!(
        msg.decode_into::<serde_json::Value>(),
        Err(RawMessageError::Uninitialized)
    ));
    assert_eq!(msg.describe(), "uninitialized");
    assert_eq!(
        RawMessageError::Uninitialized.to_string(),
        "raw message is not initialized"
    );
}

// ---------------------------------------------------------------------------
// Identity emits
// ---------------------------------------------------------------------------

#[test]
fn json_identity_keeps_formatting() {
    let text = b"{ \"b\" : 1,\n  \"a\" : [ 1.50, 2 ] }";
    let msg = RawMessage::from_json(&text[..]);
    assert_eq!(&*msg.to_json().unwrap(), &text[..]);
}

#[test]
fn ubjson_identity_keeps_non_canonical_encoding() {
    // 1 written as int32 instead of the narrowest uint8.
    let bytes = vec![b'l', 0, 0, 0, 1];
    let msg = RawMessage::from_ubjson(bytes.clone());
    assert_eq!(&*msg.to_ubjson().unwrap(), &bytes[..]);
    assert_eq!(&*msg.to_json().unwrap(), b"1");
}

#[test]
fn malformed_bytes_are_accepted_until_used() {
    let mut msg = RawMessage::default();
    msg.parse_json(&b"not json"[..]);
    assert_eq!(&*msg.to_json().unwrap(), b"not json");
    assert!(msg.to_ubjson().is_err());
    assert!(msg.decode_into::<serde_json::Value>().is_err());
}

// ---------------------------------------------------------------------------
// Cross-format conversion
// ---------------------------------------------------------------------------

#[test]
fn json_to_ubjson_to_json_keeps_key_order() {
    let text = br#"{"zeta":[1,-2,3.25],"alpha":{"nested":"v","n":null},"t":true}"#;
    let ubjson = RawMessage::from_json(&text[..]).to_ubjson().unwrap().into_owned();
    let back = RawMessage::from_ubjson(ubjson).to_json().unwrap().into_owned();
    assert_eq!(back, text.to_vec());
}

#[test]
fn corrupt_ubjson_to_json_is_an_encode_failure_with_decode_cause() {
    let msg = RawMessage::from_ubjson(vec![b'[', b'U']);
    let err = msg.to_json().unwrap_err();
    assert_eq!(
        err.stage(),
        Some(ConversionStage::Decode(EncodingFormat::Ubjson))
    );
    assert!(matches!(
        err,
        RawMessageError::Encode {
            target: EncodingFormat::Json,
            ..
        }
    ));
    let source = std::error::Error::source(&err).expect("cause is kept");
    assert!(source.to_string().contains("UBJSON"), "got: {source}");
}

#[test]
fn corrupt_json_to_ubjson_is_an_encode_failure_with_decode_cause() {
    let msg = RawMessage::from_json(&b"{\"a\":}"[..]);
    let err = msg.to_ubjson().unwrap_err();
    assert_eq!(
        err.stage(),
        Some(ConversionStage::Decode(EncodingFormat::Json))
    );
    assert!(err.to_string().starts_with("cannot produce UBJSON: JSON decoding failed"));
}

// ---------------------------------------------------------------------------
// Decoding into typed targets
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Deserialize)]
struct Reading {
    sensor: String,
    values: Vec<f64>,
    ok: bool,
}

#[test]
fn decode_into_from_both_formats() {
    let text = br#"{"sensor":"t1","values":[1.5,2.0],"ok":true}"#;
    let expected = Reading {
        sensor: "t1".into(),
        values: vec![1.5, 2.0],
        ok: true,
    };
    let from_json = RawMessage::from_json(&text[..]);
    assert_eq!(from_json.decode_into::<Reading>().unwrap(), expected);

    let from_ubjson = RawMessage::from_ubjson(from_json.to_ubjson().unwrap().into_owned());
    assert_eq!(from_ubjson.decode_into::<Reading>().unwrap(), expected);
}

#[test]
fn decode_into_type_mismatch_is_a_decode_failure() {
    let json = RawMessage::from_json(&b"[1,2]"[..]);
    assert!(matches!(
        json.decode_into::<Reading>(),
        Err(RawMessageError::Decode(DecodeError::Json(_)))
    ));
    let ubjson = RawMessage::from_ubjson(json.to_ubjson().unwrap().into_owned());
    assert!(matches!(
        ubjson.decode_into::<Reading>(),
        Err(RawMessageError::Decode(DecodeError::Value(_)))
    ));
    let corrupt = RawMessage::from_ubjson(vec![0xff]);
    assert!(matches!(
        corrupt.decode_into::<Reading>(),
        Err(RawMessageError::Decode(DecodeError::Codec(_)))
    ));
}

// ---------------------------------------------------------------------------
// Deferred values
// ---------------------------------------------------------------------------

#[test]
fn deferred_bytes_become_numbers_in_json() {
    let msg = RawMessage::from_value(vec![0x00u8, 0xff, 0x10]);
    let json = msg.to_json().unwrap();
    assert_eq!(decode_json(&json), PackValue::from(json!([0, 255, 16])));
    assert_eq!(
        decode_ubjson(&msg.to_ubjson().unwrap()),
        PackValue::Bytes(vec![0x00, 0xff, 0x10])
    );
}

#[test]
fn ubjson_bytes_become_numbers_in_json() {
    let ubjson = vec![b'[', b'$', b'U', b'#', b'U', 3, 0x00, 0xff, 0x10];
    let msg = RawMessage::from_ubjson(ubjson);
    let json = msg.to_json().unwrap().into_owned();
    assert_eq!(json, b"[0,255,16]");
    assert_eq!(serde_json::to_vec(&msg).unwrap(), json);

    let from_json = RawMessage::from_json(json);
    assert_eq!(from_json.decode_into::<Vec<u8>>().unwrap(), vec![0x00, 0xff, 0x10]);
    assert_eq!(msg.decode_into::<Vec<u8>>().unwrap(), vec![0x00, 0xff, 0x10]);
}

#[test]
fn nested_bytes_agree_across_sources() {
    let value = PackValue::Object(vec![(
        "blob".into(),
        PackValue::Array(vec![PackValue::Bytes(vec![7, 200])]),
    )]);
    let deferred = RawMessage::from_value(value);
    let ubjson = RawMessage::from_ubjson(deferred.to_ubjson().unwrap().into_owned());
    assert_eq!(&*deferred.to_json().unwrap(), br#"{"blob":[[7,200]]}"#);
    assert_eq!(&*ubjson.to_json().unwrap(), br#"{"blob":[[7,200]]}"#);
}

#[test]
fn hostile_ubjson_fails_instead_of_aborting() {
    let deep = RawMessage::from_ubjson(vec![b'['; 1_000_000]);
    let err = deep.to_json().unwrap_err();
    assert_eq!(
        err.stage(),
        Some(ConversionStage::Decode(EncodingFormat::Ubjson))
    );
    assert!(deep.decode_into::<serde_json::Value>().is_err());
    assert!(serde_json::to_vec(&deep).is_err());

    let nulls = RawMessage::from_ubjson(vec![b'[', b'$', b'Z', b'#', b'l', 0x02, 0, 0, 0]);
    assert!(nulls.to_json().is_err());
}

#[test]
fn deferred_decode_always_fails() {
    let values = vec![
        PackValue::Null,
        PackValue::Integer(1),
        PackValue::Str("s".into()),
        PackValue::Bytes(vec![1]),
        PackValue::from(json!({"a": [1, 2]})),
    ];
    for value in values {
        let msg = RawMessage::from_value(value);
        assert!(matches!(
            msg.decode_into::<serde_json::Value>(),
            Err(RawMessageError::Decode(DecodeError::Deferred))
        ));
        assert!(matches!(
            msg.decode_into::<PackValue>(),
            Err(RawMessageError::Decode(DecodeError::Deferred))
        ));
    }
}

#[test]
fn deferred_serialize_source() {
    #[derive(serde::Serialize)]
    struct Event<'a> {
        name: &'a str,
        count: u32,
    }
    let value = PackValue::from_serialize(&Event {
        name: "boot",
        count: 3,
    })
    .unwrap();
    let msg = RawMessage::from_value(value);
    assert_eq!(&*msg.to_json().unwrap(), br#"{"name":"boot","count":3}"#);
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

#[test]
fn describe_short_payloads() {
    assert_eq!(
        RawMessage::from_json(&br#"{"a":1}"#[..]).describe(),
        r#"JSON: "{\"a\":1}""#
    );
    assert_eq!(
        RawMessage::from_ubjson(vec![b'S', b'U', 1, b'x']).describe(),
        r#"UBJSON: "SU\u{1}x""#
    );
    assert_eq!(
        RawMessage::from_value(true).to_string(),
        "Deferred: Bool(true)"
    );
}

#[test]
fn describe_truncates_300_byte_payload() {
    let mut text = b"\"".to_vec();
    text.extend(std::iter::repeat(b'a').take(298));
    text.push(b'"');
    assert_eq!(text.len(), 300);

    let out = RawMessage::from_json(text).describe();
    let expected_content = format!("\"{}", "a".repeat(127));
    assert_eq!(out, format!("JSON: {expected_content:?}... (300)"));
    assert!(!out.contains(&"a".repeat(128)));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// The tree a JSON decode yields: byte buffers come back as integer arrays.
fn bytes_as_numbers(value: PackValue) -> PackValue {
    match value {
        PackValue::Bytes(bytes) => PackValue::Array(bytes.into_iter().map(PackValue::from).collect()),
        PackValue::Array(items) => PackValue::Array(items.into_iter().map(bytes_as_numbers).collect()),
        PackValue::Object(fields) => PackValue::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k, bytes_as_numbers(v)))
                .collect(),
        ),
        other => other,
    }
}

fn any_value() -> impl Strategy<Value = PackValue> {
    let leaf = prop_oneof![
        Just(PackValue::Null),
        any::<bool>().prop_map(PackValue::Bool),
        any::<i64>().prop_map(PackValue::Integer),
        (-1e9f64..1e9f64).prop_map(PackValue::Float),
        "[a-zA-Z0-9 ]{0,10}".prop_map(PackValue::Str),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(PackValue::UInteger),
        prop::collection::vec(any::<u8>(), 0..6).prop_map(PackValue::Bytes),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(PackValue::Array),
            prop::collection::vec(("[a-z]{1,5}", inner), 0..5).prop_map(PackValue::Object),
        ]
    })
}

proptest! {
    #[test]
    fn parse_json_then_emit_json_is_identity(value in any_value()) {
        let bytes = Codecs::new().json.encode(&value).unwrap();
        let mut msg = RawMessage::default();
        msg.parse_json(bytes.clone());
        prop_assert_eq!(msg.to_json().unwrap().into_owned(), bytes);
    }

    #[test]
    fn parse_ubjson_then_emit_ubjson_is_identity(value in any_value()) {
        let bytes = Codecs::new().ubjson.encode(&value).unwrap();
        let mut msg = RawMessage::default();
        msg.parse_ubjson(bytes.clone());
        prop_assert_eq!(msg.to_ubjson().unwrap().into_owned(), bytes);
    }

    #[test]
    fn deferred_emits_decode_back_to_the_value(value in any_value()) {
        let msg = RawMessage::from_value(value.clone());
        prop_assert_eq!(decode_json(&msg.to_json().unwrap()), bytes_as_numbers(value.clone()));
        prop_assert_eq!(decode_ubjson(&msg.to_ubjson().unwrap()), value);
    }

    #[test]
    fn json_output_does_not_depend_on_the_source(value in any_value()) {
        let deferred = RawMessage::from_value(value.clone());
        let ubjson = RawMessage::from_ubjson(deferred.to_ubjson().unwrap().into_owned());
        let json = RawMessage::from_json(deferred.to_json().unwrap().into_owned());
        let expected = deferred.to_json().unwrap().into_owned();

        prop_assert_eq!(ubjson.to_json().unwrap().into_owned(), expected.clone());
        prop_assert_eq!(serde_json::to_vec(&ubjson).unwrap(), expected.clone());
        prop_assert_eq!(serde_json::to_vec(&deferred).unwrap(), expected.clone());
        prop_assert_eq!(serde_json::to_vec(&json).unwrap(), expected);
    }
}
