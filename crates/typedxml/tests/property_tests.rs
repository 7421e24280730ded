//! Property-based tests for the typed tree codec
//!
//! These tests use proptest to verify:
//! 1. Roundtrip property: decode(encode(value)) == value, in every layout
//! 2. Determinism: key insertion order never changes the document
//! 3. Arbitrary input never panics the parser or decoder

use proptest::prelude::*;
use typedxml::{Diagnostics, Mapping, Value, WriterConfig};

/// Strategy for text with markup characters, whitespace and non-ASCII
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.<>&\"'\t\n\r\u{e9}\u{4e2d}-]{0,16}".prop_map(|s| s)
}

/// Strategy for mapping keys
fn arb_key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .<&\"-]{0,10}".prop_map(|s| s)
}

/// Strategy for arbitrary encodable values
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("Non-finite f64", |f| f.is_finite())
            .prop_map(Value::Float),
        arb_text().prop_map(Value::Text),
    ];

    leaf.prop_recursive(6, 128, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::from),
            prop::collection::hash_map(arb_key(), inner, 0..8)
                .prop_map(|m| Value::Mapping(m.into_iter().collect())),
        ]
    })
}

fn round_trip(value: &Value, config: WriterConfig) -> Result<Option<Value>, TestCaseError> {
    let mut diagnostics = Diagnostics::new();
    let xml = typedxml::to_string_with_config(value, config, &mut diagnostics);
    prop_assert!(diagnostics.is_empty(), "encode warnings: {diagnostics:?}");
    let decoded = typedxml::from_str(&xml, &mut diagnostics)
        .map_err(|e| TestCaseError::fail(format!("{e} in {xml}")))?;
    prop_assert!(diagnostics.is_empty(), "decode warnings: {diagnostics:?}");
    Ok(decoded)
}

fn reversed(mapping: &Mapping) -> Mapping {
    let mut entries: Vec<(String, Value)> = mapping
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    entries.reverse();
    entries.into_iter().collect()
}

proptest! {
    /// Encoding then decoding recovers the value
    #[test]
    fn compact_roundtrip(value in arb_value()) {
        let decoded = round_trip(&value, WriterConfig::compact())?;
        prop_assert_eq!(decoded, Some(value));
    }

    /// Indentation added by the writer never leaks into decoded values
    #[test]
    fn indented_roundtrip(value in arb_value()) {
        let decoded = round_trip(&value, WriterConfig::default())?;
        prop_assert_eq!(decoded, Some(value));
    }

    /// Mappings round trip at the root
    #[test]
    fn mapping_roundtrip(map in prop::collection::hash_map(arb_key(), arb_value(), 0..16)) {
        let value = Value::Mapping(map.into_iter().collect());
        let decoded = round_trip(&value, WriterConfig::default())?;
        prop_assert_eq!(decoded, Some(value));
    }

    /// The same mapping encodes to the same bytes whatever its insertion order
    #[test]
    fn encoding_is_deterministic(map in prop::collection::hash_map(arb_key(), arb_value(), 0..16)) {
        let forward: Mapping = map.into_iter().collect();
        let backward = reversed(&forward);
        let mut diagnostics = Diagnostics::new();
        let first = typedxml::to_string(&Value::Mapping(forward.clone()), &mut diagnostics);
        let second = typedxml::to_string(&Value::Mapping(forward), &mut diagnostics);
        let third = typedxml::to_string(&Value::Mapping(backward), &mut diagnostics);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &third);
    }

    /// Arbitrary bytes never panic the parser or the decoder
    #[test]
    fn arbitrary_input_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut diagnostics = Diagnostics::new();
        let _result = typedxml::from_bytes(&bytes, &mut diagnostics);
    }

    /// Unknown type tags decode to nothing instead of failing
    #[test]
    fn unknown_tags_are_absent(tag in "[a-z]{1,8}", text in "[a-z0-9]{0,8}") {
        prop_assume!(typedxml::TypeTag::from_attr(&tag).is_none());
        let xml = format!("<object type=\"{tag}\">{text}</object>");
        let mut diagnostics = Diagnostics::new();
        let decoded = typedxml::from_str(&xml, &mut diagnostics)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, None);
        prop_assert_eq!(diagnostics.warnings().count(), 1);
    }
}
