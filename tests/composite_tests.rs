//! Composite destinations: sequences, maps, structs and pointers.

use std::collections::{BTreeMap, HashMap};

use convey::{Convert, ConvertError, Kind, StructValue, Value, Zero, convert_strict, convert_weak};

#[derive(Convert, Debug, Default, PartialEq)]
struct Listener {
    #[convey(rename = "Host")]
    host: String,
    port: u16,
    #[convey(readonly)]
    id: u64,
    #[convey(skip)]
    hits: u32,
}

#[derive(Convert, Debug, PartialEq)]
struct Pair(i32, String);

#[derive(Convert, Debug, PartialEq)]
struct Marker;

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn test_slice_grows_and_keeps_tail() {
    let mut dst = vec![1i32, 2, 3];
    convert_strict(&vec![9i32], &mut dst).unwrap();
    assert_eq!(dst, vec![9, 2, 3]);

    convert_strict(&vec![4i32, 5, 6, 7], &mut dst).unwrap();
    assert_eq!(dst, vec![4, 5, 6, 7]);
}

#[test]
fn test_struct_fields_become_elements() {
    let src = Pair(3, "x".into());
    let mut dst: Vec<String> = Vec::new();
    convert_weak(&src, &mut dst).unwrap();
    assert_eq!(dst, vec!["3".to_string(), "x".to_string()]);
}

#[test]
fn test_strings_are_not_sequences() {
    let mut dst: Vec<String> = Vec::new();
    let err = convert_strict("abc", &mut dst).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::CannotConvert {
            src: Kind::String,
            dst: Kind::Slice
        }
    ));
}

#[test]
fn test_nested_sequences() {
    let src = vec![vec!["1", "2"], vec!["3"]];
    let mut dst: Vec<[u8; 2]> = Vec::new();
    convert_weak(&src, &mut dst).unwrap();
    assert_eq!(dst, vec![[1, 2], [3, 0]]);
}

// =============================================================================
// Maps
// =============================================================================

#[test]
fn test_scalar_into_map_uses_zero_key() {
    let mut dst: HashMap<String, i32> = HashMap::new();
    convert_strict(&5i32, &mut dst).unwrap();
    assert_eq!(dst, HashMap::from([(String::new(), 5)]));
}

#[test]
fn test_sequence_indices_become_keys() {
    let mut by_name: BTreeMap<String, String> = BTreeMap::new();
    convert_strict(&["a", "b"], &mut by_name).unwrap();
    assert_eq!(
        by_name,
        BTreeMap::from([("0".to_string(), "a".to_string()), ("1".to_string(), "b".to_string())])
    );

    let mut by_index: BTreeMap<u8, String> = BTreeMap::new();
    convert_strict(&["x"], &mut by_index).unwrap();
    assert_eq!(by_index[&0], "x");
}

#[test]
fn test_struct_fields_become_keys() {
    let src = Listener {
        host: "localhost".into(),
        port: 80,
        id: 7,
        hits: 99,
    };
    let mut dst: BTreeMap<String, String> = BTreeMap::new();
    convert_weak(&src, &mut dst).unwrap();
    assert_eq!(
        dst.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Host", "id", "port"]
    );
    assert_eq!(dst["port"], "80");
    assert!(!dst.contains_key("hits"));
}

#[test]
fn test_source_map_keys_follow_policy() {
    let src = BTreeMap::from([(1i32, "a")]);

    let mut wide: HashMap<i64, String> = HashMap::new();
    convert_strict(&src, &mut wide).unwrap();
    assert_eq!(wide[&1], "a");

    let mut narrow: HashMap<i8, String> = HashMap::new();
    assert!(convert_strict(&src, &mut narrow).is_err());
    convert_weak(&src, &mut narrow).unwrap();
    assert_eq!(narrow[&1], "a");
}

#[test]
fn test_existing_entries_convert_in_place() {
    let mut dst: HashMap<String, Vec<i32>> = HashMap::from([("a".to_string(), vec![1, 2, 3])]);
    let src = HashMap::from([("a", vec![9i32]), ("b", vec![5])]);
    convert_strict(&src, &mut dst).unwrap();
    assert_eq!(dst["a"], vec![9, 2, 3]);
    assert_eq!(dst["b"], vec![5]);
}

// =============================================================================
// Structs
// =============================================================================

#[test]
fn test_lowercase_keys_match_case_insensitively() {
    let mut dst = Listener::zero();
    let src = HashMap::from([("host", "example.org")]);
    convert_strict(&src, &mut dst).unwrap();
    assert_eq!(dst.host, "example.org");

    let src = HashMap::from([("HOST", "ignored")]);
    convert_strict(&src, &mut dst).unwrap();
    assert_eq!(dst.host, "example.org");
}

#[test]
fn test_mixed_case_keys_need_exact_match() {
    let mut dst = Listener::zero();
    let src = HashMap::from([("Host", "a"), ("Port", "1")]);
    convert_weak(&src, &mut dst).unwrap();
    assert_eq!(dst.host, "a");
    assert_eq!(dst.port, 0);
}

#[test]
fn test_non_string_map_keys_are_skipped() {
    let mut dst = Listener::zero();
    let src = HashMap::from([(1i32, "a")]);
    convert_strict(&src, &mut dst).unwrap();
    assert_eq!(dst, Listener::default());
}

#[test]
fn test_readonly_field_cannot_be_set() {
    let mut dst = Listener::zero();
    let src = Value::Map(vec![(Value::from("id"), Value::U64(5))]);
    let err = convert_strict(&src, &mut dst).unwrap_err();
    assert_eq!(err.to_string(), "cannot set field id of Listener");
    assert_eq!(dst.id, 0);
}

#[test]
fn test_skipped_field_is_invisible() {
    let mut dst = Listener::zero();
    let src = Value::Map(vec![(Value::from("hits"), Value::U32(5))]);
    convert_strict(&src, &mut dst).unwrap();
    assert_eq!(dst.hits, 0);
}

#[test]
fn test_sequence_fills_fields_by_position() {
    let mut dst = Pair::zero();
    convert_weak(&["4", "four", "extra"], &mut dst).unwrap();
    assert_eq!(dst, Pair(4, "four".into()));
}

#[test]
fn test_positional_readonly_field_fails() {
    let mut dst = Listener::zero();
    let err = convert_weak(&["h", "1", "2"], &mut dst).unwrap_err();
    assert!(matches!(err, ConvertError::CannotSet { field: "id", .. }));
    assert_eq!(dst.host, "h");
    assert_eq!(dst.port, 1);
}

#[test]
fn test_scalar_fills_first_field() {
    let mut dst = Pair(1, "keep".into());
    convert_strict(&8i32, &mut dst).unwrap();
    assert_eq!(dst, Pair(8, "keep".into()));
}

#[test]
fn test_struct_to_struct_by_exact_name() {
    let src = StructValue::new("Other")
        .field("port", Value::U16(443))
        .field("Port", Value::U16(1))
        .field("unknown", Value::Bool(true));
    let mut dst = Listener::zero();
    convert_strict(&Value::Struct(src), &mut dst).unwrap();
    assert_eq!(dst.port, 443);
}

#[test]
fn test_unit_struct_accepts_empty_sources() {
    let mut dst = Marker;
    convert_strict(&Value::Map(Vec::new()), &mut dst).unwrap();
    convert_strict(&1i32, &mut dst).unwrap();
    assert_eq!(dst, Marker);
}

// =============================================================================
// Pointers
// =============================================================================

#[test]
fn test_nested_option_allocates_struct() {
    let mut dst: Option<Box<Listener>> = None;
    let src = HashMap::from([("port", 8080u16)]);
    convert_strict(&src, &mut dst).unwrap();
    assert_eq!(dst.map(|l| l.port), Some(8080));
}

#[test]
fn test_option_elements_in_slice() {
    let src = vec![Some(1u8), None, Some(3)];
    let mut dst: Vec<Option<u8>> = Vec::new();
    convert_strict(&src, &mut dst).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn test_weak_slice_into_integer_map() {
    let mut dst: HashMap<i64, i64> = HashMap::new();
    convert_weak(&vec![1i64, 2], &mut dst).unwrap();
    assert_eq!(dst, HashMap::from([(0, 1), (1, 2)]));
}
