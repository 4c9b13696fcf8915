use decider_toon::{decode, encode, Indent, Map, Value, MAX_DEPTH};

/// Assert that encode → decode reproduces the value, compact and indented.
fn assert_roundtrip(value: Value) {
    let compact = encode(&value, None).expect("encode failed");
    let decoded = decode(&compact).expect("decode failed");
    assert_eq!(
        decoded, value,
        "Compact roundtrip failed:\n  TOON: {compact}\n  decoded: {decoded:?}"
    );

    let indented = encode(&value, Some(&Indent::new("", "    "))).expect("encode failed");
    let decoded = decode(&indented).expect("decode failed");
    assert_eq!(
        decoded, value,
        "Indented roundtrip failed:\n  TOON:\n{indented}\n  decoded: {decoded:?}"
    );
}

fn map(pairs: Vec<(&str, Value)>) -> Value {
    Value::Map(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// `levels` containers, alternating sequence and single-key map.
fn nested(levels: usize) -> Value {
    let mut value = Value::Int(0);
    for i in 0..levels {
        value = if i % 2 == 0 {
            Value::Sequence(vec![value])
        } else {
            map(vec![("inner", value)])
        };
    }
    value
}

// ============================================================================
// Scalar Roundtrips
// ============================================================================

#[test]
fn roundtrip_null() {
    assert_roundtrip(Value::Null);
}

#[test]
fn roundtrip_bools() {
    assert_roundtrip(Value::Bool(true));
    assert_roundtrip(Value::Bool(false));
}

#[test]
fn roundtrip_integer_extremes() {
    assert_roundtrip(Value::Int(0));
    assert_roundtrip(Value::Int(i64::MAX));
    assert_roundtrip(Value::Int(i64::MIN));
}

#[test]
fn roundtrip_floats() {
    for f in [0.5, -1.25, 1.0, 0.0, 1e21, 1e-7, 123456.789, f64::MAX, f64::MIN_POSITIVE] {
        assert_roundtrip(Value::Float(f));
    }
}

#[test]
fn roundtrip_strings() {
    for s in [
        "hello",
        "hello world",
        "",
        "null",
        "true",
        "false",
        "42",
        "-3.5",
        "inf",
        "NaN",
        "with-dash",
        "-leading-dash",
        "a:b",
        "{braces}",
        "[brackets]",
        "line1\nline2",
        "tab\there",
        "quote\"inside",
        "back\\slash",
        "\u{0}nul",
        "café",
        "  padded  ",
    ] {
        assert_roundtrip(Value::from(s));
    }
}

// ============================================================================
// Structure Roundtrips
// ============================================================================

#[test]
fn roundtrip_empty_containers() {
    assert_roundtrip(Value::Sequence(vec![]));
    assert_roundtrip(Value::Map(Map::new()));
    assert_roundtrip(Value::Sequence(vec![
        Value::Sequence(vec![]),
        Value::Map(Map::new()),
    ]));
}

#[test]
fn roundtrip_int_sequence() {
    assert_roundtrip(Value::Sequence(vec![
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
    ]));
}

#[test]
fn roundtrip_nested_object() {
    assert_roundtrip(map(vec![
        ("name", Value::from("test")),
        ("count", Value::Int(5)),
        ("active", Value::Bool(true)),
        ("items", Value::Sequence(vec![Value::from("a"), Value::from("b")])),
        (
            "meta",
            map(vec![
                ("ratio", Value::Float(0.75)),
                ("missing", Value::Null),
                ("tags", Value::Sequence(vec![])),
            ]),
        ),
    ]));
}

#[test]
fn roundtrip_keys_needing_quotes() {
    assert_roundtrip(map(vec![
        ("", Value::Int(1)),
        ("has space", Value::Int(2)),
        ("123", Value::Int(3)),
        ("true", Value::Int(4)),
        ("a:b", Value::Int(5)),
    ]));
}

#[test]
fn roundtrip_check_result_shape() {
    // Mirrors the structured result of a scope check run.
    let entry = |id: &str, file: &str, pattern: &str| {
        map(vec![
            ("adr_id", Value::from(id)),
            ("file", Value::from(file)),
            ("pattern", Value::from(pattern)),
        ])
    };
    assert_roundtrip(map(vec![
        (
            "changed_files",
            Value::Sequence(vec![
                Value::from("src/main.go"),
                Value::from("internal/adr/types.go"),
            ]),
        ),
        (
            "matches",
            Value::Sequence(vec![
                entry("ADR-0001", "src/main.go", "src/**"),
                entry("ADR-0004", "internal/adr/types.go", "internal/**/*.go"),
            ]),
        ),
        ("passed", Value::Bool(true)),
    ]));
}

#[test]
fn roundtrip_deep_nesting() {
    assert_roundtrip(nested(100));
}

#[test]
fn roundtrip_nesting_beyond_128_levels() {
    for levels in [128, 129, 130, 300] {
        assert_roundtrip(nested(levels));
    }
}

#[test]
fn roundtrip_at_depth_limit() {
    // Encoding and dropping recurse once per level.
    std::thread::Builder::new()
        .stack_size(64 << 20)
        .spawn(|| assert_roundtrip(nested(MAX_DEPTH)))
        .unwrap()
        .join()
        .unwrap();
}
