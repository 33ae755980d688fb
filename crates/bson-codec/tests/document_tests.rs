mod common;

use bson_codec::{Array, BsonError, BsonType, DecodeLimits, Document, MAX_DOCUMENT_LEN};
use bson_types::{BinarySubtype, TypesError, Value};
use common::{fixture, to_hex};

fn read(bytes: &[u8]) -> Result<Document, BsonError> {
    let mut r = bytes;
    Document::read_from(&mut r)
}

/// Assert that `bytes` decodes and re-encodes to exactly the same bytes.
fn assert_byte_exact(bytes: &[u8]) -> Document {
    let doc = read(bytes).expect("decode failed");
    let out = doc.marshal_binary().expect("encode failed");
    assert_eq!(
        to_hex(&out),
        to_hex(bytes),
        "re-encoded bytes differ from input"
    );
    doc
}

/// `levels` documents nested through a field named `a`.
fn nested_binary(levels: usize) -> Vec<u8> {
    let mut bytes = vec![5, 0, 0, 0, 0];
    for _ in 1..levels {
        let len = i32::try_from(4 + 1 + 2 + bytes.len() + 1).unwrap();
        let mut outer = len.to_le_bytes().to_vec();
        outer.push(0x03);
        outer.extend_from_slice(b"a\0");
        outer.extend_from_slice(&bytes);
        outer.push(0);
        bytes = outer;
    }
    bytes
}

fn nested_json(levels: usize) -> String {
    let mut json = String::from(r#"{"$k":[]}"#);
    for _ in 1..levels {
        json = format!(r#"{{"$k":["a"],"a":{json}}}"#);
    }
    json
}

// ============================================================================
// Fixtures
// ============================================================================

#[test]
fn handshake_fixtures_are_byte_exact() {
    for name in ["handshake1", "handshake2", "handshake3"] {
        let bytes = fixture(name);
        let doc = assert_byte_exact(&bytes);
        assert!(!doc.0.is_empty(), "{name} decoded empty");
    }
}

#[test]
fn handshake1_fields_in_wire_order() {
    let doc = assert_byte_exact(&fixture("handshake1")).into_inner();
    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        ["ismaster", "client", "compression", "loadBalanced"]
    );
    assert_eq!(doc.get("ismaster"), Some(&Value::Bool(true)));

    let driver = doc
        .get("client")
        .and_then(Value::as_document)
        .and_then(|c| c.get("driver"))
        .and_then(Value::as_document)
        .unwrap();
    assert_eq!(driver.get("name").and_then(Value::as_str), Some("mongo-go-driver"));

    let compression = doc.get("compression").and_then(Value::as_array).unwrap();
    assert_eq!(compression.get(0).unwrap(), &Value::from("none"));
}

#[test]
fn handshake3_binary_uuid() {
    let doc = assert_byte_exact(&fixture("handshake3")).into_inner();
    let lsid = doc.get("lsid").and_then(Value::as_document).unwrap();
    let Some(Value::Binary(id)) = lsid.get("id") else {
        panic!("lsid.id is not binary");
    };
    assert_eq!(id.subtype, BinarySubtype::UUID);
    assert_eq!(to_hex(&id.bytes), "a319e2b83e7f4f51b2d6c01d6f4a9e70");
    assert_eq!(doc.get("$db").and_then(Value::as_str), Some("admin"));
}

#[test]
fn handshake_json_projection() {
    let doc = read(&fixture("handshake2")).unwrap();
    assert_eq!(
        doc.marshal_json().unwrap(),
        concat!(
            r#"{"$k":["ismaster","helloOk","maxAwaitTimeMS","topologyVersion","$db"],"#,
            r#""ismaster":true,"helloOk":true,"maxAwaitTimeMS":{"$l":"10000"},"#,
            r#""topologyVersion":{"$k":["processId","counter"],"#,
            r#""processId":{"$b":"AAECAwQFBgcICQoL","s":0},"counter":{"$l":"0"}},"#,
            r#""$db":"admin"}"#,
        )
    );

    let doc = read(&fixture("handshake3")).unwrap();
    assert_eq!(
        doc.marshal_json().unwrap(),
        concat!(
            r#"{"$k":["endSessions","lsid","maxTimeMS","ratio","comment","$db"],"#,
            r#""endSessions":[{"$k":["id"],"id":{"$b":"oxniuD5/T1Gy1sAdb0qecA==","s":4}}],"#,
            r#""lsid":{"$k":["id"],"id":{"$b":"oxniuD5/T1Gy1sAdb0qecA==","s":4}},"#,
            r#""maxTimeMS":1000,"ratio":{"$f":0.25},"comment":null,"$db":"admin"}"#,
        )
    );
}

#[test]
fn handshake_json_round_trip_reproduces_bytes() {
    for name in ["handshake1", "handshake2", "handshake3"] {
        let bytes = fixture(name);
        let json = read(&bytes).unwrap().marshal_json().unwrap();
        let back = Document::unmarshal_json(json.as_bytes()).unwrap();
        assert_eq!(to_hex(&back.marshal_binary().unwrap()), to_hex(&bytes), "{name}");
        assert_eq!(back.marshal_json().unwrap(), json, "{name}");
    }
}

// ============================================================================
// Binary layout
// ============================================================================

#[test]
fn empty_document_bytes() {
    let doc = assert_byte_exact(&[5, 0, 0, 0, 0]);
    assert!(doc.0.is_empty());
    assert_eq!(Document::default().marshal_binary().unwrap(), [5, 0, 0, 0, 0]);
}

#[test]
fn ismaster_document() {
    let doc = Document(bson_types::Document::from_pairs([("ismaster", true)]).unwrap());
    let bytes = doc.marshal_binary().unwrap();
    assert_eq!(
        bytes,
        [16, 0, 0, 0, 0x08, b'i', b's', b'm', b'a', b's', b't', b'e', b'r', 0, 1, 0]
    );
    assert_eq!(doc.marshal_json().unwrap(), r#"{"$k":["ismaster"],"ismaster":true}"#);
}

#[test]
fn read_consumes_only_the_document() {
    let mut input: &[u8] = &[5, 0, 0, 0, 0, 5, 0, 0, 0, 0];
    Document::read_from(&mut input).unwrap();
    assert_eq!(input.len(), 5);
    Document::read_from(&mut input).unwrap();
    assert!(input.is_empty());
}

#[test]
fn write_to_matches_marshal_binary() {
    let doc = read(&fixture("handshake1")).unwrap();
    let mut out = Vec::new();
    doc.write_to(&mut out).unwrap();
    assert_eq!(out, doc.marshal_binary().unwrap());
}

#[test]
fn document_length_bounds() {
    let err = read(&[4, 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err.root(), BsonError::InvalidDocumentLength(4)), "{err}");

    let mut bytes = (MAX_DOCUMENT_LEN + 1).to_le_bytes().to_vec();
    bytes.push(0);
    let err = read(&bytes).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::InvalidDocumentLength(16_777_217)),
        "{err}"
    );

    let err = read(&(-1i32).to_le_bytes()).unwrap_err();
    assert!(matches!(err.root(), BsonError::InvalidDocumentLength(-1)), "{err}");
}

#[test]
fn declared_length_longer_than_input() {
    let err = read(&[10, 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err.root(), BsonError::Truncated { .. }), "{err}");
}

#[test]
fn element_overrunning_the_document_fails() {
    // Declared length ends inside the string value.
    let bytes = [11, 0, 0, 0, 0x02, b'a', 0, 4, 0, 0, 0, b'f', b'o', b'o', 0, 0];
    let err = read(&bytes).unwrap_err();
    assert!(matches!(err.root(), BsonError::Truncated { .. }), "{err}");
}

#[test]
fn unsupported_tag_names_the_type() {
    let mut bytes = vec![22, 0, 0, 0, 0x07, b'_', b'i', b'd', 0];
    bytes.extend_from_slice(&[0xAB; 12]);
    bytes.push(0);
    let err = read(&bytes).unwrap_err();
    assert!(
        matches!(
            err.root(),
            BsonError::UnsupportedTag {
                tag: 0x07,
                name: "ObjectId"
            }
        ),
        "{err}"
    );
    assert!(err.to_string().contains("ObjectId"));
    assert!(err.to_string().contains("field \"_id\""), "{err}");
}

#[test]
fn unknown_tag() {
    let bytes = [8, 0, 0, 0, 0x42, b'a', 0, 0];
    let err = read(&bytes).unwrap_err();
    assert!(matches!(err.root(), BsonError::UnknownTag(0x42)), "{err}");
    assert!(err.to_string().contains("field \"a\""), "{err}");
}

#[test]
fn nested_length_past_parent_body_fails() {
    // {"a": <document claiming 9 bytes with 2 left in the parent>}
    let bytes = [13, 0, 0, 0, 0x03, b'a', 0, 9, 0, 0, 0, 0, 0];
    let err = read(&bytes).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::Truncated { what: "document" }),
        "{err}"
    );
}

#[test]
fn duplicate_keys_fail() {
    let bytes = [11, 0, 0, 0, 0x0A, b'a', 0, 0x0A, b'a', 0, 0];
    let err = read(&bytes).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::Types(TypesError::DuplicateKey(k)) if k == "a"),
        "{err}"
    );
}

#[test]
fn empty_key_fails() {
    let bytes = [7, 0, 0, 0, 0x0A, 0, 0];
    let err = read(&bytes).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::Types(TypesError::InvalidKey(k)) if k.is_empty()),
        "{err}"
    );
}

#[test]
fn non_utf8_key_fails() {
    let bytes = [8, 0, 0, 0, 0x0A, 0xC3, 0, 0];
    let err = read(&bytes).unwrap_err();
    assert!(matches!(err.root(), BsonError::InvalidUtf8("cstring")), "{err}");
}

#[test]
fn nested_errors_name_the_field() {
    // {"outer": {"b": <bool 2>}}
    let bytes = [
        21, 0, 0, 0, 0x03, b'o', b'u', b't', b'e', b'r', 0, 9, 0, 0, 0, 0x08, b'b', 0, 2, 0, 0,
    ];
    let err = read(&bytes).unwrap_err();
    assert!(matches!(err.root(), BsonError::InvalidBool(2)), "{err}");
    let msg = err.to_string();
    assert!(msg.contains("outer") && msg.contains("\"b\""), "{msg}");
}

#[test]
fn oversized_document_cannot_be_encoded() {
    let big = "x".repeat(MAX_DOCUMENT_LEN as usize);
    let doc = Document(bson_types::Document::from_pairs([("s", big)]).unwrap());
    let err = doc.marshal_binary().unwrap_err();
    assert!(matches!(err.root(), BsonError::DocumentTooLarge(_)), "{err}");
}

// ============================================================================
// Nesting depth
// ============================================================================

#[test]
fn depth_100_is_accepted() {
    let bytes = nested_binary(100);
    let doc = assert_byte_exact(&bytes);
    assert_eq!(Value::Document(doc.into_inner()).depth(), 100);
}

#[test]
fn depth_101_is_rejected() {
    let err = read(&nested_binary(101)).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::DepthLimitExceeded { max: 100 }),
        "{err}"
    );
}

#[test]
fn tightened_depth_limit() {
    let limits = DecodeLimits::default().with_max_depth(3);
    let mut r: &[u8] = &nested_binary(3);
    Document::read_from_with_limits(&mut r, &limits).unwrap();

    let mut r: &[u8] = &nested_binary(4);
    let err = Document::read_from_with_limits(&mut r, &limits).unwrap_err();
    assert!(matches!(err.root(), BsonError::DepthLimitExceeded { max: 3 }), "{err}");
}

#[test]
fn tightened_length_limit() {
    let limits = DecodeLimits::default().with_max_document_len(64);
    let bytes = fixture("handshake1");
    let err = Document::read_from_with_limits(&mut bytes.as_slice(), &limits).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::InvalidDocumentLength(0xcd)),
        "{err}"
    );
}

#[test]
fn json_depth_limit() {
    Document::unmarshal_json(nested_json(100).as_bytes()).unwrap();

    let err = Document::unmarshal_json(nested_json(101).as_bytes()).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::DepthLimitExceeded { max: 100 }),
        "{err}"
    );
}

// ============================================================================
// JSON projection
// ============================================================================

#[test]
fn json_trailing_bytes_rejected() {
    let err = Document::unmarshal_json(br#"{"$k":[]} "#).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::JsonTrailingBytes { count: 1 }),
        "{err}"
    );
    let err = Document::unmarshal_json(br#"{"$k":[]}{"$k":[]}"#).unwrap_err();
    assert!(matches!(err.root(), BsonError::JsonTrailingBytes { .. }), "{err}");
}

#[test]
fn json_null_rejected() {
    let err = Document::unmarshal_json(b"null").unwrap_err();
    assert!(matches!(err.root(), BsonError::JsonNull("Document")), "{err}");
    let err = Array::unmarshal_json(b"null").unwrap_err();
    assert!(matches!(err.root(), BsonError::JsonNull("Array")), "{err}");
}

#[test]
fn json_key_list_required() {
    let err = Document::unmarshal_json(br#"{"a":1}"#).unwrap_err();
    assert!(matches!(err.root(), BsonError::MissingKeyList), "{err}");
}

#[test]
fn json_extra_field_rejected() {
    let err = Document::unmarshal_json(br#"{"$k":["a"],"a":1,"b":2}"#).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::KeyCountMismatch { keys: 1, total: 3 }),
        "{err}"
    );
}

#[test]
fn json_listed_key_missing() {
    let err = Document::unmarshal_json(br#"{"$k":["a"],"b":1}"#).unwrap_err();
    assert!(matches!(err.root(), BsonError::MissingField(k) if k == "a"), "{err}");
}

#[test]
fn json_repeated_key_in_list() {
    let err = Document::unmarshal_json(br#"{"$k":["a","a"],"a":1,"b":2}"#).unwrap_err();
    assert!(
        matches!(err.root(), BsonError::Types(TypesError::DuplicateKey(k)) if k == "a"),
        "{err}"
    );
}

#[test]
fn json_field_order_comes_from_key_list() {
    let doc = Document::unmarshal_json(br#"{"$k":["b","a"],"a":1,"b":2}"#).unwrap();
    assert_eq!(doc.0.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(doc.marshal_json().unwrap(), r#"{"$k":["b","a"],"b":2,"a":1}"#);
}

#[test]
fn json_unhandled_values() {
    for input in [
        &br#"{"$k":["a"],"a":{"x":1}}"#[..],
        br#"{"$k":["a"],"a":1.5}"#,
        br#"{"$k":["a"],"a":4294967296}"#,
    ] {
        let err = Document::unmarshal_json(input).unwrap_err();
        assert!(matches!(err.root(), BsonError::UnhandledJson(_)), "{err}");
    }
}

#[test]
fn json_marker_with_extra_field_rejected() {
    let err = Document::unmarshal_json(br#"{"$k":["a"],"a":{"$l":"1","x":0}}"#).unwrap_err();
    assert!(matches!(err.root(), BsonError::JsonParse(_)), "{err}");
}

#[test]
fn json_reserved_key() {
    let doc = Document(bson_types::Document::from_pairs([("$k", 1)]).unwrap());
    let err = doc.marshal_json().unwrap_err();
    assert!(matches!(err.root(), BsonError::ReservedKey(k) if k == "$k"), "{err}");
    // The binary form has no such restriction.
    assert!(doc.marshal_binary().is_ok());
}

#[test]
fn json_non_object_rejected() {
    let err = Document::unmarshal_json(b"[]").unwrap_err();
    assert!(matches!(err.root(), BsonError::UnhandledJson(_)), "{err}");
}

#[test]
fn json_fixed_point_with_non_finite_double() {
    let doc = Document(
        bson_types::Document::from_pairs([
            ("inf", Value::Double(f64::INFINITY)),
            ("nan", Value::Double(f64::NAN)),
            ("neg", Value::Double(-1.5)),
        ])
        .unwrap(),
    );
    let json = doc.marshal_json().unwrap();
    assert_eq!(
        json,
        r#"{"$k":["inf","nan","neg"],"inf":{"$f":"Infinity"},"nan":{"$f":"NaN"},"neg":{"$f":-1.5}}"#
    );
    let again = Document::unmarshal_json(json.as_bytes())
        .unwrap()
        .marshal_json()
        .unwrap();
    assert_eq!(again, json);
}
