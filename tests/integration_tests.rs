use chrono::{TimeZone, Utc};
use serde_jslit::{
    serialize, serialize_to_module, serialize_to_module_with_options, serialize_with_options,
    Error, Object, Options, Reference, Value,
};

fn shared_fixture(thr_ee: Value) -> Value {
    let r = Object::new();
    r.insert("one", true);
    r.insert("thr-ee", thr_ee);

    let c = Object::new();
    c.insert("d", r.clone());

    Value::object([("a", r.clone()), ("b", r), ("c", c)])
}

#[test]
fn test_function_only() {
    let source = "function log (arg) {\n\tconsole.log(JSON.stringify(arg));\n}";
    assert_eq!(serialize(&Value::function(source)).unwrap(), source);
}

#[test]
fn test_string_only() {
    let res = serialize(&Value::from("string's\nnew\t line")).unwrap();
    assert_eq!(res, "'string\\'s\nnew\t line'");
}

#[test]
fn test_number_only() {
    assert_eq!(serialize(&Value::from(3.1415)).unwrap(), "3.1415");
}

#[test]
fn test_boolean_only() {
    assert_eq!(serialize(&Value::from(true)).unwrap(), "true");
}

#[test]
fn test_undefined_only() {
    assert_eq!(serialize(&Value::Undefined).unwrap(), "undefined");
}

#[test]
fn test_null_only() {
    assert_eq!(serialize(&Value::Null).unwrap(), "null");
}

#[test]
fn test_regex_only() {
    let re = Value::regexp("test(?:it)?", "ig").unwrap();
    assert_eq!(serialize(&re).unwrap(), "/test(?:it)?/gi");
}

#[test]
fn test_date_only() {
    let instant = Utc.timestamp_millis_opt(24 * 12 * 3_600_000).unwrap();
    assert_eq!(
        serialize(&Value::date(instant)).unwrap(),
        "new Date('1970-01-13T00:00:00.000Z')"
    );
}

#[test]
fn test_error_only() {
    assert_eq!(
        serialize(&Value::error("error")).unwrap(),
        "new Error('error')"
    );
}

#[test]
fn test_empty_error_only() {
    assert_eq!(serialize(&Value::error("")).unwrap(), "new Error()");
}

#[test]
fn test_buffer_only() {
    assert_eq!(
        serialize(&Value::buffer(b"buffer".to_vec())).unwrap(),
        "new Buffer('YnVmZmVy', 'base64')"
    );
}

#[test]
fn test_empty_buffer_only() {
    assert_eq!(
        serialize(&Value::buffer(Vec::new())).unwrap(),
        "new Buffer('', 'base64')"
    );
}

#[test]
fn test_array_of_primitives() {
    let a = Value::array([
        Value::from(true),
        Value::from(false),
        Value::Undefined,
        Value::from(1),
        Value::from(3.1415),
        Value::from(-17),
        Value::from("string"),
    ]);
    assert_eq!(
        serialize(&a).unwrap(),
        "[true, false, undefined, 1, 3.1415, -17, 'string']"
    );
}

#[test]
fn test_object_of_primitives() {
    let o = Value::object([
        ("one", Value::from(true)),
        ("two", Value::from(false)),
        ("thr-ee", Value::Undefined),
        ("four", Value::from(1)),
        ("5", Value::from(3.1415)),
        ("six", Value::from(-17)),
        ("seven", Value::from("string")),
    ]);
    assert_eq!(
        serialize(&o).unwrap(),
        "{'5': 3.1415, one: true, two: false, 'thr-ee': undefined, four: 1, six: -17, seven: 'string'}"
    );
}

#[test]
fn test_empty_object() {
    assert_eq!(serialize(&Value::from(Object::new())).unwrap(), "{}");
}

#[test]
fn test_empty_array() {
    assert_eq!(serialize(&Value::array(Vec::<Value>::new())).unwrap(), "[]");
}

#[test]
fn test_object_of_objects_without_references() {
    let r = Object::new();
    r.insert("one", true);
    r.insert("thr-ee", Value::Undefined);
    let o = Value::object([("a", r.clone()), ("b", r)]);

    assert_eq!(
        serialize(&o).unwrap(),
        "{'a': {one: true, 'thr-ee': undefined}, 'b': {one: true, 'thr-ee': undefined}}"
    );
}

#[test]
fn test_object_of_objects_using_references() {
    let o = shared_fixture(Value::Undefined);
    let out = serialize_with_options(&o, &Options::new().with_reference(true)).unwrap();

    assert_eq!(out.text, "{'a': {one: true, 'thr-ee': undefined}, 'c': {}}");

    let pairs: Vec<(String, String)> = out.references.iter().map(Reference::as_pair).collect();
    assert_eq!(
        pairs,
        vec![
            ("b".to_string(), "a".to_string()),
            ("c.d".to_string(), "a".to_string()),
        ]
    );
}

#[test]
fn test_equal_but_distinct_objects_are_not_references() {
    let make = || {
        let o = Object::new();
        o.insert("x", 1);
        o
    };
    let root = Value::object([("a", make()), ("b", make())]);
    let out = serialize_with_options(&root, &Options::new().with_reference(true)).unwrap();

    assert_eq!(out.text, "{'a': {x: 1}, 'b': {x: 1}}");
    assert!(out.references.is_empty());
}

#[test]
fn test_circular_object_fails() {
    let a = Object::new();
    a.insert("b", Object::new());
    let o = Object::new();
    o.insert("a", a.clone());
    a.insert("b", a.clone());

    let err = serialize(&o.into()).unwrap_err();
    assert!(err.is_circular());
    assert!(err.to_string().contains("can not convert circular structures"));
    assert!(err.to_string().contains("a.b"));
}

#[test]
fn test_circular_array_fails() {
    let list = serde_jslit::Array::new();
    list.push(1);
    list.push(list.clone());

    let err = serialize(&list.into()).unwrap_err();
    assert_eq!(
        err,
        Error::CircularStructure {
            path: "1".to_string()
        }
    );
}

#[test]
fn test_circular_object_fails_in_module_mode() {
    let o = Object::new();
    o.insert("self", o.clone());
    assert!(serialize_to_module(&o.into()).unwrap_err().is_circular());
}

#[test]
fn test_unsupported_value_nested_in_container() {
    let root = Value::object([(
        "list",
        Value::array([Value::from(1), Value::foreign("Symbol")]),
    )]);

    let err = serialize(&root).unwrap_err();
    match err {
        Error::UnsupportedType(msg) => {
            assert!(msg.contains("Symbol"));
            assert!(msg.contains("list.1"));
        }
        other => panic!("expected unsupported type, got {:?}", other),
    }
}

#[test]
fn test_module_object_of_objects() {
    let o = shared_fixture(Value::Undefined);
    let res = serialize_to_module_with_options(&o, &Options::new()).unwrap();
    assert_eq!(
        res,
        "var m = module.exports = {'a': {one: true, 'thr-ee': undefined}, 'c': {}};\nm.b = m.a;\nm.c.d = m.a;"
    );
}

#[test]
fn test_module_object_of_objects_beautify() {
    let o = shared_fixture(Value::regexp("^test$", "").unwrap());
    let res = serialize_to_module(&o).unwrap();
    assert_eq!(
        res,
        "var m = module.exports = {\n\t'a': {\n\t\tone: true,\n\t\t'thr-ee': /^test$/\n\t},\n\t'c': {}\n};\nm.b = m.a;\nm.c.d = m.a;"
    );
}

#[test]
fn test_module_without_shared_values() {
    let c = Object::new();
    c.insert("d", Value::object([("one", true)]));
    let o = Value::object([("a", Value::object([("one", true)])), ("c", c.into())]);

    assert_eq!(
        serialize_to_module(&o).unwrap(),
        "var m = module.exports = {\n\t'a': {\n\t\tone: true\n\t},\n\t'c': {\n\t\t'd': {\n\t\t\tone: true\n\t\t}\n\t}\n};"
    );
}

#[test]
fn test_module_aliases_into_quoted_paths() {
    let shared = Object::new();
    let inner = Object::new();
    inner.insert("it's", shared.clone());
    let root = Value::object([("first", shared), ("we-ird", inner)]);

    let res = serialize_to_module_with_options(&root, &Options::new()).unwrap();
    assert_eq!(
        res,
        "var m = module.exports = {'first': {}, 'we-ird': {}};\nm['we-ird']['it\\'s'] = m.first;"
    );
}

#[test]
fn test_concurrent_calls_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let shared = Object::new();
                shared.insert("n", i);
                let root = Value::object([("a", shared.clone()), ("b", shared)]);
                serialize_to_module_with_options(&root, &Options::new()).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(
            out,
            format!("var m = module.exports = {{'a': {{n: {}}}}};\nm.b = m.a;", i)
        );
    }
}

#[test]
fn test_json_document_renders_as_literal() {
    let doc = serde_json::json!({
        "name": "fixture",
        "10": null,
        "2": [1.5, true],
        "nested-key": { "ok": "it's" }
    });

    let value = serde_jslit::to_value(&doc).unwrap();
    assert_eq!(
        serialize(&value).unwrap(),
        "{'2': [1.5, true], '10': null, name: 'fixture', 'nested-key': {ok: 'it\\'s'}}"
    );
}
