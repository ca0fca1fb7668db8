use serde_hcl_encoder::{hcl_value, to_string, Map, Number, Value};

#[test]
fn test_hcl_value_null() {
    assert_eq!(hcl_value!(null), Value::Null);
}

#[test]
fn test_hcl_value_booleans() {
    assert_eq!(hcl_value!(true), Value::Bool(true));
    assert_eq!(hcl_value!(false), Value::Bool(false));
}

#[test]
fn test_hcl_value_numbers() {
    assert_eq!(hcl_value!(42), Value::Number(Number::Int(42)));
    assert_eq!(hcl_value!(-123), Value::Number(Number::Int(-123)));
    assert_eq!(hcl_value!(3.5), Value::Number(Number::Float(3.5)));
}

#[test]
fn test_hcl_value_strings() {
    assert_eq!(hcl_value!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(hcl_value!(""), Value::String(String::new()));
}

#[test]
fn test_hcl_value_sequences() {
    assert_eq!(hcl_value!([]), Value::Seq(vec![]));
    assert_eq!(
        hcl_value!([1, "two", true, null]),
        Value::Seq(vec![
            Value::Number(Number::Int(1)),
            Value::String("two".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_hcl_value_maps() {
    assert_eq!(hcl_value!({}), Value::Map(Map::new()));

    let value = hcl_value!({
        "name": "web",
        "ports": [80, 443],
        "tags": { "env": "prod" }
    });
    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("name").and_then(Value::as_str), Some("web"));
    assert!(map.get("tags").and_then(Value::as_map).is_some());
}

#[test]
fn test_hcl_value_variables() {
    let region = "eu-west-1";
    let replicas = 3u8;
    let value = hcl_value!({ "region": region, "replicas": replicas });
    let map = value.as_map().unwrap();
    assert_eq!(map.get("region"), Some(&Value::from("eu-west-1")));
    assert_eq!(map.get("replicas"), Some(&Value::from(3u8)));
}

#[test]
fn test_hcl_value_encodes_as_body() {
    let value = hcl_value!({
        "tags": { "team": "core", "env": "prod" },
        "enabled": true,
        "zones": ["a", "b"]
    });
    assert_eq!(
        to_string(&value).unwrap(),
        "enabled = true\ntags    = { \"env\" = \"prod\", \"team\" = \"core\" }\nzones   = [\"a\", \"b\"]\n"
    );
}
