use crate::json_util::array_from_string;
use crate::json_util::array_to_string;
use crate::json_util::object_from_string;
use crate::json_util::object_to_string;
use crate::json_util::value_from_string;
use crate::json_util::value_to_string;
use crate::json_util::JsonFormat;

mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  use crate::error::JsonError;
  use crate::jsonarray::JsonArray;
  use crate::jsonobject::JsonObject;
  use crate::jsonvalue::JsonValue;

  fn d_string(s: &str) -> JsonValue {
    JsonValue::from(s)
  }

  // --- Serialization Tests ---

  #[test]
  fn test_array_to_string_compact() {
    let arr = JsonArray::from(vec![JsonValue::from(1), d_string("two"), JsonValue::Null, JsonValue::from(true)]);
    assert_eq!(array_to_string(&arr, JsonFormat::Compact), r#"[1,"two",null,true]"#);
  }

  #[test]
  fn test_array_to_string_indented() {
    let arr = JsonArray::from([1, 2]);
    assert_eq!(array_to_string(&arr, JsonFormat::Indented), "[\n  1,\n  2\n]");
    assert_eq!(JsonFormat::default(), JsonFormat::Indented);
  }

  #[test]
  fn test_empty_array_to_string() {
    assert_eq!(array_to_string(&JsonArray::new(), JsonFormat::Compact), "[]");
  }

  #[test]
  fn test_nested_containers_to_string() {
    let mut inner = JsonObject::new();
    inner.insert("b", 2);
    inner.insert("a", JsonArray::from(["x"]));
    let mut arr = JsonArray::new();
    arr.append(inner);
    arr.append(JsonArray::new());
    // keys come out sorted
    assert_eq!(array_to_string(&arr, JsonFormat::Compact), r#"[{"a":["x"],"b":2},[]]"#);
  }

  #[test]
  fn test_escaping_is_left_to_the_writer() {
    let arr = JsonArray::from(["quote\"back\\slash\nline"]);
    assert_eq!(array_to_string(&arr, JsonFormat::Compact), r#"["quote\"back\\slash\nline"]"#);
  }

  #[test]
  fn test_value_to_string() {
    assert_eq!(value_to_string(&JsonValue::Undefined, JsonFormat::Compact), "null");
    assert_eq!(value_to_string(&JsonValue::from(0.5), JsonFormat::Compact), "0.5");
    assert_eq!(value_to_string(&JsonValue::from(-0.0), JsonFormat::Compact), "-0.0");
  }

  #[test]
  fn test_object_to_string() {
    let mut obj = JsonObject::new();
    obj.insert("name", "test");
    obj.insert("nothing", JsonValue::Null);
    obj.insert("gone", JsonValue::Undefined);
    assert_eq!(object_to_string(&obj, JsonFormat::Compact), r#"{"name":"test","nothing":null}"#);
  }

  // --- Deserialization Tests ---

  #[test]
  fn test_array_from_string() {
    let arr = array_from_string(r#" [1, 2.5, "x", null, [true], {"k": false}] "#).expect("parse");
    assert_eq!(arr.len(), 6);
    assert_eq!(arr.at(0), JsonValue::from(1));
    assert_eq!(arr.at(1), JsonValue::from(2.5));
    assert_eq!(arr.at(2), d_string("x"));
    assert!(arr.at(3).is_null());
    assert_eq!(arr.at(4).to_array(), JsonArray::from([true]));
    assert_eq!(arr.at(5).to_object().value("k"), JsonValue::from(false));
  }

  #[test]
  fn test_array_round_trip() {
    let text = r#"[1,[2,[3]],{"a":"b"},"s",false,null,1.25]"#;
    let arr = array_from_string(text).expect("parse");
    assert_eq!(array_to_string(&arr, JsonFormat::Compact), text);
    assert_eq!(array_from_string(&arr.to_string()).expect("parse"), arr);
  }

  #[test]
  fn test_array_from_string_wrong_type() {
    match array_from_string(r#"{"a":1}"#) {
      Err(JsonError::WrongType { expected, found }) => {
        assert_eq!(expected, "array");
        assert_eq!(found, "object");
      }
      other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(object_from_string("[1]"), Err(JsonError::WrongType { found: "array", .. })));
    assert!(matches!(array_from_string("2.5"), Err(JsonError::WrongType { found: "double", .. })));
    assert!(matches!(array_from_string("null"), Err(JsonError::WrongType { found: "null", .. })));
  }

  #[test]
  fn test_array_from_string_malformed() {
    assert!(matches!(array_from_string("[1,"), Err(JsonError::Parse(_))));
    assert!(matches!(array_from_string(""), Err(JsonError::Parse(_))));
    assert!(matches!(array_from_string("[1] x"), Err(JsonError::Parse(_))));
  }

  #[test]
  fn test_object_from_string() {
    let obj = object_from_string(r#"{"z": 1, "a": [1, 2]}"#).expect("parse");
    assert_eq!(obj.keys(), vec!["a".to_string(), "z".to_string()]);
    assert_eq!(obj.value("a").to_array().len(), 2);
    assert!(obj.value("missing").is_undefined());
  }

  #[test]
  fn test_value_from_string() {
    assert_eq!(value_from_string("\"hi\"").expect("parse"), d_string("hi"));
    assert_eq!(value_from_string("3").expect("parse"), JsonValue::from(3));
    assert!(value_from_string("nul").is_err());
  }
}
