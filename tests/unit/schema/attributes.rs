use super::*;
use crate::schema::shape::Field;

#[test]
fn kind_table_shadows_common() {
    let schema = AttributeSchema::new()
        .with_common("width", Shape::Number)
        .with_kind_attr("Text", "width", Shape::Int32)
        .with_kind_attr("Button", "label", Shape::String);

    assert_eq!(schema.lookup("Text", "width"), Some(&Shape::Int32));
    assert_eq!(schema.lookup("Button", "width"), Some(&Shape::Number));
    assert_eq!(schema.lookup("Button", "label"), Some(&Shape::String));
    assert_eq!(schema.lookup("Text", "label"), None);
}

#[test]
fn parses_from_json() {
    let schema = AttributeSchema::from_json(
        r#"{
            "common": { "opacity": "number", "id": { "optional": "string" } },
            "kinds": {
                "Button": {
                    "type": { "union": ["int32", "string"] },
                    "options": { "record": [
                        { "name": "stateEffect", "shape": "boolean" },
                        { "name": "labels", "shape": { "array": "string" } }
                    ] }
                }
            }
        }"#,
    )
    .unwrap();

    assert_eq!(
        schema.lookup("Row", "id"),
        Some(&Shape::optional(Shape::String))
    );
    assert_eq!(
        schema.lookup("Button", "options"),
        Some(&Shape::Record(vec![
            Field::new("stateEffect", Shape::Boolean),
            Field::new("labels", Shape::array(Shape::String)),
        ]))
    );
}

#[test]
fn invalid_shapes_are_rejected() {
    let err = AttributeSchema::from_json(r#"{ "common": { "bad": { "union": [] } } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("validation error"));
    assert!(err.to_string().contains("*.bad"));

    let dup = Shape::Record(vec![
        Field::new("a", Shape::Int8),
        Field::new("a", Shape::Int8),
    ]);
    assert!(dup.validate().is_err());

    let err = AttributeSchema::from_json(r#"{ "common": { "empty": { "record": [] } } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("at least one field"), "{err}");
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = AttributeSchema::from_json("{").unwrap_err();
    assert!(matches!(err, MockError::Serde(_)));
}
