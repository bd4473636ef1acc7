//! Plain key/value rendering of entities.
//!
//! Every serializable type lists its own fields explicitly. References to
//! other entities must already be loaded (see [`crate::db::models`]), so the
//! walk only follows what the loader put in memory.

use serde_json::{Map, Value};

use crate::phone::PhoneNumber;

/// Key added next to the fields of a nested reference.
pub const DISPLAY_KEY: &str = "__str__";

pub enum FieldValue<'a> {
    Plain(Value),
    Phone(Option<PhoneNumber>),
    Reference(Option<&'a dyn Serializable>),
}

impl<'a> FieldValue<'a> {
    /// For scalar, string and chrono field values. Their `Serialize` impls
    /// never fail, so the `Null` fallback is unreachable for entity fields.
    pub fn plain(value: impl serde::Serialize) -> Self {
        FieldValue::Plain(serde_json::to_value(value).unwrap_or(Value::Null))
    }
}

pub trait Serializable {
    /// Declared fields in order, excluded ones included.
    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)>;

    /// Human-readable label. `None` only for phone numbers without a number.
    fn display(&self) -> Option<String>;

    fn excluded_fields(&self) -> &'static [&'static str] {
        &[]
    }

    fn serialize(&self) -> Map<String, Value>
    where
        Self: Sized,
    {
        to_map(self)
    }
}

pub fn to_map(record: &dyn Serializable) -> Map<String, Value> {
    let excluded = record.excluded_fields();
    let mut serialized = Map::new();

    for (name, value) in record.fields() {
        if excluded.contains(&name) {
            continue;
        }
        let value = match value {
            FieldValue::Plain(value) => value,
            FieldValue::Phone(number) => number
                .map(|n| Value::String(n.to_string()))
                .unwrap_or(Value::Null),
            FieldValue::Reference(None) => Value::Null,
            FieldValue::Reference(Some(related)) => {
                let mut nested = to_map(related);
                nested.insert(
                    DISPLAY_KEY.to_string(),
                    related.display().map(Value::String).unwrap_or(Value::Null),
                );
                Value::Object(nested)
            }
        };
        serialized.insert(name.to_string(), value);
    }

    serialized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Leaf {
        name: &'static str,
        secret: &'static str,
    }

    impl Serializable for Leaf {
        fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
            vec![
                ("name", FieldValue::plain(self.name)),
                ("secret", FieldValue::plain(self.secret)),
            ]
        }

        fn display(&self) -> Option<String> {
            Some(format!("leaf {}", self.name))
        }

        fn excluded_fields(&self) -> &'static [&'static str] {
            &["secret"]
        }
    }

    struct Branch {
        leaf: Option<Leaf>,
        phone: Option<PhoneNumber>,
    }

    impl Serializable for Branch {
        fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
            vec![
                (
                    "leaf",
                    FieldValue::Reference(self.leaf.as_ref().map(|l| l as &dyn Serializable)),
                ),
                ("phone", FieldValue::Phone(self.phone.clone())),
            ]
        }

        fn display(&self) -> Option<String> {
            Some("branch".to_string())
        }
    }

    #[test]
    fn test_excluded_fields_are_omitted() {
        let leaf = Leaf { name: "a", secret: "x" };
        let map = leaf.serialize();
        assert_eq!(Value::Object(map), json!({ "name": "a" }));
    }

    #[test]
    fn test_reference_is_nested_with_display_key() {
        let branch = Branch {
            leaf: Some(Leaf { name: "a", secret: "x" }),
            phone: Some("+13125550100".parse().unwrap()),
        };
        let map = branch.serialize();
        assert_eq!(
            Value::Object(map),
            json!({
                "leaf": { "name": "a", "__str__": "leaf a" },
                "phone": "(312) 555-0100",
            })
        );
    }

    #[test]
    fn test_missing_reference_is_null_without_display_key() {
        let branch = Branch { leaf: None, phone: None };
        let map = branch.serialize();
        assert_eq!(map.get("leaf"), Some(&Value::Null));
        assert_eq!(map.get("phone"), Some(&Value::Null));
        assert!(!map.contains_key(DISPLAY_KEY));
    }

    #[test]
    fn test_plain_renders_entity_field_types() {
        let date = chrono::NaiveDate::from_ymd_opt(2015, 6, 4);
        let time = chrono::NaiveTime::from_hms_opt(18, 30, 0);
        let archived: Option<chrono::DateTime<chrono::Utc>> = None;

        let rendered: Vec<Value> = [
            FieldValue::plain(7),
            FieldValue::plain(true),
            FieldValue::plain("Parish hall"),
            FieldValue::plain(date),
            FieldValue::plain(time),
            FieldValue::plain(archived),
        ]
        .into_iter()
        .map(|value| match value {
            FieldValue::Plain(value) => value,
            _ => panic!("expected a plain value"),
        })
        .collect();

        assert_eq!(
            rendered,
            [
                json!(7),
                json!(true),
                json!("Parish hall"),
                json!("2015-06-04"),
                json!("18:30:00"),
                Value::Null,
            ]
        );
    }
}
