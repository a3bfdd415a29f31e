//! Schema - Declarative tool parameter validation
//!
//! Each tool declares its inputs as a list of [`ParamSpec`]s. A schema
//! validates a raw JSON object, fills in documented defaults, and hands the
//! normalized object to `serde` for conversion into the tool's typed
//! parameter struct. The same schema renders the JSON Schema an LLM sees.
//!
//! Lax coercion is applied the way function-calling models need it:
//! numeric strings are accepted for integers and `"true"`/`"false"` for
//! booleans. Unknown fields are ignored.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Date format accepted by `ParamKind::Date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex")
});

/// Type of a single parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free text
    String,
    /// E-mail address
    Email,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Non-negative integer
    Integer,
    /// Boolean flag
    Boolean,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            Self::String | Self::Email | Self::Date => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    fn json_format(self) -> Option<&'static str> {
        match self {
            Self::Email => Some("email"),
            Self::Date => Some("date"),
            _ => None,
        }
    }
}

/// Declaration of one named parameter
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Field name
    pub name: &'static str,
    /// Field type
    pub kind: ParamKind,
    /// Whether the field must be present
    pub required: bool,
    /// Value used when an optional field is absent (`null` if unset)
    pub default: Option<Value>,
    /// Description shown to the model
    pub description: &'static str,
}

impl ParamSpec {
    /// A required field
    #[must_use]
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    /// An optional field defaulting to `null`
    #[must_use]
    pub fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    /// Set the default for an optional field
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    fn check(&self, value: &Value) -> Result<Value> {
        let malformed = |expected: &str| {
            Error::Validation(format!(
                "field '{}' must be {}, got {}",
                self.name, expected, value
            ))
        };

        match self.kind {
            ParamKind::String => {
                let s = value.as_str().ok_or_else(|| malformed("a string"))?;
                if self.required && s.trim().is_empty() {
                    return Err(Error::Validation(format!(
                        "field '{}' must not be empty",
                        self.name
                    )));
                }
                Ok(Value::String(s.to_string()))
            }
            ParamKind::Email => {
                let s = value.as_str().ok_or_else(|| malformed("a string"))?.trim();
                if !EMAIL_RE.is_match(s) {
                    return Err(malformed("a valid email address"));
                }
                Ok(Value::String(s.to_string()))
            }
            ParamKind::Date => {
                let s = value.as_str().ok_or_else(|| malformed("a string"))?.trim();
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map_err(|_| malformed("a date in YYYY-MM-DD format"))?;
                Ok(Value::String(s.to_string()))
            }
            ParamKind::Integer => {
                let n = match value {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => s.trim().parse::<u64>().ok(),
                    _ => None,
                };
                n.map(Value::from)
                    .ok_or_else(|| malformed("a non-negative integer"))
            }
            ParamKind::Boolean => match value {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
                _ => Err(malformed("a boolean")),
            },
        }
    }
}

/// Ordered set of parameter declarations
#[derive(Debug, Clone, Default)]
pub struct ParamSchema {
    params: Vec<ParamSpec>,
}

impl ParamSchema {
    /// Create a schema from its fields
    #[must_use]
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    /// Schema with no parameters
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declared fields, in order
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Look up a field declaration
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Validate `input` and return the normalized object with defaults applied
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>> {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(Error::Validation("input must be an object".to_string()));
            }
        };

        let mut normalized = Map::with_capacity(self.params.len());
        for spec in &self.params {
            let value = match object.get(spec.name) {
                None | Some(Value::Null) if spec.required => {
                    return Err(Error::Validation(format!(
                        "missing required field '{}'",
                        spec.name
                    )));
                }
                None | Some(Value::Null) => spec.default.clone().unwrap_or(Value::Null),
                Some(value) => spec.check(value)?,
            };
            normalized.insert(spec.name.to_string(), value);
        }
        Ok(normalized)
    }

    /// Validate `input` and deserialize it into `T`
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T> {
        let normalized = self.validate(input)?;
        serde_json::from_value(Value::Object(normalized))
            .map_err(|e| Error::Validation(e.to_string()))
    }

    /// Render as a JSON Schema object for LLM function definitions
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for spec in &self.params {
            let mut prop = serde_json::json!({
                "type": spec.kind.json_type(),
                "description": spec.description,
            });
            if let Some(format) = spec.kind.json_format() {
                prop["format"] = Value::from(format);
            }
            if let Some(default) = &spec.default {
                prop["default"] = default.clone();
            }
            properties.insert(spec.name.to_string(), prop);
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn schema() -> ParamSchema {
        ParamSchema::new(vec![
            ParamSpec::required("name", ParamKind::String, "Name"),
            ParamSpec::required("email", ParamKind::Email, "Email"),
            ParamSpec::required("date", ParamKind::Date, "Date"),
            ParamSpec::required("bags", ParamKind::Integer, "Bags"),
            ParamSpec::optional("note", ParamKind::String, "Note"),
            ParamSpec::optional("flexible", ParamKind::Boolean, "Flexible")
                .with_default(json!(false)),
        ])
    }

    fn valid() -> Value {
        json!({
            "name": "Jane Doe",
            "email": "jane.doe@example.com",
            "date": "2023-11-01",
            "bags": 1
        })
    }

    #[test]
    fn test_defaults_applied() {
        let out = schema().validate(&valid()).unwrap();
        assert_eq!(out["note"], Value::Null);
        assert_eq!(out["flexible"], json!(false));
    }

    #[test]
    fn test_every_required_field_is_enforced() {
        let schema = schema();
        for spec in schema.params().iter().filter(|p| p.required) {
            let mut input = valid();
            input.as_object_mut().unwrap().remove(spec.name);
            let err = schema.validate(&input).unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains(spec.name));
        }
    }

    #[test]
    fn test_null_required_field_rejected() {
        let mut input = valid();
        input["name"] = Value::Null;
        assert!(schema().validate(&input).is_err());
    }

    #[test]
    fn test_malformed_email() {
        for bad in ["jane", "jane@", "@example.com", "jane doe@example.com"] {
            let mut input = valid();
            input["email"] = json!(bad);
            assert!(schema().validate(&input).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_malformed_date() {
        let mut input = valid();
        input["date"] = json!("11/01/2023");
        assert!(schema().validate(&input).is_err());
        input["date"] = json!("2023-02-30");
        assert!(schema().validate(&input).is_err());
    }

    #[test]
    fn test_integer_coercion() {
        let mut input = valid();
        input["bags"] = json!("2");
        assert_eq!(schema().validate(&input).unwrap()["bags"], json!(2));
        input["bags"] = json!(-1);
        assert!(schema().validate(&input).is_err());
        input["bags"] = json!(1.5);
        assert!(schema().validate(&input).is_err());
    }

    #[test]
    fn test_boolean_coercion() {
        let mut input = valid();
        input["flexible"] = json!("TRUE");
        assert_eq!(schema().validate(&input).unwrap()["flexible"], json!(true));
        input["flexible"] = json!("maybe");
        assert!(schema().validate(&input).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(schema().validate(&json!("text")).is_err());
        assert!(ParamSchema::empty().validate(&Value::Null).is_ok());
    }

    #[test]
    fn test_parse_typed() {
        #[derive(Deserialize)]
        struct Params {
            name: String,
            bags: u32,
            note: Option<String>,
            flexible: bool,
        }

        let params: Params = schema().parse(&valid()).unwrap();
        assert_eq!(params.name, "Jane Doe");
        assert_eq!(params.bags, 1);
        assert!(params.note.is_none());
        assert!(!params.flexible);
    }

    #[test]
    fn test_json_schema_render() {
        let rendered = schema().to_json_schema();
        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["properties"]["email"]["format"], "email");
        assert_eq!(rendered["properties"]["flexible"]["default"], json!(false));
        let required = rendered["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(!required.contains(&json!("note")));
    }
}
