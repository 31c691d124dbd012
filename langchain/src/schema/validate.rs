//! Validation of decoded JSON against a [`Schema`].

use std::collections::BTreeMap;

use serde_json::Value as Json;

use crate::parser::ParseFailure;
use crate::value::Value;

use super::{FieldSchema, FieldType, Schema};

/// Validates `json` against `schema` and returns the declared fields as a `Value::Map`.
pub fn validate(schema: &Schema, json: &Json) -> Result<Value, ParseFailure> {
    validate_object(schema, json).map(Value::Map)
}

/// Validates `json` against `schema`.
///
/// Required fields must be present and non-null; optional fields may be absent or
/// null (absent stays absent, null is kept as `Value::Null`). Values are only
/// converted across types for fields declared `coerce`. Keys not declared in the
/// schema are dropped.
pub fn validate_object(
    schema: &Schema,
    json: &Json,
) -> Result<BTreeMap<String, Value>, ParseFailure> {
    let object = json
        .as_object()
        .ok_or_else(|| ParseFailure::NotAnObject(json_type_name(json)))?;

    let mut out = BTreeMap::new();
    for field in schema.fields() {
        match object.get(&field.name) {
            None | Some(Json::Null) if field.required => {
                return Err(ParseFailure::MissingField(field.name.clone()))
            }
            None => {}
            Some(Json::Null) => {
                out.insert(field.name.clone(), Value::Null);
            }
            Some(raw) => {
                let value = check(field, &field.name, &field.ty, raw)?;
                out.insert(field.name.clone(), value);
            }
        }
    }
    Ok(out)
}

fn check(field: &FieldSchema, path: &str, ty: &FieldType, raw: &Json) -> Result<Value, ParseFailure> {
    let mismatch = || ParseFailure::TypeMismatch {
        field: path.to_string(),
        expected: ty.type_name(),
        found: json_type_name(raw),
    };

    match ty {
        FieldType::Any => Ok(Value::from(raw.clone())),
        FieldType::String => match raw {
            Json::String(s) => Ok(Value::from(s.as_str())),
            Json::Number(n) if field.coerce => Ok(Value::from(n.to_string())),
            Json::Bool(b) if field.coerce => Ok(Value::from(b.to_string())),
            _ => Err(mismatch()),
        },
        FieldType::Boolean => match raw {
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::String(s) if field.coerce => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(mismatch()),
            },
            _ => Err(mismatch()),
        },
        FieldType::Integer => {
            let n = match raw {
                Json::Number(n) => integral(n),
                Json::String(s) if field.coerce => s.trim().parse::<i64>().ok(),
                _ => None,
            }
            .ok_or_else(mismatch)?;
            check_range(field, path, n as f64)?;
            Ok(Value::from(n))
        }
        FieldType::Number => {
            let n = match raw {
                Json::Number(n) => n.as_f64(),
                Json::String(s) if field.coerce => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
                _ => None,
            }
            .ok_or_else(mismatch)?;
            check_range(field, path, n)?;
            match raw {
                Json::Number(n) => Ok(Value::Number(n.clone())),
                _ => Ok(Value::from(n)),
            }
        }
        FieldType::Enum(allowed) => match raw {
            Json::String(s) if allowed.iter().any(|a| a == s) => Ok(Value::from(s.as_str())),
            Json::String(s) => Err(ParseFailure::NotInEnum {
                field: path.to_string(),
                value: s.clone(),
                allowed: allowed.clone(),
            }),
            _ => Err(mismatch()),
        },
        FieldType::List(item) => match raw {
            Json::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| check(field, &format!("{}[{}]", path, i), item, v))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            _ => Err(mismatch()),
        },
    }
}

/// Integer value of `n`, accepting floats with no fractional part (`3.0`).
fn integral(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

fn check_range(field: &FieldSchema, path: &str, value: f64) -> Result<(), ParseFailure> {
    let out_of_range = |constraint: String| ParseFailure::OutOfRange {
        field: path.to_string(),
        value,
        constraint,
    };
    if let Some(gt) = field.greater_than {
        if value <= gt {
            return Err(out_of_range(format!("> {}", gt)));
        }
    }
    if let Some(lt) = field.less_than {
        if value >= lt {
            return Err(out_of_range(format!("< {}", lt)));
        }
    }
    Ok(())
}

pub(crate) fn json_type_name(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
