//! Presence-checked field access on profile documents.
//!
//! Every helper takes the dotted path of the object it reads from so that
//! errors name the exact field, e.g. `positions.values[2].company.name`.
//! A key holding JSON `null` counts as absent.

use crate::error::{LinkedInError, LinkedInResult};
use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Value stored under `key`, if present and not null.
pub(crate) fn field<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

pub(crate) fn required<'a>(
    object: &'a Object,
    parent: &str,
    key: &str,
) -> LinkedInResult<&'a Value> {
    field(object, key).ok_or_else(|| LinkedInError::MissingField(join(parent, key)))
}

/// Stringify a scalar. Objects and arrays are rejected.
pub(crate) fn text(value: &Value, path: impl FnOnce() -> String) -> LinkedInResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(LinkedInError::UnexpectedType {
            field: path(),
            expected: "a string",
        }),
    }
}

pub(crate) fn required_text(object: &Object, parent: &str, key: &str) -> LinkedInResult<String> {
    text(required(object, parent, key)?, || join(parent, key))
}

pub(crate) fn optional_text(
    object: &Object,
    parent: &str,
    key: &str,
) -> LinkedInResult<Option<String>> {
    field(object, key)
        .map(|value| text(value, || join(parent, key)))
        .transpose()
}

/// Text extraction that never fails: non-scalar values are ignored.
pub(crate) fn lenient_text(object: &Object, key: &str) -> Option<String> {
    field(object, key).and_then(|value| text(value, String::new).ok())
}

pub(crate) fn as_object<'a>(
    value: &'a Value,
    path: impl FnOnce() -> String,
) -> LinkedInResult<&'a Object> {
    value.as_object().ok_or_else(|| LinkedInError::UnexpectedType {
        field: path(),
        expected: "an object",
    })
}

pub(crate) fn required_object<'a>(
    object: &'a Object,
    parent: &str,
    key: &str,
) -> LinkedInResult<&'a Object> {
    as_object(required(object, parent, key)?, || join(parent, key))
}

/// Nested object under `key`, if present. A scalar or array there is an error.
pub(crate) fn optional_object<'a>(
    object: &'a Object,
    parent: &str,
    key: &str,
) -> LinkedInResult<Option<&'a Object>> {
    field(object, key)
        .map(|value| as_object(value, || join(parent, key)))
        .transpose()
}

pub(crate) fn required_bool(object: &Object, parent: &str, key: &str) -> LinkedInResult<bool> {
    required(object, parent, key)?
        .as_bool()
        .ok_or_else(|| LinkedInError::UnexpectedType {
            field: join(parent, key),
            expected: "a boolean",
        })
}

/// Elements of a `{"_total": n, "values": [...]}` collection stored under `key`.
///
/// Returns `Ok(None)` when the key is absent. An empty collection comes back
/// from the API without a `values` array and yields an empty slice.
pub(crate) fn collection<'a>(
    object: &'a Object,
    key: &str,
) -> LinkedInResult<Option<&'a [Value]>> {
    let Some(value) = field(object, key) else {
        return Ok(None);
    };

    let container = as_object(value, || key.to_string())?;
    match field(container, "values") {
        None => Ok(Some(&[][..])),
        Some(Value::Array(values)) => Ok(Some(values.as_slice())),
        Some(_) => Err(LinkedInError::UnexpectedType {
            field: join(key, "values"),
            expected: "an array",
        }),
    }
}

/// Map every element of the collection under `key`, stopping at the first error.
pub(crate) fn map_collection<T>(
    object: &Object,
    key: &str,
    mut map: impl FnMut(&Object, &str) -> LinkedInResult<T>,
) -> LinkedInResult<Option<Vec<T>>> {
    let Some(values) = collection(object, key)? else {
        return Ok(None);
    };

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let path = format!("{}.values[{}]", key, index);
            let element = as_object(value, || path.clone())?;
            map(element, &path)
        })
        .collect::<LinkedInResult<Vec<T>>>()
        .map(Some)
}
