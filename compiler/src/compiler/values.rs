use querywire_model::{ast::Operator, Value};

use crate::errors::{msg, Error, Result};

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Check that `operator` is defined for the type of `value`.
///
/// Pattern operators only apply to strings and ordering operators never apply to booleans.
/// Nulls are expressed with the `null`/`notnull` operators instead of a value.
pub fn check_operand(column: &str, operator: Operator, value: &Value) -> Result<()> {
    let is_defined = match value {
        Value::String(_) => true,
        Value::Number(_) => !operator.is_pattern(),
        Value::Bool(_) => !operator.is_pattern() && !operator.is_ordering(),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    };
    if is_defined {
        Ok(())
    } else {
        Err(Error::malformed_condition(msg::operator_value_mismatch(
            column,
            operator.code(),
            kind_name(value),
        )))
    }
}

pub fn check_list(column: &str, operator: &str, values: &[Value]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::malformed_condition(msg::empty_value_list(
            column, operator,
        )));
    }
    match values.iter().find(|value| !is_scalar(value)) {
        Some(value) => Err(Error::malformed_condition(msg::operator_value_mismatch(
            column,
            operator,
            kind_name(value),
        ))),
        None => Ok(()),
    }
}

/// Entity addressing takes a resource name or a record id.
pub fn check_entity_value(column: &str, value: &Value) -> Result<()> {
    match value {
        Value::String(_) | Value::Number(_) => Ok(()),
        other => Err(Error::malformed_condition(msg::invalid_entity_value(
            column,
            kind_name(other),
        ))),
    }
}

/// Values which may identify a single record in a path segment.
pub fn is_identifier(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(_) => true,
        _ => false,
    }
}
