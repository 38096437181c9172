use querywire_model::{
    ast::{Condition, Predicate},
    tokens::*,
};

use crate::{
    errors::{msg, Error, Result},
    http::Dialect,
};

use super::values::{check_entity_value, check_list, check_operand};

/// Convert a condition into its query parameter.
pub fn convert_condition(condition: &Condition, dialect: &dyn Dialect) -> Result<(String, String)> {
    let is_or = condition.is_or();
    let key = |column: &str, operator: &str| dialect.condition_key(column, operator, is_or);
    let param = match &condition.predicate {
        Predicate::Basic {
            column,
            operator,
            value,
        } => {
            check_operand(column, *operator, value)?;
            (key(column, operator.code()), dialect.scalar_value(value))
        }
        Predicate::In { column, values } => {
            check_list(column, OP_IN, values)?;
            (key(column, OP_IN), dialect.list_value(values))
        }
        Predicate::NotIn { column, values } => {
            check_list(column, OP_NOT_IN, values)?;
            (key(column, OP_NOT_IN), dialect.list_value(values))
        }
        Predicate::Null { column } => (key(column, OP_NULL), String::new()),
        Predicate::NotNull { column } => (key(column, OP_NOT_NULL), String::new()),
        Predicate::Entity { column, value } => {
            if column != ENTITY_NAME && column != ENTITY_ID {
                return Err(Error::malformed_condition(msg::invalid_entity_column(
                    column,
                )));
            }
            if is_or {
                return Err(Error::malformed_condition(msg::entity_joined_via_or(
                    column,
                )));
            }
            check_entity_value(column, value)?;
            (column.clone(), dialect.scalar_value(value))
        }
    };
    Ok(param)
}
