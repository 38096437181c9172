use querywire_model::{
    ast::{Condition, Conjunction, Insert, InsertSource, Operator, Predicate, Query},
    tokens::COLUMN_ID,
    Map, Value,
};

use crate::{
    errors::{msg, Error, Result},
    http::{Dialect, Method, Request},
};

use super::values::is_identifier;

const UPDATE: &str = "update";
const DELETE: &str = "delete";
const PATH_SEPARATOR: char = '/';

pub fn compile_insert(query: &Query, insert: &Insert, dialect: &dyn Dialect) -> Result<Request> {
    if insert.or_ignore {
        return Err(Error::unsupported(msg::insert_or_ignore_unsupported()));
    }
    let body = match &insert.source {
        InsertSource::Values(body) => body.clone(),
        InsertSource::Subquery(_) => {
            return Err(Error::unsupported(msg::subquery_insert_unsupported()))
        }
    };
    let mut request = Request::new(Method::Post, query.resource.clone()).with_body(body);
    push_ignore_missing_properties(&mut request, query, dialect);
    Ok(request)
}

pub fn compile_update(
    query: &Query,
    body: &Map<String, Value>,
    dialect: &dyn Dialect,
) -> Result<Request> {
    let id = single_id(query, UPDATE, dialect)?;
    let path = dialect.record_path(&query.resource, &id);
    let mut request = Request::new(Method::Put, path).with_body(body.clone());
    push_ignore_missing_properties(&mut request, query, dialect);
    Ok(request)
}

pub fn compile_delete(query: &Query, dialect: &dyn Dialect) -> Result<Request> {
    let id = single_id(query, DELETE, dialect)?;
    let path = dialect.record_path(&query.resource, &id);
    Ok(Request::new(Method::Delete, path))
}

fn push_ignore_missing_properties(request: &mut Request, query: &Query, dialect: &dyn Dialect) {
    if query.ignore_missing_properties {
        request.push(dialect.ignore_missing_properties_key(), "true");
    }
}

/// The id of the one record a mutation may touch. The API only mutates single records, so the
/// query must be constrained by exactly one `id` equality and nothing else.
///
/// The id becomes one path segment, so it may not contain `/`.
fn single_id(query: &Query, mode: &str, dialect: &dyn Dialect) -> Result<String> {
    let id = id_condition_value(query, mode, dialect)?;
    if id.contains(PATH_SEPARATOR) {
        return Err(Error::malformed_condition(msg::record_id_with_separator(
            &id,
        )));
    }
    Ok(id)
}

fn id_condition_value(query: &Query, mode: &str, dialect: &dyn Dialect) -> Result<String> {
    if !query.filter_expressions.is_empty() {
        return Err(Error::unsupported(msg::mutation_with_filter_expressions(
            mode,
        )));
    }
    match query.conditions.as_slice() {
        [] => Err(Error::unsupported(msg::mutation_without_id(mode))),
        [Condition {
            conjunction: Conjunction::And,
            predicate:
                Predicate::Basic {
                    column,
                    operator: Operator::Eq,
                    value,
                },
        }] if column == COLUMN_ID && is_identifier(value) => Ok(dialect.scalar_value(value)),
        _ => Err(Error::unsupported(msg::mutation_requires_id_equality(mode))),
    }
}
