use itertools::Itertools;
use querywire_model::{
    ast::{Mutation, Predicate, Projection, Query},
    tokens::LIST_SEPARATOR,
};
use tracing::{debug, trace};

use crate::{
    errors::{msg, Error, ErrorKind, Result},
    http::{Method, Request},
    Options,
};

use super::{
    conditions::convert_condition,
    mutation::{compile_delete, compile_insert, compile_update},
    pagination::Page,
    sorting::render_sorting,
};

pub struct Compiler {
    options: Options,
}

impl Compiler {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Compile a JSON-encoded query.
    pub fn compile_json(&self, input: &str) -> Result<Request> {
        let query = serde_json::from_str::<Query>(input).map_err(|e| {
            Error::new(ErrorKind::InvalidQuery, msg::invalid_query_json(&e.to_string()))
        })?;
        self.compile(&query)
    }

    /// Translate a query into exactly one request. Nothing is sent; every error surfaces here.
    pub fn compile(&self, query: &Query) -> Result<Request> {
        if !query.joins.is_empty() {
            return Err(Error::unsupported(msg::joins_unsupported(&query.joins)));
        }
        let dialect = self.options.dialect.as_ref();
        let request = match &query.mutation {
            Mutation::Read => self.compile_read(query)?,
            Mutation::Insert(insert) => compile_insert(query, insert, dialect)?,
            Mutation::Update { body } => compile_update(query, body, dialect)?,
            Mutation::Delete => compile_delete(query, dialect)?,
        };
        debug!(%request, "compiled query");
        Ok(request)
    }

    fn compile_read(&self, query: &Query) -> Result<Request> {
        let dialect = self.options.dialect.as_ref();

        let has_entity_conditions = query
            .conditions
            .iter()
            .any(|c| matches!(c.predicate, Predicate::Entity { .. }));
        if has_entity_conditions && !self.options.supports_sub_entity(&query.resource) {
            return Err(Error::unsupported(msg::sub_entity_unsupported(
                &query.resource,
            )));
        }

        // Every condition is checked even when the request ends up not carrying it
        let mut condition_params = Vec::with_capacity(query.conditions.len());
        for condition in &query.conditions {
            let param = convert_condition(condition, dialect)?;
            let is_entity = matches!(condition.predicate, Predicate::Entity { .. });
            condition_params.push((param, is_entity));
        }
        let page = Page::from_limit_offset(query.limit, query.offset)?;

        if query.is_aggregate {
            // Counting only needs the resource to be addressed
            let mut request = Request::new(Method::Get, dialect.count_path(&query.resource));
            for ((key, value), _) in condition_params.into_iter().filter(|(_, e)| *e) {
                request.push(key, value);
            }
            return Ok(request);
        }

        let mut request = Request::new(Method::Get, query.resource.clone());
        for ((key, value), _) in condition_params {
            trace!(%key, %value, "condition");
            request.push(key, value);
        }
        for (index, expression) in query.filter_expressions.iter().enumerate() {
            request.push(dialect.filter_key(index + 1), expression.clone());
        }
        if let Projection::Columns(columns) = &query.projection {
            if !columns.is_empty() {
                request.push(dialect.properties_key(), columns.join(LIST_SEPARATOR));
            }
        }
        if let Some(sorting) = render_sorting(&query.orderings) {
            request.push(dialect.sort_key(), sorting);
        }
        if let Some(page) = page {
            request.push(dialect.page_size_key(), page.size.to_string());
            request.push(dialect.page_key(), page.number.to_string());
        }
        if !query.include_referenced_keys.is_empty() {
            request.push(
                dialect.include_key(),
                query.include_referenced_keys.iter().join(LIST_SEPARATOR),
            );
        }
        Ok(request)
    }
}
