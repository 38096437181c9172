pub fn joins_unsupported(resources: &[String]) -> String {
    format!(
        "The API cannot join resources (requested: {}).",
        resources.join(", ")
    )
}

pub fn subquery_insert_unsupported() -> String {
    "Records cannot be inserted from the results of another query.".to_string()
}

pub fn insert_or_ignore_unsupported() -> String {
    "Insert-or-ignore is not supported by the API.".to_string()
}

pub fn mutation_without_id(mode: &str) -> String {
    format!("Each {mode} must be constrained by an `id` equality condition.")
}

pub fn mutation_requires_id_equality(mode: &str) -> String {
    format!("Each {mode} may only be constrained by exactly one `id` equality condition.")
}

pub fn mutation_with_filter_expressions(mode: &str) -> String {
    format!("Each {mode} cannot be constrained by filter expressions.")
}

pub fn sub_entity_unsupported(resource: &str) -> String {
    format!("Resource `{resource}` does not support sub-entity addressing.")
}

pub fn offset_without_limit(offset: u64) -> String {
    format!("Offset {offset} requires a positive limit because the API addresses pages, not rows.")
}

pub fn page_out_of_range(offset: u64, size: u64) -> String {
    format!("Offset {offset} with page size {size} lies beyond the last addressable page.")
}

pub fn record_id_with_separator(id: &str) -> String {
    format!("Record id `{id}` cannot contain a path separator.")
}

pub fn operator_value_mismatch(column: &str, operator: &str, value_kind: &str) -> String {
    format!("Operator `{operator}` on column `{column}` is not defined for a {value_kind} value.")
}

pub fn empty_value_list(column: &str, operator: &str) -> String {
    format!("Operator `{operator}` on column `{column}` requires at least one value.")
}

pub fn invalid_entity_column(column: &str) -> String {
    format!("Sub-entity addressing uses `entityName` or `entityId`, not `{column}`.")
}

pub fn invalid_entity_value(column: &str, value_kind: &str) -> String {
    format!("Sub-entity parameter `{column}` requires a string or number, not a {value_kind}.")
}

pub fn entity_joined_via_or(column: &str) -> String {
    format!("Sub-entity parameter `{column}` cannot be joined via `or`.")
}

pub fn invalid_query_json(reason: &str) -> String {
    format!("Query input is not valid: {reason}")
}
