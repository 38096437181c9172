use querywire_model::{
    tokens::{OPERATOR_SEPARATOR, OR_PREFIX},
    Value,
};

/// Wire conventions of a particular resource API.
pub trait Dialect {
    /// Path of the sub-resource which counts the records of `resource`.
    fn count_path(&self, resource: &str) -> String;

    /// Key of the `position`th filter expression, counting from 1.
    fn filter_key(&self, position: usize) -> String;

    fn properties_key(&self) -> &str;

    fn sort_key(&self) -> &str;

    fn page_key(&self) -> &str;

    fn page_size_key(&self) -> &str;

    /// Key which asks the server to expand foreign keys into referenced entities.
    fn include_key(&self) -> &str;

    fn ignore_missing_properties_key(&self) -> &str;

    /// Path addressing a single record.
    fn record_path(&self, resource: &str, id: &str) -> String {
        format!("{resource}/{id}")
    }

    /// Render the key of a condition
    ///
    /// * `column` - The column being constrained
    /// * `operator` - The operator code, e.g. `eq`
    /// * `is_or` - true when the condition is joined via `or`. This only prefixes the key; the
    ///   API has no way to group terms.
    fn condition_key(&self, column: &str, operator: &str, is_or: bool) -> String {
        let key = format!("{column}{OPERATOR_SEPARATOR}{operator}");
        if is_or {
            format!("{OR_PREFIX}{key}")
        } else {
            key
        }
    }

    /// Render a single value. Strings are carried raw; encoding happens at the transport.
    fn scalar_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Render a list of values as a JSON array literal.
    fn list_value(&self, values: &[Value]) -> String {
        Value::Array(values.to_vec()).to_string()
    }
}
