//! Fixed vocabulary of the resource API's query language. These strings are part of the wire
//! protocol and must match the provider exactly.

pub const OP_EQ: &str = "eq";
pub const OP_NE: &str = "ne";
pub const OP_GT: &str = "gt";
pub const OP_GE: &str = "ge";
pub const OP_LT: &str = "lt";
pub const OP_LE: &str = "le";
pub const OP_IN: &str = "in";
pub const OP_NOT_IN: &str = "notin";
pub const OP_NULL: &str = "null";
pub const OP_NOT_NULL: &str = "notnull";
pub const OP_LIKE: &str = "like";
pub const OP_NOT_LIKE: &str = "notlike";
pub const OP_ILIKE: &str = "ilike";
pub const OP_NOT_ILIKE: &str = "notilike";

/// Separates a column name from its operator code within a parameter key, e.g. `status-eq`.
pub const OPERATOR_SEPARATOR: &str = "-";

/// Prepended to the key of a condition joined via `or`, e.g. `or-status-eq`.
pub const OR_PREFIX: &str = "or-";

/// Prepended to a column name within the `sort` parameter to sort descending.
pub const DESCENDING_PREFIX: &str = "-";

pub const LIST_SEPARATOR: &str = ",";

pub const COLUMN_ID: &str = "id";
pub const ENTITY_NAME: &str = "entityName";
pub const ENTITY_ID: &str = "entityId";

/// Suffix which, when stripped from a foreign key field, yields the name of the relation.
pub const FOREIGN_KEY_SUFFIX: &str = "Id";
