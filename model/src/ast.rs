use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{relation::RelationSpec, tokens::*};

/// A single logical operation against one resource of the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub resource: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Provider-specific boolean expressions. These are forwarded verbatim and never parsed.
    #[serde(default)]
    pub filter_expressions: Vec<String>,
    #[serde(default)]
    pub orderings: Vec<Ordering>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub projection: Projection,
    /// Foreign key fields which the server should expand into `referencedEntities`.
    #[serde(default)]
    pub include_referenced_keys: Vec<String>,
    #[serde(default)]
    pub is_aggregate: bool,
    #[serde(default)]
    pub ignore_missing_properties: bool,
    #[serde(default)]
    pub mutation: Mutation,
    /// Resources to join. The API has no joins, so any entry here makes the query uncompilable.
    #[serde(default)]
    pub joins: Vec<String>,
}

impl Query {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            conditions: vec![],
            filter_expressions: vec![],
            orderings: vec![],
            limit: None,
            offset: 0,
            projection: Projection::All,
            include_referenced_keys: vec![],
            is_aggregate: false,
            ignore_missing_properties: false,
            mutation: Mutation::Read,
            joins: vec![],
        }
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn where_op(self, column: impl Into<String>, operator: Operator, value: Value) -> Self {
        self.condition(Condition::basic(column, operator, value))
    }

    pub fn or_where_op(self, column: impl Into<String>, operator: Operator, value: Value) -> Self {
        self.condition(Condition::basic(column, operator, value).or())
    }

    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_op(column, Operator::Eq, value.into())
    }

    pub fn where_in(self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.condition(Condition::is_in(column, values))
    }

    pub fn where_not_in(self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.condition(Condition::not_in(column, values))
    }

    pub fn where_null(self, column: impl Into<String>) -> Self {
        self.condition(Condition::null(column))
    }

    pub fn where_not_null(self, column: impl Into<String>) -> Self {
        self.condition(Condition::not_null(column))
    }

    /// Address a sub-entity resource through its owning parent.
    pub fn within_entity(self, name: impl Into<Value>, id: impl Into<Value>) -> Self {
        self.condition(Condition::entity(ENTITY_NAME, name))
            .condition(Condition::entity(ENTITY_ID, id))
    }

    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter_expressions.push(expression.into());
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.orderings.push(Ordering {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Restrict the returned columns. Duplicate names are dropped, keeping the first occurrence.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected = match self.projection {
            Projection::All => vec![],
            Projection::Columns(columns) => columns,
        };
        for column in columns {
            push_unique(&mut selected, column.into());
        }
        self.projection = Projection::Columns(selected);
        self
    }

    pub fn include(mut self, foreign_key: impl Into<String>) -> Self {
        push_unique(&mut self.include_referenced_keys, foreign_key.into());
        self
    }

    /// Ask the server to expand the foreign key of every given relation.
    pub fn include_relations(self, specs: &[RelationSpec]) -> Self {
        specs
            .iter()
            .fold(self, |query, spec| query.include(spec.foreign_key.clone()))
    }

    pub fn count(mut self) -> Self {
        self.is_aggregate = true;
        self
    }

    pub fn insert(mut self, body: Map<String, Value>) -> Self {
        self.mutation = Mutation::Insert(Insert {
            source: InsertSource::Values(body),
            or_ignore: false,
        });
        self
    }

    pub fn update(mut self, body: Map<String, Value>) -> Self {
        self.mutation = Mutation::Update { body };
        self
    }

    pub fn delete(mut self) -> Self {
        self.mutation = Mutation::Delete;
        self
    }

    pub fn ignore_missing_properties(mut self) -> Self {
        self.ignore_missing_properties = true;
        self
    }
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Only affects how the parameter key is written. The API offers no grouping of terms.
    #[serde(default)]
    pub conjunction: Conjunction,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Condition {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            conjunction: Conjunction::And,
            predicate,
        }
    }

    pub fn basic(column: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self::new(Predicate::Basic {
            column: column.into(),
            operator,
            value,
        })
    }

    pub fn is_in(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(Predicate::In {
            column: column.into(),
            values,
        })
    }

    pub fn not_in(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(Predicate::NotIn {
            column: column.into(),
            values,
        })
    }

    pub fn null(column: impl Into<String>) -> Self {
        Self::new(Predicate::Null {
            column: column.into(),
        })
    }

    pub fn not_null(column: impl Into<String>) -> Self {
        Self::new(Predicate::NotNull {
            column: column.into(),
        })
    }

    pub fn entity(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Predicate::Entity {
            column: column.into(),
            value: value.into(),
        })
    }

    pub fn or(mut self) -> Self {
        self.conjunction = Conjunction::Or;
        self
    }

    pub fn column(&self) -> &str {
        self.predicate.column()
    }

    pub fn is_or(&self) -> bool {
        self.conjunction == Conjunction::Or
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Predicate {
    Basic {
        column: String,
        operator: Operator,
        value: Value,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    NotIn {
        column: String,
        values: Vec<Value>,
    },
    Null {
        column: String,
    },
    NotNull {
        column: String,
    },
    /// The provider's sub-entity addressing convention. The column is `entityName` or
    /// `entityId` and the parameter key carries no operator suffix.
    Entity {
        column: String,
        value: Value,
    },
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Predicate::Basic { column, .. }
            | Predicate::In { column, .. }
            | Predicate::NotIn { column, .. }
            | Predicate::Null { column }
            | Predicate::NotNull { column }
            | Predicate::Entity { column, .. } => column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    NotLike,
    ILike,
    NotILike,
}

impl Operator {
    pub fn code(&self) -> &'static str {
        match self {
            Operator::Eq => OP_EQ,
            Operator::Ne => OP_NE,
            Operator::Gt => OP_GT,
            Operator::Ge => OP_GE,
            Operator::Lt => OP_LT,
            Operator::Le => OP_LE,
            Operator::Like => OP_LIKE,
            Operator::NotLike => OP_NOT_LIKE,
            Operator::ILike => OP_ILIKE,
            Operator::NotILike => OP_NOT_ILIKE,
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le)
    }

    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            Operator::Like | Operator::NotLike | Operator::ILike | Operator::NotILike
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Which columns to return. `All` is written as `null` (or omitted) in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    Columns(Vec<String>),
    #[default]
    All,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Mutation {
    #[default]
    Read,
    Insert(Insert),
    Update {
        #[serde(default)]
        body: Map<String, Value>,
    },
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insert {
    pub source: InsertSource,
    #[serde(default)]
    pub or_ignore: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertSource {
    Values(Map<String, Value>),
    /// Rows produced by another query. The API cannot do this.
    Subquery(Box<Query>),
}
