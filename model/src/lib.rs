mod relation;

pub mod ast;
pub mod tokens;

pub use relation::{RelationSpec, RelationTarget};
pub use serde_json::{Map, Value};
