mod compiler;
mod errors;
mod http;
mod options;
mod relations;
#[cfg(test)]
mod tests;
mod utils;

pub use compiler::{Compiler, Page};
pub use errors::{Error, ErrorKind, Result};
pub use http::{Dialect, Method, Request, Standard};
pub use options::{IdentifierResolution, Options};
pub use querywire_model::{ast, tokens, RelationSpec, RelationTarget};
pub use relations::{
    BucketPolicy, DefaultHydrator, Hydrate, RawRecord, Record, ReferencedEntities, Related,
    RelationResolver, RelationState, ResponseEnvelope,
};
