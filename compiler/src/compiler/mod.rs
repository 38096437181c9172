mod compiler;
mod conditions;
mod mutation;
mod pagination;
mod sorting;
mod values;

pub use compiler::Compiler;
pub use pagination::Page;
