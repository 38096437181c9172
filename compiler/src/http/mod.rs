mod dialect;
mod request;
mod standard;

pub use dialect::*;
pub use request::*;
pub use standard::*;
