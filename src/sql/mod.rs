//! Safe SQL builder: fixed identifiers, values as parameters.

mod builder;
pub use builder::*;
