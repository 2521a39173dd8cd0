//! Request validation shared by the resource handlers.

pub mod validation;
pub use validation::{RequestValidator, Validate};
