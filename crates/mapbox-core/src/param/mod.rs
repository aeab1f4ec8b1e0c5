//! Parameter descriptors, descriptor sets and request-scoped bindings.
//!
//! Endpoints declare an immutable [`ParamSet`]. Each call binds its raw
//! arguments into fresh [`Bindings`], which validate, format and assemble the
//! keyed values into [`QueryParams`](crate::QueryParams) or a JSON body.

pub mod common;
pub mod rules;
mod set;
mod spec;
mod value;

pub use set::{Bindings, ParamSet};
pub use spec::{Formatter, KeyDeriver, OutputKey, ParamSpec, Rule};
pub use value::ParamValue;
