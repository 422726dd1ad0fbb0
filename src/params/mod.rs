//! Statement parameters
//!
//! This module handles:
//! * Bound value kinds (integer, string, null)
//! * Positional and named bindings collections
//! * Rewriting `:name` markers to the driver's `?` markers

mod bindings;
pub mod placeholder;
mod value;

pub use bindings::{normalize_key, Bindings, IntoBindings};
pub use value::{BindValue, ParamKind};
