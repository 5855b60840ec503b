//! Structural capability matching and requirement binding.

pub mod capability;
pub mod resolver;

pub use capability::{pointer_method_set, satisfies, MethodSet};
pub use resolver::{implementers, BindingResolver};
