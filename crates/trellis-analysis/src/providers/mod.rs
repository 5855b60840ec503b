//! Provider validation: return grammar, identity and self-reference checks,
//! and parameter descriptors for rendering.

pub mod outcome;
pub mod signature;
pub mod validator;

pub use outcome::{ProviderOutcome, ResultShapeError};
pub use signature::{ParamDescriptor, ProviderSignature, TypeRenderer};
pub use validator::{ProviderSite, ProviderTarget, ProviderValidator};
