//! Shared domain types.
//!
//! Transformation kinds, the transformation form, aspect-ratio presets and
//! the persisted user record live here. Other modules import from here
//! rather than reaching into each other's internals.

pub mod aspect;
pub mod form;
pub mod transformation;
pub mod user;

pub use aspect::{AspectRatio, Dimension, ImageDimensions};
pub use form::{FormAction, FormError, TransformationForm};
pub use transformation::{TransformationKind, TransformationPlan, TransformationRequest};
pub use user::{UserError, UserRecord};
