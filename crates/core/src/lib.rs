//! `menuprofit-core` — domain vocabulary for menu profitability prediction.
//!
//! This crate contains **pure domain** primitives (no IO, no model, no HTTP):
//! the request fields, the raw and normalized request shapes, and the
//! profitability labels a prediction may carry.

pub mod error;
pub mod field;
pub mod input;
pub mod label;
pub mod value_object;

pub use error::DomainError;
pub use field::FeatureField;
pub use input::{FieldIssue, NormalizedInput, RawInput};
pub use label::ProfitLabel;
pub use value_object::ValueObject;
