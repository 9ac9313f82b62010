//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Request inputs and labels carry no identity: two predictions made from equal
/// normalized inputs are interchangeable. Implementors are immutable once built,
/// which is what lets them cross threads and be echoed back to callers freely.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
