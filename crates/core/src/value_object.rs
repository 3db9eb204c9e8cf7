//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; to "modify"
/// one, build a new value. `Money` and `Quantity` are the value objects of this
/// domain: two prices of `10.00` are the same price regardless of where they came from.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
