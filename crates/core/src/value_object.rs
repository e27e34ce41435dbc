//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A
/// `Quantity(3)` is equal to any other `Quantity(3)`; to "modify" one, build a
/// new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Coefficient {
///     item: String,
///     kg_co2_per_unit: f64,
/// }
///
/// impl ValueObject for Coefficient {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
