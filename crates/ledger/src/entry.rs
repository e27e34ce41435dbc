use serde::{Deserialize, Serialize};

use ewaste_core::{DomainError, DomainResult, ValueObject};

use crate::coefficient::CoefficientTable;

/// Number of recycled units in one entry (always at least 1).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Quantity(u64);

impl ValueObject for Quantity {}

impl Quantity {
    pub fn new(value: i64) -> DomainResult<Self> {
        if value < 1 {
            return Err(DomainError::invalid_input(format!(
                "quantity must be at least 1, got {value}"
            )));
        }
        Ok(Self(value.unsigned_abs()))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Signed form for storage columns. Lossless: every quantity was built from an `i64`.
    pub fn to_i64(self) -> i64 {
        self.0 as i64
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One recorded recycling event.
///
/// `co2_saved` is fixed when the entry is created and never recomputed, so
/// later changes to the coefficient table leave history alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    item: String,
    quantity: Quantity,
    co2_saved: f64,
}

impl ValueObject for Entry {}

impl Entry {
    /// Price a new entry against `coefficients`.
    pub fn priced(item: &str, quantity: Quantity, coefficients: &CoefficientTable) -> DomainResult<Self> {
        let per_unit = coefficients
            .get(item)
            .ok_or_else(|| DomainError::invalid_input(format!("unknown item '{item}'")))?;

        Ok(Self {
            item: item.to_string(),
            quantity,
            co2_saved: quantity.get() as f64 * per_unit,
        })
    }

    /// Rebuild an entry from stored fields, keeping the stored `co2_saved`.
    pub fn restore(item: impl Into<String>, quantity: i64, co2_saved: f64) -> DomainResult<Self> {
        let item = item.into();
        if item.trim().is_empty() {
            return Err(DomainError::invalid_input("item name is empty"));
        }
        let quantity = Quantity::new(quantity)?;
        if !co2_saved.is_finite() || co2_saved < 0.0 {
            return Err(DomainError::invalid_input(format!(
                "co2_saved must be a non-negative number, got {co2_saved}"
            )));
        }
        Ok(Self {
            item,
            quantity,
            co2_saved,
        })
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Kilograms of CO₂ saved by this entry.
    pub fn co2_saved(&self) -> f64 {
        self.co2_saved
    }

    /// User-facing success line for a freshly recorded entry.
    pub fn confirmation(&self) -> String {
        format!(
            "Saved! You saved {:.2} kg of CO₂ by recycling {} {}(s).",
            self.co2_saved, self.quantity, self.item
        )
    }
}
