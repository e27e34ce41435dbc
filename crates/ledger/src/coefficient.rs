use serde::{Deserialize, Serialize};

use ewaste_core::{DomainError, DomainResult, ValueObject};

/// CO₂ saved per recycled unit of one item category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub item: String,
    /// Kilograms of CO₂ saved per unit.
    pub kg_co2_per_unit: f64,
}

impl ValueObject for Coefficient {}

impl Coefficient {
    pub fn new(item: impl Into<String>, kg_co2_per_unit: f64) -> Self {
        Self {
            item: item.into(),
            kg_co2_per_unit,
        }
    }
}

/// Lookup table from item category to CO₂ saved per unit.
///
/// Categories keep the order they were supplied in; that order is the
/// selection order shown to users. The ledger only ever reads this table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoefficientTable {
    coefficients: Vec<Coefficient>,
}

impl ValueObject for CoefficientTable {}

impl CoefficientTable {
    /// Build a table, rejecting empty or duplicate names and non-positive or
    /// non-finite coefficients.
    pub fn new(coefficients: Vec<Coefficient>) -> DomainResult<Self> {
        for (idx, c) in coefficients.iter().enumerate() {
            if c.item.trim().is_empty() {
                return Err(DomainError::invalid_input(format!(
                    "coefficient #{idx} has an empty item name"
                )));
            }
            if !c.kg_co2_per_unit.is_finite() || c.kg_co2_per_unit <= 0.0 {
                return Err(DomainError::invalid_input(format!(
                    "coefficient for '{}' must be a positive number, got {}",
                    c.item, c.kg_co2_per_unit
                )));
            }
            if coefficients[..idx].iter().any(|prev| prev.item == c.item) {
                return Err(DomainError::invalid_input(format!(
                    "duplicate coefficient for '{}'",
                    c.item
                )));
            }
        }
        Ok(Self { coefficients })
    }

    /// The built-in table for common household e-waste.
    pub fn standard() -> Self {
        Self {
            coefficients: vec![
                Coefficient::new("Mobile Phone", 4.2),
                Coefficient::new("Laptop", 12.5),
                Coefficient::new("Charger", 0.5),
                Coefficient::new("Keyboard", 1.1),
                Coefficient::new("Headphone", 0.7),
            ],
        }
    }

    /// Kilograms of CO₂ saved per unit of `item`, if the category is known.
    pub fn get(&self, item: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|c| c.item == item)
            .map(|c| c.kg_co2_per_unit)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.get(item).is_some()
    }

    /// Category names in table order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.coefficients.iter().map(|c| c.item.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coefficient> {
        self.coefficients.iter()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for CoefficientTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let coefficients = Vec::<Coefficient>::deserialize(deserializer)?;
        CoefficientTable::new(coefficients).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_keeps_selection_order() {
        let table = CoefficientTable::standard();
        let items: Vec<&str> = table.items().collect();
        assert_eq!(
            items,
            vec!["Mobile Phone", "Laptop", "Charger", "Keyboard", "Headphone"]
        );
        assert_eq!(table.get("Laptop"), Some(12.5));
        assert_eq!(table.get("Toaster"), None);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = CoefficientTable::standard();
        assert!(table.contains("Charger"));
        assert!(!table.contains("charger"));
    }

    #[test]
    fn rejects_non_positive_coefficient() {
        let err = CoefficientTable::new(vec![Coefficient::new("Laptop", 0.0)]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("positive")));

        let err = CoefficientTable::new(vec![Coefficient::new("Laptop", f64::NAN)]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn rejects_duplicate_and_blank_names() {
        let err = CoefficientTable::new(vec![
            Coefficient::new("Laptop", 12.5),
            Coefficient::new("Laptop", 10.0),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("duplicate")));

        let err = CoefficientTable::new(vec![Coefficient::new("  ", 1.0)]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(msg) if msg.contains("empty item name")));
    }

    #[test]
    fn deserializes_through_validation() {
        let table: CoefficientTable =
            serde_json::from_str(r#"[{"item":"Laptop","kg_co2_per_unit":12.5}]"#).unwrap();
        assert_eq!(table.len(), 1);

        let bad = serde_json::from_str::<CoefficientTable>(
            r#"[{"item":"Laptop","kg_co2_per_unit":-1.0}]"#,
        );
        assert!(bad.is_err());
    }
}
