use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxinvoice_core::ValueObject;

/// One row of the classification reference table.
///
/// Serialized with the field names of the HS code master data
/// (`code`, `description`, `taxRate`, `scheduleReference`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// Dotted hierarchical code (e.g. `8479.89.00`). Unique within a table.
    pub code: String,
    pub description: String,
    /// Percentage, `0` means exempt.
    #[serde(rename = "taxRate")]
    pub tax_rate_percent: Decimal,
    #[serde(rename = "scheduleReference")]
    pub schedule_reference: String,
}

impl ValueObject for ClassificationEntry {}

impl ClassificationEntry {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        tax_rate_percent: Decimal,
        schedule_reference: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            tax_rate_percent,
            schedule_reference: schedule_reference.into(),
        }
    }

    pub fn is_exempt(&self) -> bool {
        self.tax_rate_percent.is_zero()
    }

    /// Case-insensitive substring match over code or description.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.code.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheets() -> ClassificationEntry {
        ClassificationEntry::new("3920.10.00", "Plastic Sheets", Decimal::from(17), "SCH-III-3920")
    }

    #[test]
    fn matches_description_ignoring_case() {
        assert!(sheets().matches("plastic"));
        assert!(sheets().matches("sheets"));
        assert!(!sheets().matches("steel"));
    }

    #[test]
    fn matches_code_fragment() {
        assert!(sheets().matches("3920"));
        assert!(sheets().matches("10.00"));
    }

    #[test]
    fn zero_rate_is_exempt() {
        let rice = ClassificationEntry::new(
            "1006.30.00",
            "Rice (Semi-milled)",
            Decimal::ZERO,
            "SCH-EXEMPT-1006",
        );
        assert!(rice.is_exempt());
        assert!(!sheets().is_exempt());
    }

    #[test]
    fn deserializes_master_data_shape() {
        let json = r#"{"code":"8479.89.00","description":"Industrial Machinery Parts","taxRate":18,"scheduleReference":"SCH-III-8479"}"#;
        let entry: ClassificationEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.code, "8479.89.00");
        assert_eq!(entry.tax_rate_percent, Decimal::from(18));
        assert_eq!(entry.schedule_reference, "SCH-III-8479");
    }
}
