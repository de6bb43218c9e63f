use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxinvoice_core::{DomainError, DomainResult, Entity, LineId};

/// Unit-of-measure tag for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitOfMeasure {
    #[default]
    Pcs,
    Kg,
    Ltr,
    Mtr,
    Box,
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 5] = [
        UnitOfMeasure::Pcs,
        UnitOfMeasure::Kg,
        UnitOfMeasure::Ltr,
        UnitOfMeasure::Mtr,
        UnitOfMeasure::Box,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitOfMeasure::Pcs => "PCS",
            UnitOfMeasure::Kg => "KG",
            UnitOfMeasure::Ltr => "LTR",
            UnitOfMeasure::Mtr => "MTR",
            UnitOfMeasure::Box => "BOX",
        }
    }
}

impl core::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitOfMeasure {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        UnitOfMeasure::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| DomainError::validation(format!("unknown unit of measure: {tag}")))
    }
}

/// One invoice row.
///
/// `tax_rate_percent` and `schedule_reference` are copies taken from the
/// reference table when the classification code was last resolved. They have
/// no edit of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineId,
    description: String,
    classification_code: String,
    quantity: Decimal,
    unit: UnitOfMeasure,
    unit_rate: Decimal,
    tax_rate_percent: Decimal,
    schedule_reference: String,
}

impl LineItem {
    /// A line with every field blank or zero.
    pub fn blank(id: LineId) -> Self {
        Self {
            id,
            description: String::new(),
            classification_code: String::new(),
            quantity: Decimal::ZERO,
            unit: UnitOfMeasure::default(),
            unit_rate: Decimal::ZERO,
            tax_rate_percent: Decimal::ZERO,
            schedule_reference: String::new(),
        }
    }

    pub fn id_typed(&self) -> LineId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Empty when no code has been chosen yet.
    pub fn classification_code(&self) -> &str {
        &self.classification_code
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> UnitOfMeasure {
        self.unit
    }

    pub fn unit_rate(&self) -> Decimal {
        self.unit_rate
    }

    pub fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }

    pub fn schedule_reference(&self) -> &str {
        &self.schedule_reference
    }

    pub fn has_classification(&self) -> bool {
        !self.classification_code.is_empty()
    }

    /// Classification codes go through `set_classification` or
    /// `set_unresolved_code` instead, so the draft applies the tax metadata rule.
    pub(crate) fn set_field(&mut self, value: &LineValue) {
        match value {
            LineValue::Description(text) => self.description = text.clone(),
            LineValue::Quantity(quantity) => self.quantity = *quantity,
            LineValue::Unit(unit) => self.unit = *unit,
            LineValue::UnitRate(rate) => self.unit_rate = *rate,
        }
    }

    /// Code, rate and schedule change together.
    pub(crate) fn set_classification(
        &mut self,
        code: &str,
        tax_rate_percent: Decimal,
        schedule_reference: &str,
    ) {
        self.classification_code = code.to_string();
        self.tax_rate_percent = tax_rate_percent;
        self.schedule_reference = schedule_reference.to_string();
    }

    /// Only the code changes; the previous tax metadata stays.
    pub(crate) fn set_unresolved_code(&mut self, code: &str) {
        self.classification_code = code.to_string();
    }
}

impl Entity for LineItem {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Editable line fields, as named by a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineField {
    Description,
    ClassificationCode,
    Quantity,
    Unit,
    UnitRate,
}

/// A typed edit of one line field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    Description(String),
    ClassificationCode(String),
    Quantity(Decimal),
    Unit(UnitOfMeasure),
    UnitRate(Decimal),
}

/// A line edit stored as given, with no reference lookup.
///
/// Same JSON shape as [`FieldEdit`] minus the classification code, which
/// cannot be written without resolving it first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LineValue {
    Description(String),
    Quantity(Decimal),
    Unit(UnitOfMeasure),
    UnitRate(Decimal),
}

impl FieldEdit {
    /// The edit as a plain value write; `None` for a classification code.
    pub fn as_value(&self) -> Option<LineValue> {
        match self {
            FieldEdit::Description(text) => Some(LineValue::Description(text.clone())),
            FieldEdit::ClassificationCode(_) => None,
            FieldEdit::Quantity(quantity) => Some(LineValue::Quantity(*quantity)),
            FieldEdit::Unit(unit) => Some(LineValue::Unit(*unit)),
            FieldEdit::UnitRate(rate) => Some(LineValue::UnitRate(*rate)),
        }
    }

    pub fn field(&self) -> LineField {
        match self {
            FieldEdit::Description(_) => LineField::Description,
            FieldEdit::ClassificationCode(_) => LineField::ClassificationCode,
            FieldEdit::Quantity(_) => LineField::Quantity,
            FieldEdit::Unit(_) => LineField::Unit,
            FieldEdit::UnitRate(_) => LineField::UnitRate,
        }
    }

    /// Build an edit from the raw text of a form control.
    ///
    /// Quantity and rate go through [`parse_non_negative`]: text that is not a
    /// non-negative number becomes zero. An unknown unit tag is a validation
    /// error because the unit control only offers known tags.
    pub fn from_form(field: LineField, raw: &str) -> DomainResult<Self> {
        Ok(match field {
            LineField::Description => FieldEdit::Description(raw.to_string()),
            LineField::ClassificationCode => FieldEdit::ClassificationCode(raw.trim().to_string()),
            LineField::Quantity => FieldEdit::Quantity(parse_non_negative(raw).value),
            LineField::Unit => FieldEdit::Unit(raw.parse()?),
            LineField::UnitRate => FieldEdit::UnitRate(parse_non_negative(raw).value),
        })
    }
}

/// Result of reading a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericInput {
    pub value: Decimal,
    /// The text was replaced by zero because it was not a non-negative number.
    pub coerced: bool,
}

/// Read a quantity or rate, coercing anything unusable to zero.
///
/// Blank text is zero without being flagged (an untouched field). Plain and
/// scientific notation are accepted.
pub fn parse_non_negative(raw: &str) -> NumericInput {
    let text = raw.trim();
    if text.is_empty() {
        return NumericInput {
            value: Decimal::ZERO,
            coerced: false,
        };
    }

    let parsed = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text));
    match parsed {
        Ok(value) if value >= Decimal::ZERO => NumericInput {
            value,
            coerced: false,
        },
        _ => {
            tracing::debug!(input = text, "numeric input coerced to zero");
            NumericInput {
                value: Decimal::ZERO,
                coerced: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn blank_line_defaults() {
        let line = LineItem::blank(LineId::new());
        assert_eq!(line.description(), "");
        assert!(!line.has_classification());
        assert_eq!(line.quantity(), Decimal::ZERO);
        assert_eq!(line.unit(), UnitOfMeasure::Pcs);
        assert_eq!(line.unit_rate(), Decimal::ZERO);
        assert_eq!(line.tax_rate_percent(), Decimal::ZERO);
        assert_eq!(line.schedule_reference(), "");
    }

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(
            parse_non_negative(" 12.50 "),
            NumericInput {
                value: d("12.5"),
                coerced: false
            }
        );
        assert_eq!(parse_non_negative("1e3").value, d("1000"));
    }

    #[test]
    fn blank_is_zero_without_flag() {
        let input = parse_non_negative("   ");
        assert_eq!(input.value, Decimal::ZERO);
        assert!(!input.coerced);
    }

    #[test]
    fn garbage_and_negatives_coerce_to_zero() {
        for raw in ["abc", "12abc", "-5", "NaN", "Infinity", "1,000"] {
            let input = parse_non_negative(raw);
            assert_eq!(input.value, Decimal::ZERO, "input {raw:?}");
            assert!(input.coerced, "input {raw:?}");
        }
    }

    #[test]
    fn form_edits_are_typed() {
        assert_eq!(
            FieldEdit::from_form(LineField::Quantity, "2").unwrap(),
            FieldEdit::Quantity(d("2"))
        );
        assert_eq!(
            FieldEdit::from_form(LineField::UnitRate, "oops").unwrap(),
            FieldEdit::UnitRate(Decimal::ZERO)
        );
        assert_eq!(
            FieldEdit::from_form(LineField::Unit, "kg").unwrap(),
            FieldEdit::Unit(UnitOfMeasure::Kg)
        );
        assert_eq!(
            FieldEdit::from_form(LineField::ClassificationCode, " 8479.89.00 ").unwrap(),
            FieldEdit::ClassificationCode("8479.89.00".to_string())
        );
        assert_eq!(
            FieldEdit::from_form(LineField::Description, "Gear box").unwrap().field(),
            LineField::Description
        );
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = FieldEdit::from_form(LineField::Unit, "DOZEN").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn field_edit_json_shape() {
        let edit: FieldEdit =
            serde_json::from_str(r#"{"field": "unit_rate", "value": "500"}"#).unwrap();
        assert_eq!(edit, FieldEdit::UnitRate(d("500")));

        let edit: FieldEdit = serde_json::from_str(r#"{"field": "unit", "value": "BOX"}"#).unwrap();
        assert_eq!(edit, FieldEdit::Unit(UnitOfMeasure::Box));
    }

    #[test]
    fn only_classification_edits_lack_a_plain_value() {
        assert_eq!(
            FieldEdit::Quantity(d("2")).as_value(),
            Some(LineValue::Quantity(d("2")))
        );
        assert_eq!(
            FieldEdit::Description("Gear box".to_string()).as_value(),
            Some(LineValue::Description("Gear box".to_string()))
        );
        assert_eq!(
            FieldEdit::ClassificationCode("8479.89.00".to_string()).as_value(),
            None
        );
    }

    #[test]
    fn line_value_json_has_no_classification_code() {
        let value: LineValue =
            serde_json::from_str(r#"{"field": "quantity", "value": "4"}"#).unwrap();
        assert_eq!(value, LineValue::Quantity(d("4")));

        let code = serde_json::from_str::<LineValue>(
            r#"{"field": "classification_code", "value": "8479.89.00"}"#,
        );
        assert!(code.is_err());
    }

    #[test]
    fn set_field_touches_only_that_field() {
        let mut line = LineItem::blank(LineId::new());
        line.set_classification("3920.10.00", d("17"), "SCH-III-3920");
        let before = line.clone();

        line.set_field(&LineValue::Quantity(d("3")));
        assert_eq!(line.quantity(), d("3"));
        assert_eq!(line.tax_rate_percent(), before.tax_rate_percent());
        assert_eq!(line.classification_code(), before.classification_code());
        assert_eq!(line.unit_rate(), before.unit_rate());
    }
}
