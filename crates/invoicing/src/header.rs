//! Invoice header: seller, buyer and invoice confirmation fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use taxinvoice_core::{DomainError, DomainResult};

/// STRN recorded for every unregistered buyer.
pub const UNREGISTERED_BUYER_STRN: &str = "9999997";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Province {
    #[default]
    Punjab,
    Sindh,
    #[serde(rename = "Khyber Pakhtunkhwa")]
    KhyberPakhtunkhwa,
    Balochistan,
    #[serde(rename = "Islamabad Capital Territory")]
    IslamabadCapitalTerritory,
    #[serde(rename = "Gilgit-Baltistan")]
    GilgitBaltistan,
    #[serde(rename = "Azad Jammu & Kashmir")]
    AzadJammuKashmir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuyerType {
    #[default]
    Registered,
    Unregistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    Cash,
    Credit,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvoiceType {
    #[default]
    #[serde(rename = "Tax Invoice")]
    TaxInvoice,
    #[serde(rename = "Commercial Invoice")]
    CommercialInvoice,
    #[serde(rename = "Export Invoice")]
    ExportInvoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SaleType {
    #[default]
    Local,
    #[serde(rename = "Inter-Provincial")]
    InterProvincial,
    Export,
}

/// Read-only seller identity printed on every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerProfile {
    pub company_name: String,
    pub ntn: String,
    pub strn: String,
    pub address: String,
    pub origin_province: Province,
}

impl Default for SellerProfile {
    fn default() -> Self {
        Self {
            company_name: "ABC Enterprises (Pvt) Ltd".to_string(),
            ntn: "1234567-8".to_string(),
            strn: "32-00-0000-000-00".to_string(),
            address: "123 Business District, Karachi, Pakistan".to_string(),
            origin_province: Province::Sindh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuyerDetails {
    pub buyer_type: BuyerType,
    pub name: String,
    pub ntn: String,
    strn: String,
    pub address: String,
    pub province: Province,
}

impl BuyerDetails {
    /// The STRN that goes on the invoice.
    pub fn strn(&self) -> &str {
        match self.buyer_type {
            BuyerType::Registered => &self.strn,
            BuyerType::Unregistered => UNREGISTERED_BUYER_STRN,
        }
    }

    /// Switching type resets the STRN: cleared for registered buyers, the
    /// fixed placeholder for unregistered ones.
    fn set_buyer_type(&mut self, buyer_type: BuyerType) {
        self.buyer_type = buyer_type;
        self.strn = match buyer_type {
            BuyerType::Registered => String::new(),
            BuyerType::Unregistered => UNREGISTERED_BUYER_STRN.to_string(),
        };
    }
}

/// One edit of the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum HeaderEdit {
    BuyerType(BuyerType),
    BuyerName(String),
    BuyerNtn(String),
    BuyerStrn(String),
    BuyerAddress(String),
    BuyerProvince(Province),
    PaymentMode(PaymentMode),
    InvoiceNumber(String),
    InvoiceDate(NaiveDate),
    InvoiceType(InvoiceType),
    SaleType(SaleType),
}

/// Invoice number and date start unset; the caller issues them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceHeader {
    pub seller: SellerProfile,
    pub buyer: BuyerDetails,
    pub payment_mode: PaymentMode,
    pub invoice_number: String,
    pub invoice_date: Option<NaiveDate>,
    pub invoice_type: InvoiceType,
    pub sale_type: SaleType,
}

impl InvoiceHeader {
    /// Whether applying `edit` would change anything.
    ///
    /// A typed STRN is ignored while the buyer is unregistered.
    pub fn accepts(&self, edit: &HeaderEdit) -> bool {
        !matches!(
            (edit, self.buyer.buyer_type),
            (HeaderEdit::BuyerStrn(_), BuyerType::Unregistered)
        )
    }

    pub(crate) fn apply_edit(&mut self, edit: &HeaderEdit) {
        if !self.accepts(edit) {
            return;
        }
        match edit {
            HeaderEdit::BuyerType(value) => self.buyer.set_buyer_type(*value),
            HeaderEdit::BuyerName(value) => self.buyer.name = value.clone(),
            HeaderEdit::BuyerNtn(value) => self.buyer.ntn = value.clone(),
            HeaderEdit::BuyerStrn(value) => self.buyer.strn = value.clone(),
            HeaderEdit::BuyerAddress(value) => self.buyer.address = value.clone(),
            HeaderEdit::BuyerProvince(value) => self.buyer.province = *value,
            HeaderEdit::PaymentMode(value) => self.payment_mode = *value,
            HeaderEdit::InvoiceNumber(value) => self.invoice_number = value.clone(),
            HeaderEdit::InvoiceDate(value) => self.invoice_date = Some(*value),
            HeaderEdit::InvoiceType(value) => self.invoice_type = *value,
            HeaderEdit::SaleType(value) => self.sale_type = *value,
        }
    }

    /// Required fields for submission.
    pub fn validate(&self) -> DomainResult<()> {
        if self.buyer.name.trim().is_empty() {
            return Err(DomainError::validation("buyer name is required"));
        }
        if self.buyer.strn().trim().is_empty() {
            return Err(DomainError::validation(
                "buyer STRN is required for registered buyers",
            ));
        }
        if self.invoice_number.trim().is_empty() {
            return Err(DomainError::validation("invoice number is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_with(edits: &[HeaderEdit]) -> InvoiceHeader {
        let mut header = InvoiceHeader::default();
        for edit in edits {
            header.apply_edit(edit);
        }
        header
    }

    #[test]
    fn defaults_match_the_form() {
        let header = InvoiceHeader::default();
        assert_eq!(header.buyer.buyer_type, BuyerType::Registered);
        assert_eq!(header.buyer.province, Province::Punjab);
        assert_eq!(header.payment_mode, PaymentMode::Cash);
        assert_eq!(header.invoice_type, InvoiceType::TaxInvoice);
        assert_eq!(header.sale_type, SaleType::Local);
        assert_eq!(header.seller.origin_province, Province::Sindh);
    }

    #[test]
    fn invoice_number_and_date_start_unset() {
        let header = header_with(&[
            HeaderEdit::BuyerName("XYZ Corporation".to_string()),
            HeaderEdit::BuyerStrn("33-00-1234-567-89".to_string()),
        ]);
        assert_eq!(header.invoice_number, "");
        assert_eq!(header.invoice_date, None);
        assert_eq!(
            header.validate(),
            Err(DomainError::validation("invoice number is required"))
        );
    }

    #[test]
    fn unregistered_buyer_gets_fixed_strn() {
        let header = header_with(&[HeaderEdit::BuyerType(BuyerType::Unregistered)]);
        assert_eq!(header.buyer.strn(), UNREGISTERED_BUYER_STRN);
    }

    #[test]
    fn typed_strn_is_ignored_while_unregistered() {
        let header = header_with(&[
            HeaderEdit::BuyerType(BuyerType::Unregistered),
            HeaderEdit::BuyerStrn("32-00-1234-567-89".to_string()),
        ]);
        assert_eq!(header.buyer.strn(), UNREGISTERED_BUYER_STRN);
    }

    #[test]
    fn switching_back_to_registered_clears_strn() {
        let header = header_with(&[
            HeaderEdit::BuyerStrn("32-00-1234-567-89".to_string()),
            HeaderEdit::BuyerType(BuyerType::Unregistered),
            HeaderEdit::BuyerType(BuyerType::Registered),
        ]);
        assert_eq!(header.buyer.strn(), "");
    }

    #[test]
    fn validate_requires_buyer_and_number() {
        let err = InvoiceHeader::default().validate().unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("buyer name") => {}
            other => panic!("Expected buyer name validation error, got {other:?}"),
        }

        let missing_strn = header_with(&[
            HeaderEdit::BuyerName("XYZ Corporation".to_string()),
            HeaderEdit::InvoiceNumber("INV-2026-00249".to_string()),
        ]);
        match missing_strn.validate().unwrap_err() {
            DomainError::Validation(msg) if msg.contains("STRN") => {}
            other => panic!("Expected STRN validation error, got {other:?}"),
        }

        let unregistered = header_with(&[
            HeaderEdit::BuyerType(BuyerType::Unregistered),
            HeaderEdit::BuyerName("Walk-in Customer".to_string()),
            HeaderEdit::InvoiceNumber("INV-2026-00249".to_string()),
        ]);
        assert!(unregistered.validate().is_ok());
    }

    #[test]
    fn header_edit_json_uses_form_labels() {
        let edit: HeaderEdit =
            serde_json::from_str(r#"{"field": "sale_type", "value": "Inter-Provincial"}"#)
                .unwrap();
        assert_eq!(edit, HeaderEdit::SaleType(SaleType::InterProvincial));

        let edit: HeaderEdit =
            serde_json::from_str(r#"{"field": "invoice_date", "value": "2026-02-09"}"#).unwrap();
        assert_eq!(
            edit,
            HeaderEdit::InvoiceDate(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap())
        );
    }
}
