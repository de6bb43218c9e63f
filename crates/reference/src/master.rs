//! Built-in HS code master list with tax rates and schedule references.

use rust_decimal::Decimal;

use crate::classification::ClassificationEntry;
use crate::table::ReferenceTable;

/// (code, description, tax rate %, schedule reference)
const HS_CODE_MASTER: &[(&str, &str, u32, &str)] = &[
    // Chapter 84 - Machinery
    ("8479.89.00", "Industrial Machinery Parts", 18, "SCH-III-8479"),
    ("8483.40.00", "Gears and Gearing", 18, "SCH-III-8483"),
    ("8481.80.00", "Taps, Cocks, Valves", 18, "SCH-III-8481"),
    // Chapter 85 - Electrical Equipment
    ("8541.40.00", "Electronic Components", 18, "SCH-III-8541"),
    ("8544.42.00", "Electric Cables", 18, "SCH-III-8544"),
    ("8536.50.00", "Switches and Sockets", 18, "SCH-III-8536"),
    // Chapter 39 - Plastics
    ("3920.10.00", "Plastic Sheets", 17, "SCH-III-3920"),
    ("3923.30.00", "Plastic Containers", 17, "SCH-III-3923"),
    // Chapter 73 - Iron and Steel
    ("7308.90.00", "Steel Structures", 18, "SCH-III-7308"),
    ("7326.90.00", "Steel Articles", 18, "SCH-III-7326"),
    // Chapter 48 - Paper Products
    ("4819.10.00", "Cartons and Boxes", 17, "SCH-III-4819"),
    ("4823.90.00", "Paper Articles", 17, "SCH-III-4823"),
    // Chapter 27 - Mineral Fuels
    ("2710.19.00", "Petroleum Products", 17, "SCH-III-2710"),
    // Chapter 10 - Cereals
    ("1006.30.00", "Rice (Semi-milled)", 0, "SCH-EXEMPT-1006"),
    ("1001.99.00", "Wheat", 0, "SCH-EXEMPT-1001"),
    // Chapter 04 - Dairy
    ("0402.21.00", "Milk Powder", 18, "SCH-III-0402"),
    // Chapter 63 - Textiles
    ("6302.60.00", "Bed Linen", 18, "SCH-III-6302"),
    ("6304.93.00", "Curtains", 18, "SCH-III-6304"),
    // Chapter 94 - Furniture
    ("9403.60.00", "Wooden Furniture", 18, "SCH-III-9403"),
    // Chapter 30 - Pharmaceutical
    ("3004.90.00", "Medicines", 0, "SCH-EXEMPT-3004"),
];

/// The built-in HS code master table.
pub fn hs_code_master() -> ReferenceTable {
    ReferenceTable::from_trusted(
        HS_CODE_MASTER
            .iter()
            .map(|&(code, description, rate, schedule)| {
                ClassificationEntry::new(code, description, Decimal::from(rate), schedule)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_list_passes_validation() {
        let master = hs_code_master();
        let revalidated = ReferenceTable::from_entries(master.iter().cloned()).unwrap();
        assert_eq!(revalidated, master);
        assert_eq!(master.len(), HS_CODE_MASTER.len());
        assert_eq!(master.len(), 20);
    }

    #[test]
    fn machinery_parts_carry_standard_rate() {
        let master = hs_code_master();
        let entry = master.lookup("8479.89.00").unwrap();
        assert_eq!(entry.description, "Industrial Machinery Parts");
        assert_eq!(entry.tax_rate_percent, Decimal::from(18));
        assert_eq!(entry.schedule_reference, "SCH-III-8479");
    }

    #[test]
    fn exempt_goods_have_zero_rate() {
        let master = hs_code_master();
        let exempt: Vec<&str> = master
            .iter()
            .filter(|e| e.is_exempt())
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(exempt, vec!["1006.30.00", "1001.99.00", "3004.90.00"]);
        assert!(master
            .iter()
            .filter(|e| e.is_exempt())
            .all(|e| e.schedule_reference.starts_with("SCH-EXEMPT-")));
    }
}
