//! Wire-compatible domain types
//!
//! Field names follow the backend's JSON (`_id`, `totalPayed`,
//! `paymentTypes`, `isActive`), so snapshots deserialize straight from the
//! authoritative responses and patches serialize straight into them.

use serde::{Deserialize, Serialize};

/// Category whose line items are sold by weight (fractional amounts)
pub const WEIGHED_CATEGORY: &str = "Peixes";

/// Payment methods accepted at the register
///
/// Only cash may produce change; electronic methods are assumed exact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "Dinheiro")]
    Cash,
    #[serde(rename = "Cartão")]
    Card,
    #[serde(rename = "Pix")]
    Pix,
}

impl PaymentMethod {
    pub fn is_cash(&self) -> bool {
        matches!(self, Self::Cash)
    }

    /// Wire/display label (the backend stores these verbatim)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::Card => "Cartão",
            Self::Pix => "Pix",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One line on a command: product snapshot plus the ordered amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    /// Units for regular items; weight for the weighed category
    pub amount: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub total_payed: f64,
}

impl LineItem {
    pub fn is_weighed(&self) -> bool {
        self.category.eq_ignore_ascii_case(WEIGHED_CATEGORY)
    }
}

/// Stock-side product as the inventory endpoints return it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit_price: f64,
    /// Quantity left in stock
    pub amount: f64,
}

/// One table's running tab
///
/// Snapshots are replaced wholesale with each authoritative server response,
/// never patched incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    #[serde(rename = "_id")]
    pub id: String,
    pub waiter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fishing_type: Option<String>,
    #[serde(default)]
    pub products: Vec<LineItem>,
    /// Sum of all line totals
    #[serde(default)]
    pub total: f64,
    /// Amount already settled; monotonically non-decreasing until closeout
    #[serde(default, rename = "totalPayed")]
    pub total_paid: f64,
    /// Distinct payment methods used so far
    #[serde(default)]
    pub payment_types: Vec<PaymentMethod>,
    /// False once the command is closed and archived
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiter_extra: Option<f64>,
}

fn default_active() -> bool {
    true
}

/// Field-level patch for `UpdateOrder`; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fishing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<LineItem>>,
    /// With the `updateTotal` flag set, the backend treats this as the
    /// amount to settle against the balance rather than a new total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Closeout transaction payload (`RecordPayment`)
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloseoutRequest {
    pub command_id: String,
    pub payment_types: Vec<PaymentMethod>,
    /// Gratuity ("caixinha"), computed against the pre-discount total
    pub waiter_extra: f64,
    pub observation: String,
    pub discount: f64,
}

/// Final settlement record produced at closeout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub paid_total: f64,
    pub discount: f64,
    pub gratuity: f64,
    pub observation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_deserializes_wire_names() {
        let json = r#"{
            "_id": "cmd-1",
            "waiter": "Diego",
            "table": "João Gomes",
            "products": [
                {"_id": "coca123", "name": "Coca-Cola", "category": "Bebidas",
                 "amount": 5, "unitPrice": 7.9}
            ],
            "total": 39.5,
            "totalPayed": 10.0,
            "paymentTypes": ["Dinheiro", "Cartão"],
            "isActive": true
        }"#;

        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.id, "cmd-1");
        assert_eq!(command.total_paid, 10.0);
        assert_eq!(
            command.payment_types,
            vec![PaymentMethod::Cash, PaymentMethod::Card]
        );
        assert_eq!(command.products[0].unit_price, 7.9);
        assert_eq!(command.products[0].total_payed, 0.0);
        assert!(command.is_active);
    }

    #[test]
    fn test_is_active_defaults_to_true() {
        let command: Command =
            serde_json::from_str(r#"{"_id": "cmd-2", "waiter": "Bryan"}"#).unwrap();
        assert!(command.is_active);
        assert!(command.products.is_empty());
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = CommandPatch {
            total: Some(50.0),
            payment_type: Some(PaymentMethod::Cash),
            ..Default::default()
        };

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["total"], 50.0);
        assert_eq!(json["paymentType"], "Dinheiro");
        assert!(json.get("products").is_none());
        assert!(json.get("isActive").is_none());
    }

    #[test]
    fn test_weighed_category() {
        let fish = LineItem {
            id: "peixe123".to_string(),
            name: "Peixe Baiacu".to_string(),
            category: "Peixes".to_string(),
            amount: 1.35,
            unit_price: 24.5,
            total_payed: 0.0,
        };
        assert!(fish.is_weighed());

        let drink = LineItem {
            category: "Bebidas".to_string(),
            ..fish
        };
        assert!(!drink.is_weighed());
    }

    #[test]
    fn test_payment_method_labels_round_trip() {
        for method in [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Pix] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.label()));
            let back: PaymentMethod = serde_json::from_str(&json).unwrap();
            assert_eq!(back, method);
        }
    }
}
