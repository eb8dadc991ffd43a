//! Products reducer
//!
//! Tagged-union action set applied by a pure reduction function over the
//! command's line items. Actions are dispatched from UI event names; an
//! unrecognized name fails loudly with [`ReducerError::UnknownAction`]
//! (fatal to the reducer, never to the process).

use serde::{Deserialize, Serialize};
use shared::command::LineItem;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReducerError {
    #[error("unknown products action: {0}")]
    UnknownAction(String),
}

/// Action set over a command's product list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ProductsAction {
    /// Replace the whole list (authoritative snapshot arrived)
    #[serde(rename = "add-products")]
    AddAll(Vec<LineItem>),
    /// Append one line item
    Add(LineItem),
    /// Bump the amount of one line by a unit
    IncrementAmount { id: String },
    /// Lower the amount of one line by a unit, floored at zero
    DecrementAmount { id: String },
    /// Remove one line
    Delete { id: String },
}

impl ProductsAction {
    /// Decode a dispatched UI event
    ///
    /// Unknown `type` tags fail loudly instead of being silently dropped.
    pub fn parse(event: &serde_json::Value) -> Result<Self, ReducerError> {
        serde_json::from_value(event.clone()).map_err(|_| {
            let tag = event
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("<missing type>");
            ReducerError::UnknownAction(tag.to_string())
        })
    }
}

/// Apply one action to the product list, returning the new list
///
/// Pure function: the input slice is never mutated.
pub fn reduce(state: &[LineItem], action: ProductsAction) -> Vec<LineItem> {
    debug!(items = state.len(), ?action, "reducing products");

    match action {
        ProductsAction::AddAll(products) => products,
        ProductsAction::Add(item) => {
            let mut next = state.to_vec();
            next.push(item);
            next
        }
        ProductsAction::IncrementAmount { id } => state
            .iter()
            .map(|product| {
                if product.id == id {
                    LineItem {
                        amount: product.amount + 1.0,
                        ..product.clone()
                    }
                } else {
                    product.clone()
                }
            })
            .collect(),
        ProductsAction::DecrementAmount { id } => state
            .iter()
            .map(|product| {
                if product.id == id && product.amount > 0.0 {
                    LineItem {
                        amount: product.amount - 1.0,
                        ..product.clone()
                    }
                } else {
                    product.clone()
                }
            })
            .collect(),
        ProductsAction::Delete { id } => state
            .iter()
            .filter(|product| product.id != id)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, amount: f64) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("Produto {id}"),
            category: "Bebidas".to_string(),
            amount,
            unit_price: 7.9,
            total_payed: 0.0,
        }
    }

    #[test]
    fn test_add_all_replaces_state() {
        let state = vec![item("old", 2.0)];
        let next = reduce(
            &state,
            ProductsAction::AddAll(vec![item("a", 1.0), item("b", 3.0)]),
        );
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].id, "a");
    }

    #[test]
    fn test_add_appends() {
        let state = vec![item("a", 1.0)];
        let next = reduce(&state, ProductsAction::Add(item("b", 1.0)));
        assert_eq!(next.len(), 2);
        assert_eq!(state.len(), 1); // input untouched
    }

    #[test]
    fn test_increment_targets_one_item() {
        let state = vec![item("a", 1.0), item("b", 5.0)];
        let next = reduce(
            &state,
            ProductsAction::IncrementAmount {
                id: "b".to_string(),
            },
        );
        assert_eq!(next[0].amount, 1.0);
        assert_eq!(next[1].amount, 6.0);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let state = vec![item("a", 0.0)];
        let next = reduce(
            &state,
            ProductsAction::DecrementAmount {
                id: "a".to_string(),
            },
        );
        assert_eq!(next[0].amount, 0.0);
    }

    #[test]
    fn test_decrement_lowers_amount() {
        let state = vec![item("a", 2.0)];
        let next = reduce(
            &state,
            ProductsAction::DecrementAmount {
                id: "a".to_string(),
            },
        );
        assert_eq!(next[0].amount, 1.0);
    }

    #[test]
    fn test_delete_removes_item() {
        let state = vec![item("a", 1.0), item("b", 1.0)];
        let next = reduce(&state, ProductsAction::Delete { id: "a".to_string() });
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "b");
    }

    #[test]
    fn test_event_decoding_known_actions() {
        let event = json!({ "type": "increment-amount", "payload": { "id": "a" } });
        assert_eq!(
            ProductsAction::parse(&event).unwrap(),
            ProductsAction::IncrementAmount {
                id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_action_fails_loudly() {
        let event = json!({ "type": "explode", "payload": {} });
        assert_eq!(
            ProductsAction::parse(&event),
            Err(ReducerError::UnknownAction("explode".to_string()))
        );

        let no_type = json!({ "payload": {} });
        assert_eq!(
            ProductsAction::parse(&no_type),
            Err(ReducerError::UnknownAction("<missing type>".to_string()))
        );
    }
}
