//! Completed trades and the flips the server derives from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Buy,
    Sell,
}

/// A Grand Exchange trade reported to the server for profit tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub item_id: i32,
    pub item_name: String,
    pub price: i64,
    pub quantity: i64,
    pub box_id: i32,
    pub amount_spent: i64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub was_copilot_suggestion: bool,
    #[serde(default)]
    pub copilot_price_used: bool,
}

/// A buy/sell cycle tracked by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    pub id: String,
    #[serde(default)]
    pub account_id: i64,
    pub item_id: i32,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub opened_time: i64,
    #[serde(default)]
    pub opened_quantity: i64,
    #[serde(default)]
    pub spent: i64,
    #[serde(default)]
    pub closed_time: i64,
    #[serde(default)]
    pub closed_quantity: i64,
    #[serde(default)]
    pub received_post_tax: i64,
    #[serde(default)]
    pub profit: i64,
    #[serde(default)]
    pub tax_paid: i64,
    #[serde(default)]
    pub is_closed: bool,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn transaction_serializes_epoch_seconds_and_lowercase_type() {
        let transaction = Transaction {
            id: Uuid::nil(),
            offer_type: OfferType::Sell,
            item_id: 4151,
            item_name: "Abyssal whip".to_string(),
            price: 1_500_000,
            quantity: 1,
            box_id: 3,
            amount_spent: 1_500_000,
            time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            was_copilot_suggestion: true,
            copilot_price_used: false,
        };

        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json["type"], "sell");
        assert_eq!(json["time"], 1_700_000_000);
        assert_eq!(json["item_id"], 4151);
    }

    #[test]
    fn flip_tolerates_missing_optional_fields() {
        let flip: Flip = serde_json::from_value(json!({
            "id": "1700000000-abc",
            "item_id": 4151,
            "profit": 25_000
        }))
        .unwrap();
        assert_eq!(flip.profit, 25_000);
        assert!(!flip.is_closed);
    }
}
