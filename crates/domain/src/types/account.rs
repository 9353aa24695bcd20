//! Account state posted to the suggestion endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "f2pOnlyMode", default)]
    pub f2p_only_mode: bool,
}

/// Snapshot of the player's account used to compute the next suggestion.
///
/// Inventory, offers and uncollected items are forwarded as-is; their shape
/// belongs to the game integration, not to the request pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub account_hash: i64,
    pub display_name: String,
    pub is_member: bool,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub sell_only_mode: bool,
    #[serde(default)]
    pub skip_suggestion: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_to_skip: Option<i32>,
    #[serde(default)]
    pub blocked_items: Vec<i32>,
    #[serde(default)]
    pub timeframe: i32,
    #[serde(default)]
    pub is_suggestions_paused: bool,
    #[serde(default)]
    pub inventory: Value,
    #[serde(default)]
    pub offers: Value,
    #[serde(default)]
    pub uncollected: Value,
    #[serde(default)]
    pub grand_exchange_open: bool,
    #[serde(default)]
    pub is_price_graph_website: bool,
}

impl AccountStatus {
    /// Ask the server to skip the given item in its next suggestion.
    #[must_use]
    pub fn skipping(mut self, item_id: i32) -> Self {
        self.skip_suggestion = true;
        self.item_to_skip = Some(item_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_item_is_only_sent_when_skipping() {
        let status = AccountStatus { display_name: "Zezima".to_string(), ..Default::default() };
        let json = serde_json::to_value(&status).unwrap();
        assert!(json.get("item_to_skip").is_none());
        assert_eq!(json["preferences"]["f2pOnlyMode"], false);

        let json = serde_json::to_value(status.skipping(4151)).unwrap();
        assert_eq!(json["skip_suggestion"], true);
        assert_eq!(json["item_to_skip"], 4151);
    }
}
