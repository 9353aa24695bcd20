//! Price lookups for a single item

use serde::{Deserialize, Serialize};

use crate::constants::PRICE_UNAVAILABLE_MESSAGE;
use crate::types::suggestion::GraphData;

/// Body of a `/prices` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub item_id: i32,
    pub display_name: String,
    pub f2p_only: bool,
    pub timeframe_minutes: i32,
    pub include_graph_data: bool,
}

impl PriceRequest {
    pub fn new(item_id: i32, display_name: impl Into<String>, f2p_only: bool, timeframe_minutes: i32) -> Self {
        Self {
            item_id,
            display_name: display_name.into(),
            f2p_only,
            timeframe_minutes,
            include_graph_data: true,
        }
    }
}

/// Suggested buy and sell price for an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPrice {
    #[serde(default)]
    pub buy_price: i64,
    #[serde(default)]
    pub sell_price: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub graph_data: Option<GraphData>,
}

impl ItemPrice {
    /// Placeholder shown when the price could not be fetched.
    pub fn unavailable() -> Self {
        Self { message: PRICE_UNAVAILABLE_MESSAGE.to_string(), ..Self::default() }
    }

    pub const fn is_available(&self) -> bool {
        self.buy_price > 0 || self.sell_price > 0
    }
}
