//! Trade suggestions and the price history sent alongside them

use serde::{Deserialize, Serialize};

use crate::types::payload::MultiplexedResponse;

/// Suggestion type the server sends when there is nothing to do.
pub const WAIT_SUGGESTION_TYPE: &str = "wait";

/// Next action suggested by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub box_id: i32,
    #[serde(default)]
    pub item_id: i32,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub command_id: i32,
    #[serde(default)]
    pub message: String,
}

impl Suggestion {
    pub fn is_wait(&self) -> bool {
        self.kind.eq_ignore_ascii_case(WAIT_SUGGESTION_TYPE)
    }
}

/// One sample of an item's price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    #[serde(default)]
    pub low: Option<i64>,
    #[serde(default)]
    pub high: Option<i64>,
}

/// Price history used to draw the item graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub item_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: Vec<PricePoint>,
}

/// Decoded `/suggestion` response: the suggestion plus optional graph data.
pub type SuggestionResponse = MultiplexedResponse<Suggestion, GraphData>;
