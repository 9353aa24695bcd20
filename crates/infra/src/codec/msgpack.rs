//! MessagePack sub-message codec

use beagle_core::{CodecError, SubMessageCodec};
use beagle_domain::constants::MSGPACK_CONTENT_TYPE;
use serde::de::DeserializeOwned;

/// Decodes `application/x-msgpack` sub-messages.
///
/// Structs may be encoded either as maps keyed by field name or as arrays in
/// field order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl SubMessageCodec for MsgPackCodec {
    fn content_type(&self) -> &'static str {
        MSGPACK_CONTENT_TYPE
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        rmp_serde::from_slice(bytes).map_err(|e| CodecError::new(MSGPACK_CONTENT_TYPE, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use beagle_domain::{GraphData, PricePoint, Suggestion};

    use super::*;

    #[test]
    fn decodes_named_field_maps() {
        let suggestion = Suggestion {
            kind: "sell".to_string(),
            box_id: 1,
            item_id: 561,
            price: 210,
            quantity: 5_000,
            name: "Nature rune".to_string(),
            command_id: 3,
            message: String::new(),
        };
        let bytes = rmp_serde::to_vec_named(&suggestion).unwrap();

        let decoded: Suggestion = MsgPackCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, suggestion);
    }

    #[test]
    fn decodes_positional_arrays() {
        let graph = GraphData {
            item_id: 561,
            name: "Nature rune".to_string(),
            points: vec![PricePoint { timestamp: 1_700_000_000, low: Some(205), high: Some(215) }],
        };
        let bytes = rmp_serde::to_vec(&graph).unwrap();

        let decoded: GraphData = MsgPackCodec.decode(&bytes).unwrap();
        assert_eq!(decoded, graph);
    }

    #[test]
    fn garbage_is_a_codec_error() {
        let err = MsgPackCodec.decode::<Suggestion>(&[0xc1, 0x00]).unwrap_err();
        assert_eq!(err.content_type, "application/x-msgpack");
    }
}
