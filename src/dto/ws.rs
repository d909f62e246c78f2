use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::sse::ServerEvent;

#[derive(Debug, Serialize, ToSchema)]
/// Frame pushed to WebSocket match followers.
pub struct WsFrame {
    /// Event name, same as the SSE event name.
    pub event: String,
    /// Event payload.
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

impl From<&ServerEvent> for WsFrame {
    fn from(event: &ServerEvent) -> Self {
        Self {
            event: event.event.clone().unwrap_or_else(|| "message".into()),
            data: serde_json::from_str(&event.data)
                .unwrap_or_else(|_| serde_json::Value::String(event.data.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_is_embedded_as_an_object() {
        let event = ServerEvent {
            event: Some("score_update".into()),
            data: r#"{"matchId":"x"}"#.into(),
        };
        let frame = serde_json::to_value(WsFrame::from(&event)).unwrap();
        assert_eq!(frame["event"], "score_update");
        assert_eq!(frame["data"]["matchId"], "x");
    }

    #[test]
    fn plain_payload_is_kept_as_text() {
        let event = ServerEvent {
            event: None,
            data: "keep-alive".into(),
        };
        let frame = WsFrame::from(&event);
        assert_eq!(frame.event, "message");
        assert_eq!(frame.data, serde_json::Value::String("keep-alive".into()));
    }
}
