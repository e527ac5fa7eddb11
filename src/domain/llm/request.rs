//! Chat completion input

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// One prompt turn, serialized as `{ "role": ..., "content": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Instructions followed by the caller's text
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn instructed(instructions: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            messages: vec![
                Message {
                    role: MessageRole::System,
                    content: instructions.into(),
                },
                Message {
                    role: MessageRole::User,
                    content: input.into(),
                },
            ],
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructed_request() {
        let request = LlmRequest::instructed("Extract materials", "Build a raised garden bed")
            .with_temperature(0.2);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[1].content, "Build a raised garden bed");
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_message_wire_shape() {
        let request = LlmRequest::instructed("Return only JSON", "deck");

        let json = serde_json::to_value(&request.messages[0]).unwrap();

        assert_eq!(json, serde_json::json!({ "role": "system", "content": "Return only JSON" }));
    }
}
