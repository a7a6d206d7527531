use crate::domain::value::{STATUS_OK, StatusCode};

/// Decoded reply of the Nexmo `sms/json` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendSmsResponse {
    pub message_count: Option<String>,
    pub messages: Vec<MessageResult>,
}

impl SendSmsResponse {
    /// Message parts Nexmo did not accept (`status != "0"`).
    pub fn failed(&self) -> impl Iterator<Item = &MessageResult> {
        self.messages.iter().filter(|message| !message.is_ok())
    }
}

/// Per-part result. Long texts are split by Nexmo and reported as several entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageResult {
    pub to: Option<String>,
    pub message_id: Option<String>,
    pub status: Option<String>,
    pub error_text: Option<String>,
    pub remaining_balance: Option<String>,
    pub message_price: Option<String>,
    pub network: Option<String>,
}

impl MessageResult {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        self.status.as_deref().and_then(StatusCode::parse)
    }
}
