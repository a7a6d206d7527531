use serde::Deserialize;

use crate::domain::{MessageResult, SendSms, SendSmsResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SendSmsJsonResponse {
    #[serde(default)]
    message_count: Option<String>,
    #[serde(default)]
    messages: Vec<MessageJsonResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MessageJsonResult {
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_text: Option<String>,
    #[serde(default)]
    remaining_balance: Option<String>,
    #[serde(default)]
    message_price: Option<String>,
    #[serde(default)]
    network: Option<String>,
}

impl From<MessageJsonResult> for MessageResult {
    fn from(value: MessageJsonResult) -> Self {
        Self {
            to: value.to,
            message_id: value.message_id,
            status: value.status,
            error_text: value.error_text,
            remaining_balance: value.remaining_balance,
            message_price: value.message_price,
            network: value.network,
        }
    }
}

/// Push `key=value` unless `value` is empty; Nexmo treats a present-but-empty
/// field differently from a missing one.
pub fn push_non_empty(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    if !value.is_empty() {
        params.push((key.to_owned(), value.to_owned()));
    }
}

pub fn encode_send_sms_form(request: &SendSms) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_non_empty(&mut params, "to", request.to());
    push_non_empty(&mut params, "text", request.text());
    if let Some(callback) = request.callback() {
        push_non_empty(&mut params, "callback", callback);
    }
    params
}

/// Serialize form pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_form_body(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendSmsResponse, TransportError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;
    Ok(SendSmsResponse {
        message_count: parsed.message_count,
        messages: parsed.messages.into_iter().map(MessageResult::from).collect(),
    })
}
