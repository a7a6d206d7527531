/// A single outbound SMS, built fresh for every send call.
///
/// Nothing here is validated: an empty field is simply left out of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    to: String,
    text: String,
    callback: String,
}

impl SendSms {
    pub fn new(to: impl Into<String>, text: impl Into<String>, callback: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            text: text.into(),
            callback: callback.into(),
        }
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Delivery receipt URL, `None` when the caller passed an empty string.
    pub fn callback(&self) -> Option<&str> {
        if self.callback.is_empty() {
            None
        } else {
            Some(&self.callback)
        }
    }
}
