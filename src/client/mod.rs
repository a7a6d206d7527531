//! Client layer: the Nexmo gateway, its configuration and the HTTP seam it sends through.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::domain::{SendSms, SendSmsResponse};
use crate::gateway::{BoxFuture, Gateway, Message};

/// Nexmo SMS API endpoint used unless the builder overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://rest.nexmo.com/sms/json";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Clone)]
/// Nexmo account credentials and sender identity.
///
/// Values are not validated. Empty values are left out of the request, which
/// lets Nexmo apply its own defaults (e.g. a sender configured on the account).
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
    from: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            from: from.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &SecretString {
        &self.api_secret
    }

    /// Sender id: an alphanumeric name or a virtual number.
    pub fn sender(&self) -> &str {
        &self.from
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        crate::transport::push_non_empty(params, "api_key", &self.api_key);
        crate::transport::push_non_empty(params, "api_secret", self.api_secret.expose_secret());
        crate::transport::push_non_empty(params, "from", &self.from);
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NexmoClient`].
///
/// Per-message delivery failures (`status != "0"`) are not errors; inspect
/// [`SendSmsResponse::messages`] for those.
pub enum NexmoError {
    /// The configured endpoint is not a valid absolute URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// HTTP client / transport failure (DNS, TLS, connection refused, body read, timeouts).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be decoded as the expected JSON document.
    #[error("parse error: {source}")]
    Parse {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
        /// Raw body as received, kept for diagnostics.
        body: String,
    },
}

#[derive(Debug, Clone)]
/// Builder for [`NexmoClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct NexmoClientBuilder {
    credentials: Credentials,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NexmoClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the endpoint URL, e.g. to point at a mock server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`NexmoClient`].
    pub fn build(self) -> Result<NexmoClient, NexmoError> {
        let endpoint = Url::parse(&self.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| NexmoError::Transport(Box::new(err)))?;

        Ok(NexmoClient {
            credentials: self.credentials,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Nexmo SMS gateway.
///
/// Each send is one `POST` of a form-encoded body to
/// `https://rest.nexmo.com/sms/json` (or the builder's endpoint), answered with
/// JSON. The client holds only credentials and configuration; clones share the
/// underlying connection pool and can send concurrently.
pub struct NexmoClient {
    credentials: Credentials,
    endpoint: Url,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for NexmoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NexmoClient")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl NexmoClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`NexmoClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        let endpoint = match Url::parse(DEFAULT_ENDPOINT) {
            Ok(url) => url,
            Err(err) => unreachable!("default endpoint is a valid URL: {err}"),
        };
        Self {
            credentials,
            endpoint,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> NexmoClientBuilder {
        NexmoClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Send one SMS through Nexmo.
    ///
    /// The HTTP status is not interpreted: Nexmo reports problems through the
    /// per-message `status` field, which is returned as data.
    ///
    /// Errors:
    /// - [`NexmoError::Transport`] when the request cannot be sent or the body cannot be read,
    /// - [`NexmoError::Parse`] when the body is not the expected JSON document.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "NexmoClient::send_sms",
            skip_all,
            fields(to = %request.to(), endpoint = %self.endpoint)
        )
    )]
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, NexmoError> {
        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_form_params(&mut params);
        params.extend(crate::transport::encode_send_sms_form(&request));
        let body = crate::transport::encode_form_body(&params);

        let response = match self.http.post_form(self.endpoint.as_str(), body).await {
            Ok(response) => response,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "nexmo request failed");
                return Err(NexmoError::Transport(err));
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(status = response.status, "nexmo responded");

        match crate::transport::decode_send_sms_json_response(&response.body) {
            Ok(parsed) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message_count = parsed.message_count.as_deref().unwrap_or_default(),
                    failed = parsed.failed().count(),
                    "nexmo response decoded"
                );
                Ok(parsed)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    error = %err,
                    status = response.status,
                    "nexmo response is not valid JSON"
                );
                Err(NexmoError::Parse {
                    source: Box::new(err),
                    body: response.body,
                })
            }
        }
    }
}

impl Gateway for NexmoClient {
    type Response = SendSmsResponse;
    type Error = NexmoError;

    fn send<'a>(
        &'a self,
        to: &'a str,
        message: &dyn Message,
        callback: &'a str,
    ) -> BoxFuture<'a, Result<SendSmsResponse, NexmoError>> {
        let request = SendSms::new(to, message.to_text(), callback);
        Box::pin(self.send_sms(request))
    }
}
