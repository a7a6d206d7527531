//! Pluggable SMS gateway abstraction with a typed Nexmo (Vonage) SMS API client.
//!
//! The crate is split into a gateway capability ([`Gateway`], [`send`]), a domain
//! layer of plain types, a transport layer for wire-format details, and a small
//! client layer ([`NexmoClient`]) orchestrating the HTTP exchange.
//!
//! ```rust,no_run
//! use nexmo_sms::{Credentials, NexmoClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nexmo_sms::NexmoError> {
//!     let client = NexmoClient::new(Credentials::new("key", "secret", "MyApp"));
//!     let response = nexmo_sms::send(&client, "447700900000", &"hello", "").await?;
//!     for failed in response.failed() {
//!         eprintln!("rejected: {:?}", failed.error_text);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod gateway;
mod transport;

pub use client::{Credentials, DEFAULT_ENDPOINT, NexmoClient, NexmoClientBuilder, NexmoError};
pub use domain::{
    KnownStatusCode, MessageResult, Msisdn, STATUS_OK, SendSms, SendSmsResponse, StatusCode,
    ValidationError,
};
pub use gateway::{BoxFuture, Gateway, Message, send};
