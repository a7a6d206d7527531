//! Gateway layer: the transport-agnostic "send an SMS" capability.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Anything that can be turned into an SMS body.
///
/// Implemented for every [`fmt::Display`] type, so `&str`, `String` and custom
/// message types with a `Display` impl all work out of the box.
pub trait Message {
    fn to_text(&self) -> String;
}

impl<T: fmt::Display + ?Sized> Message for T {
    fn to_text(&self) -> String {
        self.to_string()
    }
}

/// A pluggable SMS transport.
///
/// Implementations receive per-call data as arguments and must not keep it on
/// `self`; a single gateway value is expected to serve concurrent sends.
pub trait Gateway: Send + Sync {
    /// Provider-specific reply.
    type Response;
    /// Provider-specific failure.
    type Error;

    /// Send `message` to `to`. An empty `callback` means no delivery receipt URL.
    fn send<'a>(
        &'a self,
        to: &'a str,
        message: &dyn Message,
        callback: &'a str,
    ) -> BoxFuture<'a, Result<Self::Response, Self::Error>>;
}

/// Send `message` through `gateway`.
///
/// Callers that only depend on this function stay decoupled from the concrete
/// gateway type. Arguments are forwarded unchanged.
pub fn send<'a, G>(
    gateway: &'a G,
    to: &'a str,
    message: &dyn Message,
    callback: &'a str,
) -> BoxFuture<'a, Result<G::Response, G::Error>>
where
    G: Gateway + ?Sized,
{
    gateway.send(to, message, callback)
}
